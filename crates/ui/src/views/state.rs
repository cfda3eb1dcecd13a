use dioxus::prelude::*;
use services::{
    ClientServiceError, ExerciseServiceError, ProgressError, WorkoutServiceError,
};
use trainer_core::model::{ClientError, ExerciseError, SessionError, WorkoutError};

/// Failure shown as an inline banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    NotFound(&'static str),
    /// Input the user can fix; the message is shown as-is.
    Invalid(String),
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Unknown => "Something went wrong. Please try again.".to_owned(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::Invalid(message) => message.clone(),
        }
    }

    /// Whether a retry could help.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl From<ClientServiceError> for ViewError {
    fn from(err: ClientServiceError) -> Self {
        match err {
            ClientServiceError::NotFound => Self::NotFound("Client"),
            ClientServiceError::Client(ClientError::EmptyName) => Self::Invalid(err.to_string()),
            other => {
                tracing::warn!(error = %other, "client request failed");
                Self::Unknown
            }
        }
    }
}

impl From<ExerciseServiceError> for ViewError {
    fn from(err: ExerciseServiceError) -> Self {
        match err {
            ExerciseServiceError::Exercise(ExerciseError::EmptyName) => {
                Self::Invalid("Exercise name is required".to_owned())
            }
            other => {
                tracing::warn!(error = %other, "exercise request failed");
                Self::Unknown
            }
        }
    }
}

impl From<WorkoutServiceError> for ViewError {
    fn from(err: WorkoutServiceError) -> Self {
        match err {
            WorkoutServiceError::NotFound => Self::NotFound("Workout"),
            WorkoutServiceError::Workout(
                inner @ (WorkoutError::EmptyName
                | WorkoutError::NoExercises
                | WorkoutError::ZeroSets { .. }),
            ) => Self::Invalid(inner.to_string()),
            other => {
                tracing::warn!(error = %other, "workout request failed");
                Self::Unknown
            }
        }
    }
}

impl From<ProgressError> for ViewError {
    fn from(err: ProgressError) -> Self {
        match err {
            ProgressError::SessionNotFound(_) => Self::NotFound("Session"),
            ProgressError::ClientNotFound => Self::NotFound("Client"),
            ProgressError::WorkoutNotFound => Self::NotFound("Workout"),
            ProgressError::MissingSelection => Self::Invalid(format!("{err}.")),
            ProgressError::Session(SessionError::InvalidTimeRange) => {
                Self::Invalid("The session cannot end before it starts.".to_owned())
            }
            other => {
                tracing::warn!(error = %other, "progress request failed");
                Self::Unknown
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Inline error banner with an optional retry button.
#[component]
pub fn ErrorBanner(error: ViewError, on_retry: Option<EventHandler<()>>) -> Element {
    let message = error.message();
    let retry = on_retry.filter(|_| error.is_retryable());
    rsx! {
        div { class: "error-banner", role: "alert",
            span { "{message}" }
            {retry.map(|on_retry| rsx! {
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_retry.call(()),
                    "Retry"
                }
            })}
        }
    }
}
