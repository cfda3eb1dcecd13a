use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::client::non_blank;
use crate::model::ids::{ClientId, ExerciseId, SessionId, WorkoutExerciseId, WorkoutId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,
}

/// Whether a session has been closed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Completed,
}

impl SessionStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

/// One client performing one workout template.
///
/// Sessions are written once and never updated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutSession {
    id: SessionId,
    client_id: ClientId,
    workout_id: WorkoutId,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    duration_minutes: Option<u32>,
    notes: Option<String>,
}

impl WorkoutSession {
    /// Rehydrate a session from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTimeRange` if `completed_at` precedes `started_at`.
    pub fn from_persisted(
        id: SessionId,
        client_id: ClientId,
        workout_id: WorkoutId,
        started_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
        duration_minutes: Option<u32>,
        notes: Option<String>,
    ) -> Result<Self, SessionError> {
        if completed_at.is_some_and(|done| done < started_at) {
            return Err(SessionError::InvalidTimeRange);
        }
        Ok(Self {
            id,
            client_id,
            workout_id,
            started_at,
            completed_at,
            duration_minutes,
            notes: notes.and_then(non_blank),
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    #[must_use]
    pub fn workout_id(&self) -> WorkoutId {
        self.workout_id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn duration_minutes(&self) -> Option<u32> {
        self.duration_minutes
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.completed_at.is_some() {
            SessionStatus::Completed
        } else {
            SessionStatus::InProgress
        }
    }
}

/// Session header as entered on the logging form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDraft {
    pub client_id: ClientId,
    pub workout_id: WorkoutId,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub notes: String,
}

/// Session header that passed validation, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSession {
    pub client_id: ClientId,
    pub workout_id: WorkoutId,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
}

impl SessionDraft {
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTimeRange` if `completed_at` precedes `started_at`.
    pub fn validate(self) -> Result<ValidSession, SessionError> {
        if self.completed_at.is_some_and(|done| done < self.started_at) {
            return Err(SessionError::InvalidTimeRange);
        }
        Ok(ValidSession {
            client_id: self.client_id,
            workout_id: self.workout_id,
            started_at: self.started_at,
            completed_at: self.completed_at,
            duration_minutes: self.duration_minutes,
            notes: non_blank(self.notes),
        })
    }
}

/// One logged set: a row of `(session, exercise, set number)`.
///
/// Set numbers are 1-based by convention but are not validated; zero, negative,
/// and duplicated numbers are stored as given.
#[derive(Debug, Clone, PartialEq)]
pub struct SetLog {
    pub session_id: SessionId,
    pub exercise_id: ExerciseId,
    pub prescription_id: Option<WorkoutExerciseId>,
    pub set_number: i32,
    pub reps_completed: Option<u32>,
    pub weight_kg: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn draft() -> SessionDraft {
        SessionDraft {
            client_id: ClientId::new(1),
            workout_id: WorkoutId::new(2),
            started_at: fixed_now(),
            completed_at: Some(fixed_now() + Duration::minutes(60)),
            duration_minutes: Some(60),
            notes: "  ".into(),
        }
    }

    #[test]
    fn draft_rejects_completion_before_start() {
        let mut d = draft();
        d.completed_at = Some(fixed_now() - Duration::minutes(1));
        assert_eq!(d.validate().unwrap_err(), SessionError::InvalidTimeRange);
    }

    #[test]
    fn draft_drops_blank_notes() {
        let valid = draft().validate().unwrap();
        assert_eq!(valid.notes, None);
        assert_eq!(valid.duration_minutes, Some(60));
    }

    #[test]
    fn status_follows_completion() {
        let open = WorkoutSession::from_persisted(
            SessionId::new(1),
            ClientId::new(1),
            WorkoutId::new(1),
            fixed_now(),
            None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(open.status(), SessionStatus::InProgress);
        assert_eq!(open.status().label(), "In Progress");

        let done = WorkoutSession::from_persisted(
            SessionId::new(2),
            ClientId::new(1),
            WorkoutId::new(1),
            fixed_now(),
            Some(fixed_now()),
            Some(45),
            Some("Felt strong".into()),
        )
        .unwrap();
        assert_eq!(done.status(), SessionStatus::Completed);
        assert_eq!(done.notes(), Some("Felt strong"));
    }
}
