mod client_detail;
mod clients;
mod dashboard;
mod exercises;
mod log_session;
mod new_workout;
mod progress;
mod session_detail;
mod state;
mod workout_detail;
mod workouts;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use client_detail::ClientDetailView;
pub use clients::ClientsView;
pub use dashboard::DashboardView;
pub use exercises::ExercisesView;
pub use log_session::LogSessionView;
pub use new_workout::NewWorkoutView;
pub use progress::ProgressView;
pub use session_detail::SessionDetailView;
pub use state::{ErrorBanner, ViewError, ViewState, view_state_from_resource};
pub use workout_detail::WorkoutDetailView;
pub use workouts::WorkoutsView;
