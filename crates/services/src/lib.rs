#![forbid(unsafe_code)]

pub mod app_services;
pub mod client_service;
pub mod dashboard_service;
pub mod error;
pub mod exercise_service;
pub mod identity_service;
pub mod progress_service;
pub mod workout_service;

pub use trainer_core::Clock;

pub use app_services::AppServices;
pub use client_service::{AssignedWorkout, ClientProfile, ClientService};
pub use dashboard_service::{DashboardOverview, DashboardService};
pub use error::{
    AppServicesError, ClientServiceError, ExerciseServiceError, IdentityError, ProgressError,
    WorkoutServiceError,
};
pub use exercise_service::ExerciseService;
pub use identity_service::{IdentityService, TrainerIdentity};
pub use progress_service::{
    LogTemplateExercise, LoggedSet, ProgressService, SessionDetail, SessionListItem,
    SessionLogForm, SessionLogTemplate,
};
pub use workout_service::{PrescribedExercise, WorkoutDetail, WorkoutService};
