//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use trainer_core::model::{
    ClientError, ExerciseError, SessionError, SessionId, TrainerError, WorkoutError,
};

/// Errors emitted by `IdentityService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IdentityError {
    #[error(transparent)]
    Trainer(#[from] TrainerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ClientService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientServiceError {
    #[error("client not found")]
    NotFound,
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ExerciseService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExerciseServiceError {
    #[error(transparent)]
    Exercise(#[from] ExerciseError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `WorkoutService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WorkoutServiceError {
    #[error("workout not found")]
    NotFound,
    #[error(transparent)]
    Workout(#[from] WorkoutError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("Please select a client and workout")]
    MissingSelection,
    #[error("Session not found")]
    SessionNotFound(SessionId),
    #[error("client not found")]
    ClientNotFound,
    #[error("workout not found")]
    WorkoutNotFound,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
