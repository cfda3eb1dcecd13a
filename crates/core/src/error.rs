use thiserror::Error;

use crate::model::{ClientError, ExerciseError, SessionError, TrainerError, WorkoutError};

/// Umbrella for every domain validation failure.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Trainer(#[from] TrainerError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Exercise(#[from] ExerciseError),
    #[error(transparent)]
    Workout(#[from] WorkoutError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
