mod client;
mod difficulty;
mod exercise;
mod ids;
mod session;
mod trainer;
mod workout;

pub use ids::{ClientId, ExerciseId, ParseIdError, SessionId, TrainerId, WorkoutExerciseId, WorkoutId};

pub use client::{Client, ClientDraft, ClientError, ValidClient};
pub use difficulty::Difficulty;
pub use exercise::{ALL_MUSCLES, Exercise, ExerciseDraft, ExerciseError, ExerciseFilter, MUSCLE_GROUPS};
pub use session::{SessionDraft, SessionError, SessionStatus, SetLog, ValidSession, WorkoutSession};
pub use trainer::{Trainer, TrainerError, normalize_email};
pub use workout::{
    ClientWorkout, DEFAULT_REPS, DEFAULT_REST_SECONDS, DEFAULT_SETS, Prescription,
    PrescriptionDraft, ValidPrescription, Workout, WorkoutDraft, WorkoutError,
};
