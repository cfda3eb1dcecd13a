use std::sync::Arc;

use storage::repository::{ExerciseRepository, NewWorkoutRecord, WorkoutRepository};
use tracing::{info, warn};
use trainer_core::model::{ExerciseId, Prescription, TrainerId, Workout, WorkoutDraft, WorkoutId};
use trainer_core::progress::{ExerciseMeta, lookup_from_exercises};

use crate::Clock;
use crate::error::WorkoutServiceError;

const LIST_LIMIT: u32 = 500;

/// A prescription joined with the exercise it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescribedExercise {
    pub prescription: Prescription,
    pub exercise: ExerciseMeta,
}

/// A template with its exercises in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutDetail {
    pub workout: Workout,
    pub exercises: Vec<PrescribedExercise>,
}

impl WorkoutDetail {
    #[must_use]
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.prescription.sets).sum()
    }
}

/// Workout template authoring and lookup.
#[derive(Clone)]
pub struct WorkoutService {
    clock: Clock,
    workouts: Arc<dyn WorkoutRepository>,
    exercises: Arc<dyn ExerciseRepository>,
}

impl WorkoutService {
    #[must_use]
    pub fn new(
        clock: Clock,
        workouts: Arc<dyn WorkoutRepository>,
        exercises: Arc<dyn ExerciseRepository>,
    ) -> Self {
        Self {
            clock,
            workouts,
            exercises,
        }
    }

    /// Validate a template and store it with all of its prescriptions.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::Workout` for validation failures.
    /// Returns `WorkoutServiceError::Storage` if persistence fails.
    pub async fn create_workout(
        &self,
        trainer_id: TrainerId,
        draft: WorkoutDraft,
    ) -> Result<WorkoutId, WorkoutServiceError> {
        let (workout, rows) = draft.validate(Some(trainer_id), self.clock.now())?;
        let exercise_count = rows.len();
        let id = self
            .workouts
            .insert_workout(NewWorkoutRecord::from_workout(&workout, rows))
            .await?;
        info!(workout = %id, trainer = %trainer_id, exercise_count, "workout template created");
        Ok(id)
    }

    /// Templates visible to the trainer, newest first.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn list_workouts(
        &self,
        trainer_id: TrainerId,
    ) -> Result<Vec<Workout>, WorkoutServiceError> {
        self.recent_workouts(trainer_id, LIST_LIMIT).await
    }

    /// # Errors
    ///
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn recent_workouts(
        &self,
        trainer_id: TrainerId,
        limit: u32,
    ) -> Result<Vec<Workout>, WorkoutServiceError> {
        Ok(self.workouts.list_workouts(Some(trainer_id), limit).await?)
    }

    /// Template plus prescriptions joined with exercise metadata.
    ///
    /// Exercises missing from the library are shown as `Unknown`.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::NotFound` if the template is missing or owned by
    /// another trainer.
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn get_workout_detail(
        &self,
        trainer_id: TrainerId,
        workout_id: WorkoutId,
    ) -> Result<WorkoutDetail, WorkoutServiceError> {
        let workout = self
            .workouts
            .get_workout(workout_id)
            .await?
            .filter(|w| w.trainer_id().is_none_or(|owner| owner == trainer_id))
            .ok_or(WorkoutServiceError::NotFound)?;

        let prescriptions = self.workouts.list_prescriptions(workout_id).await?;
        let ids: Vec<ExerciseId> = prescriptions.iter().map(|p| p.exercise_id).collect();
        let lookup = lookup_from_exercises(&self.exercises.get_exercises(&ids).await?);

        let exercises = prescriptions
            .into_iter()
            .map(|prescription| {
                let exercise = lookup.get(&prescription.exercise_id).cloned().unwrap_or_else(|| {
                    warn!(exercise = %prescription.exercise_id, "prescribed exercise missing from library");
                    ExerciseMeta::unknown()
                });
                PrescribedExercise {
                    prescription,
                    exercise,
                }
            })
            .collect();

        Ok(WorkoutDetail { workout, exercises })
    }
}
