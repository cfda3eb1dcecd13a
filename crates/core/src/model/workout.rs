use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::client::non_blank;
use crate::model::difficulty::Difficulty;
use crate::model::ids::{ClientId, ExerciseId, TrainerId, WorkoutExerciseId, WorkoutId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WorkoutError {
    #[error("Workout name is required.")]
    EmptyName,

    #[error("Add at least one exercise to the workout.")]
    NoExercises,

    #[error("exercise #{position} must prescribe at least one set")]
    ZeroSets { position: usize },
}

//
// ─── DEFAULTS ──────────────────────────────────────────────────────────────────
//

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPS: &str = "8–12";
pub const DEFAULT_REST_SECONDS: u32 = 90;

//
// ─── WORKOUT TEMPLATE ──────────────────────────────────────────────────────────
//

/// A named, reusable workout template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workout {
    id: WorkoutId,
    trainer_id: Option<TrainerId>,
    name: String,
    focus: Option<String>,
    duration: Option<String>,
    difficulty: Option<Difficulty>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl Workout {
    /// # Errors
    ///
    /// Returns `WorkoutError::EmptyName` if the trimmed name is empty.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: WorkoutId,
        trainer_id: Option<TrainerId>,
        name: impl Into<String>,
        focus: Option<String>,
        duration: Option<String>,
        difficulty: Option<Difficulty>,
        notes: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, WorkoutError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(WorkoutError::EmptyName);
        }
        Ok(Self {
            id,
            trainer_id,
            name,
            focus: focus.and_then(non_blank),
            duration: duration.and_then(non_blank),
            difficulty,
            notes: notes.and_then(non_blank),
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> WorkoutId {
        self.id
    }

    #[must_use]
    pub fn trainer_id(&self) -> Option<TrainerId> {
        self.trainer_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    #[must_use]
    pub fn duration(&self) -> Option<&str> {
        self.duration.as_deref()
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<&Difficulty> {
        self.difficulty.as_ref()
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// One prescribed exercise inside a workout template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prescription {
    pub id: WorkoutExerciseId,
    pub workout_id: WorkoutId,
    pub exercise_id: ExerciseId,
    /// 1-based position within the template.
    pub order_index: u32,
    pub sets: u32,
    pub reps: String,
    pub rest_seconds: u32,
}

//
// ─── DRAFTS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionDraft {
    pub exercise_id: ExerciseId,
    pub sets: u32,
    pub reps: String,
    pub rest_seconds: u32,
}

impl PrescriptionDraft {
    /// A fresh row for the builder, using the house defaults.
    #[must_use]
    pub fn for_exercise(exercise_id: ExerciseId) -> Self {
        Self {
            exercise_id,
            sets: DEFAULT_SETS,
            reps: DEFAULT_REPS.to_owned(),
            rest_seconds: DEFAULT_REST_SECONDS,
        }
    }
}

/// Prescription fields that passed validation, ordered and numbered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPrescription {
    pub exercise_id: ExerciseId,
    pub order_index: u32,
    pub sets: u32,
    pub reps: String,
    pub rest_seconds: u32,
}

/// Raw builder state for a new workout template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutDraft {
    pub name: String,
    pub focus: String,
    pub duration: String,
    pub difficulty: String,
    pub notes: String,
    pub exercises: Vec<PrescriptionDraft>,
}

impl WorkoutDraft {
    /// Validate the template and number its exercises 1..=n in list order.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutError::EmptyName`, `WorkoutError::NoExercises`, or
    /// `WorkoutError::ZeroSets` for the first offending row.
    pub fn validate(
        self,
        trainer_id: Option<TrainerId>,
        now: DateTime<Utc>,
    ) -> Result<(Workout, Vec<ValidPrescription>), WorkoutError> {
        let workout = Workout::new(
            WorkoutId::new(0),
            trainer_id,
            self.name,
            Some(self.focus),
            Some(self.duration),
            Difficulty::parse(&self.difficulty),
            Some(self.notes),
            now,
        )?;
        if self.exercises.is_empty() {
            return Err(WorkoutError::NoExercises);
        }

        let mut rows = Vec::with_capacity(self.exercises.len());
        for (index, draft) in self.exercises.into_iter().enumerate() {
            let position = index + 1;
            if draft.sets == 0 {
                return Err(WorkoutError::ZeroSets { position });
            }
            let reps = draft.reps.trim();
            rows.push(ValidPrescription {
                exercise_id: draft.exercise_id,
                order_index: u32::try_from(position).unwrap_or(u32::MAX),
                sets: draft.sets,
                reps: if reps.is_empty() {
                    DEFAULT_REPS.to_owned()
                } else {
                    reps.to_owned()
                },
                rest_seconds: draft.rest_seconds,
            });
        }
        Ok((workout, rows))
    }
}

//
// ─── ASSIGNMENTS ───────────────────────────────────────────────────────────────
//

/// Link between a client and a workout template they should follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientWorkout {
    pub client_id: ClientId,
    pub workout_id: WorkoutId,
    pub is_active: bool,
    pub assigned_at: DateTime<Utc>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn draft_with(exercises: Vec<PrescriptionDraft>) -> WorkoutDraft {
        WorkoutDraft {
            name: "Push Day".into(),
            focus: "Chest & triceps".into(),
            difficulty: "intermediate".into(),
            exercises,
            ..WorkoutDraft::default()
        }
    }

    #[test]
    fn validate_numbers_exercises_in_list_order() {
        let draft = draft_with(vec![
            PrescriptionDraft::for_exercise(ExerciseId::new(7)),
            PrescriptionDraft::for_exercise(ExerciseId::new(2)),
        ]);
        let (workout, rows) = draft.validate(None, fixed_now()).unwrap();
        assert_eq!(workout.name(), "Push Day");
        assert_eq!(workout.difficulty(), Some(&Difficulty::Intermediate));
        assert_eq!(workout.duration(), None);
        assert_eq!(rows[0].exercise_id, ExerciseId::new(7));
        assert_eq!(rows[0].order_index, 1);
        assert_eq!(rows[1].order_index, 2);
        assert_eq!(rows[1].reps, DEFAULT_REPS);
        assert_eq!(rows[1].rest_seconds, DEFAULT_REST_SECONDS);
    }

    #[test]
    fn validate_requires_name_before_exercises() {
        let mut draft = draft_with(Vec::new());
        draft.name = "  ".into();
        assert_eq!(
            draft.validate(None, fixed_now()).unwrap_err(),
            WorkoutError::EmptyName
        );
    }

    #[test]
    fn validate_requires_exercises() {
        let err = draft_with(Vec::new())
            .validate(None, fixed_now())
            .unwrap_err();
        assert_eq!(err, WorkoutError::NoExercises);
    }

    #[test]
    fn validate_rejects_zero_sets() {
        let mut row = PrescriptionDraft::for_exercise(ExerciseId::new(1));
        row.sets = 0;
        let err = draft_with(vec![PrescriptionDraft::for_exercise(ExerciseId::new(4)), row])
            .validate(None, fixed_now())
            .unwrap_err();
        assert_eq!(err, WorkoutError::ZeroSets { position: 2 });
    }

    #[test]
    fn blank_reps_fall_back_to_default() {
        let mut row = PrescriptionDraft::for_exercise(ExerciseId::new(1));
        row.reps = "  ".into();
        let (_, rows) = draft_with(vec![row]).validate(None, fixed_now()).unwrap();
        assert_eq!(rows[0].reps, DEFAULT_REPS);
    }
}
