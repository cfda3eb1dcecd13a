use services::WorkoutDetail;
use trainer_core::model::{
    DEFAULT_REPS, DEFAULT_REST_SECONDS, DEFAULT_SETS, Difficulty, ExerciseId, PrescriptionDraft,
    Workout, WorkoutDraft,
};

use crate::vm::markdown_vm::markdown_to_html;
use crate::vm::time_fmt::format_short_date;

/// CSS class of the difficulty pill.
#[must_use]
pub fn difficulty_badge_class(difficulty: Option<&Difficulty>) -> &'static str {
    match difficulty {
        Some(Difficulty::Beginner) => "badge badge-beginner",
        Some(Difficulty::Intermediate) => "badge badge-intermediate",
        Some(Difficulty::Advanced) => "badge badge-advanced",
        Some(Difficulty::Other(_)) | None => "badge",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkoutCardVm {
    pub id: u64,
    pub name: String,
    pub focus: Option<String>,
    pub duration: Option<String>,
    pub difficulty: Option<String>,
    pub difficulty_class: &'static str,
    pub created: String,
}

impl From<&Workout> for WorkoutCardVm {
    fn from(workout: &Workout) -> Self {
        Self {
            id: workout.id().value(),
            name: workout.name().to_owned(),
            focus: workout.focus().map(str::to_owned),
            duration: workout.duration().map(str::to_owned),
            difficulty: workout.difficulty().map(ToString::to_string),
            difficulty_class: difficulty_badge_class(workout.difficulty()),
            created: format_short_date(workout.created_at()),
        }
    }
}

#[must_use]
pub fn map_workout_cards(workouts: &[Workout]) -> Vec<WorkoutCardVm> {
    workouts.iter().map(WorkoutCardVm::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrescriptionRowVm {
    pub position: u32,
    pub name: String,
    pub muscle_group: Option<String>,
    pub sets: u32,
    pub reps: String,
    pub rest: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkoutDetailVm {
    pub card: WorkoutCardVm,
    pub notes_html: Option<String>,
    pub exercises: Vec<PrescriptionRowVm>,
    pub total_sets: u32,
}

#[must_use]
pub fn map_workout_detail(detail: &WorkoutDetail) -> WorkoutDetailVm {
    WorkoutDetailVm {
        card: WorkoutCardVm::from(&detail.workout),
        notes_html: detail.workout.notes().map(markdown_to_html),
        exercises: detail
            .exercises
            .iter()
            .map(|e| PrescriptionRowVm {
                position: e.prescription.order_index,
                name: e.exercise.name.clone(),
                muscle_group: e.exercise.muscle_group.clone(),
                sets: e.prescription.sets,
                reps: e.prescription.reps.clone(),
                rest: format!("{}s", e.prescription.rest_seconds),
            })
            .collect(),
        total_sets: detail.total_sets(),
    }
}

/// One exercise row in the template builder; numeric fields stay raw until submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuilderRow {
    pub exercise_id: ExerciseId,
    pub name: String,
    pub sets: String,
    pub reps: String,
    pub rest_seconds: String,
}

impl BuilderRow {
    #[must_use]
    pub fn new(exercise_id: ExerciseId, name: impl Into<String>) -> Self {
        Self {
            exercise_id,
            name: name.into(),
            sets: DEFAULT_SETS.to_string(),
            reps: DEFAULT_REPS.to_owned(),
            rest_seconds: DEFAULT_REST_SECONDS.to_string(),
        }
    }
}

/// Form state of the "new workout" page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkoutBuilderForm {
    pub name: String,
    pub focus: String,
    pub duration: String,
    pub difficulty: String,
    pub notes: String,
    pub rows: Vec<BuilderRow>,
}

impl WorkoutBuilderForm {
    /// Adds the exercise unless it is already in the template.
    pub fn add_exercise(&mut self, exercise_id: ExerciseId, name: &str) {
        if self.rows.iter().any(|r| r.exercise_id == exercise_id) {
            return;
        }
        self.rows.push(BuilderRow::new(exercise_id, name));
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.rows.len() {
            self.rows.remove(index);
        }
    }

    pub fn move_up(&mut self, index: usize) {
        if index > 0 && index < self.rows.len() {
            self.rows.swap(index - 1, index);
        }
    }

    /// Parse the numeric inputs into a draft.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message naming the first row with a non-numeric value.
    pub fn to_draft(&self) -> Result<WorkoutDraft, String> {
        let mut exercises = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let sets = row
                .sets
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("Sets for {} must be a whole number.", row.name))?;
            let rest_seconds = row
                .rest_seconds
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("Rest for {} must be a number of seconds.", row.name))?;
            exercises.push(PrescriptionDraft {
                exercise_id: row.exercise_id,
                sets,
                reps: row.reps.clone(),
                rest_seconds,
            });
        }
        Ok(WorkoutDraft {
            name: self.name.clone(),
            focus: self.focus.clone(),
            duration: self.duration.clone(),
            difficulty: self.difficulty.clone(),
            notes: self.notes.clone(),
            exercises,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_skips_duplicates_and_reorders() {
        let mut form = WorkoutBuilderForm::default();
        form.add_exercise(ExerciseId::new(1), "Squat");
        form.add_exercise(ExerciseId::new(2), "Bench");
        form.add_exercise(ExerciseId::new(1), "Squat");
        assert_eq!(form.rows.len(), 2);

        form.move_up(1);
        assert_eq!(form.rows[0].name, "Bench");
        form.remove(0);
        assert_eq!(form.rows[0].name, "Squat");
    }

    #[test]
    fn draft_reports_bad_numbers() {
        let mut form = WorkoutBuilderForm {
            name: "Legs".into(),
            ..WorkoutBuilderForm::default()
        };
        form.add_exercise(ExerciseId::new(1), "Squat");
        form.rows[0].sets = "three".into();
        assert_eq!(
            form.to_draft().unwrap_err(),
            "Sets for Squat must be a whole number."
        );

        form.rows[0].sets = " 4 ".into();
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.exercises[0].sets, 4);
        assert_eq!(draft.exercises[0].rest_seconds, 90);
    }

    #[test]
    fn badge_class_follows_difficulty() {
        assert_eq!(
            difficulty_badge_class(Some(&Difficulty::Advanced)),
            "badge badge-advanced"
        );
        assert_eq!(difficulty_badge_class(None), "badge");
    }
}
