use trainer_core::model::{ALL_MUSCLES, Exercise, ExerciseDraft, ExerciseFilter, MUSCLE_GROUPS};

use crate::vm::workout_vm::difficulty_badge_class;

/// Options for the muscle-group select, "All muscles" first.
#[must_use]
pub fn muscle_group_options() -> Vec<&'static str> {
    std::iter::once(ALL_MUSCLES)
        .chain(MUSCLE_GROUPS.iter().copied())
        .collect()
}

/// Search box and muscle-group select of the library page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseFilterState {
    pub query: String,
    pub muscle_group: String,
}

impl Default for ExerciseFilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            muscle_group: ALL_MUSCLES.to_owned(),
        }
    }
}

impl ExerciseFilterState {
    #[must_use]
    pub fn to_filter(&self) -> ExerciseFilter {
        ExerciseFilter::new(self.query.clone(), &self.muscle_group)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseRowVm {
    pub id: u64,
    pub name: String,
    pub muscle_group: Option<String>,
    pub equipment: Option<String>,
    pub difficulty: Option<String>,
    pub difficulty_class: &'static str,
}

impl From<&Exercise> for ExerciseRowVm {
    fn from(exercise: &Exercise) -> Self {
        Self {
            id: exercise.id().value(),
            name: exercise.name().to_owned(),
            muscle_group: exercise.muscle_group().map(str::to_owned),
            equipment: exercise.equipment().map(str::to_owned),
            difficulty: exercise.difficulty().map(ToString::to_string),
            difficulty_class: difficulty_badge_class(exercise.difficulty()),
        }
    }
}

/// Apply the filter and map the surviving rows, keeping library order.
#[must_use]
pub fn filter_exercise_rows(library: &[Exercise], state: &ExerciseFilterState) -> Vec<ExerciseRowVm> {
    state
        .to_filter()
        .apply(library)
        .into_iter()
        .map(ExerciseRowVm::from)
        .collect()
}

/// Fields of the "add exercise" form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExerciseForm {
    pub name: String,
    pub muscle_group: String,
    pub equipment: String,
    pub difficulty: String,
}

impl ExerciseForm {
    #[must_use]
    pub fn to_draft(&self) -> ExerciseDraft {
        ExerciseDraft {
            name: self.name.clone(),
            muscle_group: self.muscle_group.clone(),
            equipment: self.equipment.clone(),
            difficulty: self.difficulty.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trainer_core::model::ExerciseId;

    fn library() -> Vec<Exercise> {
        [("Bench Press", "Chest"), ("Row", "Back"), ("Push-Up", "Chest")]
            .into_iter()
            .enumerate()
            .map(|(i, (name, group))| {
                ExerciseDraft {
                    name: name.into(),
                    muscle_group: group.into(),
                    ..ExerciseDraft::default()
                }
                .validate(ExerciseId::new(i as u64 + 1))
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn default_state_shows_everything() {
        let rows = filter_exercise_rows(&library(), &ExerciseFilterState::default());
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn query_and_group_combine() {
        let state = ExerciseFilterState {
            query: "pu".into(),
            muscle_group: "Chest".into(),
        };
        let rows = filter_exercise_rows(&library(), &state);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Push-Up"]);
    }

    #[test]
    fn options_start_with_all() {
        let options = muscle_group_options();
        assert_eq!(options[0], "All muscles");
        assert_eq!(options.len(), 6);
    }
}
