use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::client::non_blank;
use crate::model::difficulty::Difficulty;
use crate::model::ids::ExerciseId;

/// Muscle groups offered by the library filter, in display order.
pub const MUSCLE_GROUPS: [&str; 5] = ["Chest", "Back", "Legs", "Shoulders", "Arms"];

/// Label of the filter option that disables muscle-group filtering.
pub const ALL_MUSCLES: &str = "All muscles";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExerciseError {
    #[error("exercise name cannot be empty")]
    EmptyName,
}

/// One movement in the exercise library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    id: ExerciseId,
    name: String,
    muscle_group: Option<String>,
    equipment: Option<String>,
    difficulty: Option<Difficulty>,
}

impl Exercise {
    /// # Errors
    ///
    /// Returns `ExerciseError::EmptyName` if the trimmed name is empty.
    pub fn new(
        id: ExerciseId,
        name: impl Into<String>,
        muscle_group: Option<String>,
        equipment: Option<String>,
        difficulty: Option<Difficulty>,
    ) -> Result<Self, ExerciseError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(ExerciseError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            muscle_group: muscle_group.and_then(non_blank),
            equipment: equipment.and_then(non_blank),
            difficulty,
        })
    }

    #[must_use]
    pub fn id(&self) -> ExerciseId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn muscle_group(&self) -> Option<&str> {
        self.muscle_group.as_deref()
    }

    #[must_use]
    pub fn equipment(&self) -> Option<&str> {
        self.equipment.as_deref()
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<&Difficulty> {
        self.difficulty.as_ref()
    }
}

/// Raw form input for adding an exercise to the library.
///
/// Also the shape of one entry in a library import file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseDraft {
    pub name: String,
    pub muscle_group: String,
    pub equipment: String,
    pub difficulty: String,
}

impl ExerciseDraft {
    /// Validate the draft and bind it to an id.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseError::EmptyName` if the trimmed name is empty.
    pub fn validate(self, id: ExerciseId) -> Result<Exercise, ExerciseError> {
        Exercise::new(
            id,
            self.name,
            Some(self.muscle_group),
            Some(self.equipment),
            Difficulty::parse(&self.difficulty),
        )
    }
}

/// Client-side narrowing of the exercise library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseFilter {
    pub query: String,
    pub muscle_group: Option<String>,
}

impl ExerciseFilter {
    /// Build a filter from the raw select value; `All muscles` or blank disables the group filter.
    #[must_use]
    pub fn new(query: impl Into<String>, muscle_group: &str) -> Self {
        let group = muscle_group.trim();
        let muscle_group = if group.is_empty() || group.eq_ignore_ascii_case(ALL_MUSCLES) {
            None
        } else {
            Some(group.to_owned())
        };
        Self {
            query: query.into(),
            muscle_group,
        }
    }

    #[must_use]
    pub fn matches(&self, exercise: &Exercise) -> bool {
        let query = self.query.trim().to_lowercase();
        if !query.is_empty() && !exercise.name().to_lowercase().contains(&query) {
            return false;
        }
        match self.muscle_group.as_deref() {
            None => true,
            Some(group) => exercise
                .muscle_group()
                .is_some_and(|g| g.eq_ignore_ascii_case(group)),
        }
    }

    /// Applies the filter, preserving the input order.
    #[must_use]
    pub fn apply<'a>(&self, exercises: &'a [Exercise]) -> Vec<&'a Exercise> {
        exercises.iter().filter(|e| self.matches(e)).collect()
    }
}
