use std::sync::Arc;

use storage::repository::{ExerciseRepository, NewExerciseRecord};
use tracing::info;
use trainer_core::model::{Exercise, ExerciseDraft, ExerciseFilter, ExerciseId};

use crate::error::ExerciseServiceError;

/// Read and extend the shared exercise library.
#[derive(Clone)]
pub struct ExerciseService {
    exercises: Arc<dyn ExerciseRepository>,
}

impl ExerciseService {
    #[must_use]
    pub fn new(exercises: Arc<dyn ExerciseRepository>) -> Self {
        Self { exercises }
    }

    /// Whole library, name ascending.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseServiceError::Storage` if repository access fails.
    pub async fn list_exercises(&self) -> Result<Vec<Exercise>, ExerciseServiceError> {
        Ok(self.exercises.list_exercises().await?)
    }

    /// Library narrowed by name query and muscle group, keeping library order.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseServiceError::Storage` if repository access fails.
    pub async fn search(
        &self,
        filter: &ExerciseFilter,
    ) -> Result<Vec<Exercise>, ExerciseServiceError> {
        let library = self.exercises.list_exercises().await?;
        Ok(library.into_iter().filter(|e| filter.matches(e)).collect())
    }

    /// # Errors
    ///
    /// Returns `ExerciseServiceError::Exercise` when the name is blank.
    /// Returns `ExerciseServiceError::Storage` if persistence fails.
    pub async fn add_exercise(
        &self,
        draft: ExerciseDraft,
    ) -> Result<ExerciseId, ExerciseServiceError> {
        let exercise = draft.validate(ExerciseId::new(0))?;
        let id = self
            .exercises
            .insert_exercise(NewExerciseRecord::from_exercise(&exercise))
            .await?;
        info!(exercise = %id, name = exercise.name(), "exercise added to library");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;
    use trainer_core::model::ALL_MUSCLES;

    fn draft(name: &str, group: &str) -> ExerciseDraft {
        ExerciseDraft {
            name: name.into(),
            muscle_group: group.into(),
            ..ExerciseDraft::default()
        }
    }

    #[tokio::test]
    async fn search_filters_library() {
        let svc = ExerciseService::new(Arc::new(InMemoryRepository::new()));
        for (name, group) in [("Lat Pulldown", "Back"), ("Bench Press", "Chest"), ("Row", "Back")] {
            svc.add_exercise(draft(name, group)).await.unwrap();
        }

        let back = svc.search(&ExerciseFilter::new("", "Back")).await.unwrap();
        let names: Vec<_> = back.iter().map(Exercise::name).collect();
        assert_eq!(names, vec!["Lat Pulldown", "Row"]);

        let all = svc
            .search(&ExerciseFilter::new("PRESS", ALL_MUSCLES))
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn add_rejects_blank_name() {
        let svc = ExerciseService::new(Arc::new(InMemoryRepository::new()));
        let err = svc.add_exercise(draft(" ", "Arms")).await.unwrap_err();
        assert!(matches!(err, ExerciseServiceError::Exercise(_)));
        assert!(svc.list_exercises().await.unwrap().is_empty());
    }
}
