use std::sync::Arc;

use storage::repository::Storage;
use trainer_core::model::Trainer;

use crate::Clock;
use crate::client_service::ClientService;
use crate::dashboard_service::DashboardService;
use crate::error::AppServicesError;
use crate::exercise_service::ExerciseService;
use crate::identity_service::{IdentityService, TrainerIdentity};
use crate::progress_service::ProgressService;
use crate::workout_service::WorkoutService;

/// Assembles app-facing services over one storage handle for one signed-in trainer.
#[derive(Clone)]
pub struct AppServices {
    trainer: Trainer,
    clients: Arc<ClientService>,
    exercises: Arc<ExerciseService>,
    workouts: Arc<WorkoutService>,
    progress: Arc<ProgressService>,
    dashboard: Arc<DashboardService>,
}

impl AppServices {
    /// Resolve `identity` and build every service over `storage`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Identity` if the trainer cannot be resolved.
    pub async fn new(
        storage: &Storage,
        clock: Clock,
        identity: &TrainerIdentity,
    ) -> Result<Self, AppServicesError> {
        let trainer = IdentityService::new(clock, Arc::clone(&storage.trainers))
            .resolve(identity)
            .await?;

        let clients = Arc::new(ClientService::new(
            clock,
            Arc::clone(&storage.clients),
            Arc::clone(&storage.workouts),
            Arc::clone(&storage.assignments),
        ));
        let exercises = Arc::new(ExerciseService::new(Arc::clone(&storage.exercises)));
        let workouts = Arc::new(WorkoutService::new(
            clock,
            Arc::clone(&storage.workouts),
            Arc::clone(&storage.exercises),
        ));
        let progress = Arc::new(ProgressService::new(
            clock,
            Arc::clone(&storage.clients),
            Arc::clone(&storage.workouts),
            Arc::clone(&storage.exercises),
            Arc::clone(&storage.sessions),
        ));
        let dashboard = Arc::new(DashboardService::new(
            Arc::clone(&storage.clients),
            Arc::clone(&storage.workouts),
        ));

        Ok(Self {
            trainer,
            clients,
            exercises,
            workouts,
            progress,
            dashboard,
        })
    }

    /// Build services backed by `SQLite` storage, migrating the schema first.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or identity resolution fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        identity: &TrainerIdentity,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::new(&storage, clock, identity).await
    }

    #[must_use]
    pub fn trainer(&self) -> &Trainer {
        &self.trainer
    }

    #[must_use]
    pub fn clients(&self) -> Arc<ClientService> {
        Arc::clone(&self.clients)
    }

    #[must_use]
    pub fn exercises(&self) -> Arc<ExerciseService> {
        Arc::clone(&self.exercises)
    }

    #[must_use]
    pub fn workouts(&self) -> Arc<WorkoutService> {
        Arc::clone(&self.workouts)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }
}
