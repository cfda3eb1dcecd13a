use std::sync::Arc;

use services::{
    AppServices, ClientService, DashboardService, ExerciseService, ProgressService, WorkoutService,
};
use trainer_core::model::{Trainer, TrainerId};

/// What the composition root hands to the UI: the signed-in trainer and the services.
pub trait UiApp: Send + Sync {
    fn trainer(&self) -> &Trainer;

    fn clients(&self) -> Arc<ClientService>;
    fn exercises(&self) -> Arc<ExerciseService>;
    fn workouts(&self) -> Arc<WorkoutService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn dashboard(&self) -> Arc<DashboardService>;
}

impl UiApp for AppServices {
    fn trainer(&self) -> &Trainer {
        AppServices::trainer(self)
    }

    fn clients(&self) -> Arc<ClientService> {
        AppServices::clients(self)
    }

    fn exercises(&self) -> Arc<ExerciseService> {
        AppServices::exercises(self)
    }

    fn workouts(&self) -> Arc<WorkoutService> {
        AppServices::workouts(self)
    }

    fn progress(&self) -> Arc<ProgressService> {
        AppServices::progress(self)
    }

    fn dashboard(&self) -> Arc<DashboardService> {
        AppServices::dashboard(self)
    }
}

/// Root context shared by every view.
///
/// Identity travels here explicitly; views never look it up on their own.
#[derive(Clone)]
pub struct AppContext {
    trainer_id: TrainerId,
    trainer_name: String,

    clients: Arc<ClientService>,
    exercises: Arc<ExerciseService>,
    workouts: Arc<WorkoutService>,
    progress: Arc<ProgressService>,
    dashboard: Arc<DashboardService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let trainer = app.trainer();
        Self {
            trainer_id: trainer.id(),
            trainer_name: trainer.name().to_owned(),
            clients: app.clients(),
            exercises: app.exercises(),
            workouts: app.workouts(),
            progress: app.progress(),
            dashboard: app.dashboard(),
        }
    }

    #[must_use]
    pub fn trainer_id(&self) -> TrainerId {
        self.trainer_id
    }

    #[must_use]
    pub fn trainer_name(&self) -> &str {
        &self.trainer_name
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

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
