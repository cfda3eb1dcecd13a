use std::sync::Arc;

use storage::repository::{ClientOrder, ClientRepository, StorageError, WorkoutRepository};
use trainer_core::model::{Client, TrainerId, Workout};

/// Rows shown in each dashboard card.
pub const DASHBOARD_LIMIT: u32 = 5;

/// Dashboard cards for one trainer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardOverview {
    pub recent_clients: Vec<Client>,
    pub recent_workouts: Vec<Workout>,
}

#[derive(Clone)]
pub struct DashboardService {
    clients: Arc<dyn ClientRepository>,
    workouts: Arc<dyn WorkoutRepository>,
}

impl DashboardService {
    #[must_use]
    pub fn new(clients: Arc<dyn ClientRepository>, workouts: Arc<dyn WorkoutRepository>) -> Self {
        Self { clients, workouts }
    }

    /// Newest clients and newest templates.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either fetch fails.
    pub async fn overview(&self, trainer_id: TrainerId) -> Result<DashboardOverview, StorageError> {
        let recent_clients = self
            .clients
            .list_clients(trainer_id, ClientOrder::NewestFirst, DASHBOARD_LIMIT)
            .await?;
        let recent_workouts = self
            .workouts
            .list_workouts(Some(trainer_id), DASHBOARD_LIMIT)
            .await?;
        Ok(DashboardOverview {
            recent_clients,
            recent_workouts,
        })
    }
}
