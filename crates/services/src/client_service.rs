use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use storage::repository::{
    AssignmentRepository, ClientOrder, ClientRepository, StorageError, WorkoutRepository,
};
use tracing::info;
use trainer_core::model::{Client, ClientDraft, ClientId, TrainerId, Workout, WorkoutId};

use crate::Clock;
use crate::error::ClientServiceError;

/// Upper bound for "all clients" listings.
const LIST_LIMIT: u32 = 500;

/// A template currently assigned to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedWorkout {
    pub workout: Workout,
    pub assigned_at: DateTime<Utc>,
}

/// Client page: the client and their active templates, newest assignment first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientProfile {
    pub client: Client,
    pub workouts: Vec<AssignedWorkout>,
}

/// Client roster management, always scoped to one trainer.
#[derive(Clone)]
pub struct ClientService {
    clock: Clock,
    clients: Arc<dyn ClientRepository>,
    workouts: Arc<dyn WorkoutRepository>,
    assignments: Arc<dyn AssignmentRepository>,
}

impl ClientService {
    #[must_use]
    pub fn new(
        clock: Clock,
        clients: Arc<dyn ClientRepository>,
        workouts: Arc<dyn WorkoutRepository>,
        assignments: Arc<dyn AssignmentRepository>,
    ) -> Self {
        Self {
            clock,
            clients,
            workouts,
            assignments,
        }
    }

    /// Validate and store a new client for `trainer_id`.
    ///
    /// # Errors
    ///
    /// Returns `ClientServiceError::Client` when the name is blank.
    /// Returns `ClientServiceError::Storage` if persistence fails.
    pub async fn add_client(
        &self,
        trainer_id: TrainerId,
        draft: ClientDraft,
    ) -> Result<Client, ClientServiceError> {
        let fields = draft.validate()?;
        let client = self
            .clients
            .insert_client(trainer_id, fields, self.clock.now())
            .await?;
        info!(client = %client.id(), trainer = %trainer_id, "client added");
        Ok(client)
    }

    /// All clients of a trainer, alphabetical.
    ///
    /// # Errors
    ///
    /// Returns `ClientServiceError::Storage` if repository access fails.
    pub async fn list_clients(
        &self,
        trainer_id: TrainerId,
    ) -> Result<Vec<Client>, ClientServiceError> {
        let clients = self
            .clients
            .list_clients(trainer_id, ClientOrder::NameAsc, LIST_LIMIT)
            .await?;
        Ok(clients)
    }

    /// Most recently added clients first.
    ///
    /// # Errors
    ///
    /// Returns `ClientServiceError::Storage` if repository access fails.
    pub async fn recent_clients(
        &self,
        trainer_id: TrainerId,
        limit: u32,
    ) -> Result<Vec<Client>, ClientServiceError> {
        let clients = self
            .clients
            .list_clients(trainer_id, ClientOrder::NewestFirst, limit)
            .await?;
        Ok(clients)
    }

    /// Fetch a client owned by `trainer_id`.
    ///
    /// # Errors
    ///
    /// Returns `ClientServiceError::NotFound` if the client is missing or belongs to
    /// another trainer.
    pub async fn get_client(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
    ) -> Result<Client, ClientServiceError> {
        self.clients
            .get_client(client_id)
            .await?
            .filter(|c| c.trainer_id() == trainer_id)
            .ok_or(ClientServiceError::NotFound)
    }

    /// Client plus active assignments, newest assignment first.
    ///
    /// Assignments whose template no longer exists are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ClientServiceError::NotFound` if the client is not visible to the trainer.
    /// Returns `ClientServiceError::Storage` if repository access fails.
    pub async fn get_profile(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
    ) -> Result<ClientProfile, ClientServiceError> {
        let client = self.get_client(trainer_id, client_id).await?;
        let active = self.assignments.list_active_assignments(client_id).await?;

        let ids: Vec<WorkoutId> = active.iter().map(|a| a.workout_id).collect();
        let mut by_id: HashMap<WorkoutId, Workout> = self
            .workouts
            .get_workouts(&ids)
            .await?
            .into_iter()
            .map(|w| (w.id(), w))
            .collect();

        let workouts = active
            .into_iter()
            .filter_map(|a| {
                by_id.remove(&a.workout_id).map(|workout| AssignedWorkout {
                    workout,
                    assigned_at: a.assigned_at,
                })
            })
            .collect();

        Ok(ClientProfile { client, workouts })
    }

    /// Replace the editable fields of a client.
    ///
    /// # Errors
    ///
    /// Returns `ClientServiceError::NotFound` if the client is not visible to the trainer.
    /// Returns `ClientServiceError::Client` when the new name is blank.
    pub async fn update_client(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
        draft: ClientDraft,
    ) -> Result<Client, ClientServiceError> {
        let existing = self.get_client(trainer_id, client_id).await?;
        let updated = existing.with_fields(draft.validate()?);
        self.clients.update_client(&updated).await.map_err(not_found)?;
        Ok(updated)
    }

    /// Delete a client and everything logged for them.
    ///
    /// # Errors
    ///
    /// Returns `ClientServiceError::NotFound` if the client is not visible to the trainer.
    pub async fn delete_client(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
    ) -> Result<(), ClientServiceError> {
        self.get_client(trainer_id, client_id).await?;
        self.clients.delete_client(client_id).await.map_err(not_found)?;
        info!(client = %client_id, "client deleted");
        Ok(())
    }

    /// Assign a template to a client, re-activating an earlier assignment.
    ///
    /// # Errors
    ///
    /// Returns `ClientServiceError::NotFound` if the client or template is missing.
    pub async fn assign_workout(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
        workout_id: WorkoutId,
    ) -> Result<(), ClientServiceError> {
        self.get_client(trainer_id, client_id).await?;
        self.assignments
            .assign_workout(client_id, workout_id, self.clock.now())
            .await
            .map_err(not_found)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ClientServiceError::NotFound` if the client or assignment is missing.
    pub async fn unassign_workout(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
        workout_id: WorkoutId,
    ) -> Result<(), ClientServiceError> {
        self.get_client(trainer_id, client_id).await?;
        self.assignments
            .unassign_workout(client_id, workout_id)
            .await
            .map_err(not_found)?;
        Ok(())
    }
}

fn not_found(err: StorageError) -> ClientServiceError {
    match err {
        StorageError::NotFound => ClientServiceError::NotFound,
        other => ClientServiceError::Storage(other),
    }
}
