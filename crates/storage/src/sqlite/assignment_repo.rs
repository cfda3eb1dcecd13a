use chrono::{DateTime, Utc};
use trainer_core::model::{ClientId, ClientWorkout, WorkoutId};

use super::SqliteRepository;
use super::mapping::{conn, id_i64, map_assignment_row, write_err};
use crate::repository::{AssignmentRepository, StorageError};

#[async_trait::async_trait]
impl AssignmentRepository for SqliteRepository {
    async fn assign_workout(
        &self,
        client_id: ClientId,
        workout_id: WorkoutId,
        assigned_at: DateTime<Utc>,
    ) -> Result<ClientWorkout, StorageError> {
        sqlx::query(
            r"
                INSERT INTO client_workouts (client_id, workout_id, is_active, assigned_at)
                VALUES (?1, ?2, 1, ?3)
                ON CONFLICT(client_id, workout_id) DO UPDATE SET
                    is_active = 1,
                    assigned_at = excluded.assigned_at
            ",
        )
        .bind(id_i64("client_id", client_id.value())?)
        .bind(id_i64("workout_id", workout_id.value())?)
        .bind(assigned_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match write_err(e) {
            StorageError::Conflict => StorageError::NotFound,
            other => other,
        })?;

        Ok(ClientWorkout {
            client_id,
            workout_id,
            is_active: true,
            assigned_at,
        })
    }

    async fn unassign_workout(
        &self,
        client_id: ClientId,
        workout_id: WorkoutId,
    ) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
                UPDATE client_workouts
                SET is_active = 0
                WHERE client_id = ?1 AND workout_id = ?2
            ",
        )
        .bind(id_i64("client_id", client_id.value())?)
        .bind(id_i64("workout_id", workout_id.value())?)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn list_active_assignments(
        &self,
        client_id: ClientId,
    ) -> Result<Vec<ClientWorkout>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT client_id, workout_id, is_active, assigned_at
                FROM client_workouts
                WHERE client_id = ?1 AND is_active = 1
                ORDER BY assigned_at DESC, workout_id ASC
            ",
        )
        .bind(id_i64("client_id", client_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_assignment_row).collect()
    }
}
