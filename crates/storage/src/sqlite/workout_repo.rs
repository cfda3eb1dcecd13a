use trainer_core::model::{Prescription, TrainerId, Workout, WorkoutId};
use tracing::debug;

use super::SqliteRepository;
use super::mapping::{
    conn, difficulty_to_text, id_i64, map_prescription_row, map_workout_row, placeholders,
    workout_id_from_i64, write_err,
};
use crate::repository::{NewWorkoutRecord, StorageError, WorkoutRepository};

const WORKOUT_COLUMNS: &str =
    "id, trainer_id, name, focus, duration, difficulty, notes, created_at";

#[async_trait::async_trait]
impl WorkoutRepository for SqliteRepository {
    async fn insert_workout(&self, workout: NewWorkoutRecord) -> Result<WorkoutId, StorageError> {
        let trainer_id = workout
            .trainer_id
            .map(|t| id_i64("trainer_id", t.value()))
            .transpose()?;

        let mut tx = self.pool.begin().await.map_err(conn)?;

        let res = sqlx::query(
            r"
                INSERT INTO workouts (trainer_id, name, focus, duration, difficulty, notes, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(trainer_id)
        .bind(&workout.name)
        .bind(workout.focus.as_deref())
        .bind(workout.duration.as_deref())
        .bind(difficulty_to_text(workout.difficulty.as_ref()))
        .bind(workout.notes.as_deref())
        .bind(workout.created_at)
        .execute(&mut *tx)
        .await
        .map_err(write_err)?;
        let workout_id = res.last_insert_rowid();

        for row in &workout.prescriptions {
            sqlx::query(
                r"
                    INSERT INTO workout_exercises (
                        workout_id, exercise_id, order_index, sets, reps, rest_seconds
                    )
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ",
            )
            .bind(workout_id)
            .bind(id_i64("exercise_id", row.exercise_id.value())?)
            .bind(i64::from(row.order_index))
            .bind(i64::from(row.sets))
            .bind(&row.reps)
            .bind(i64::from(row.rest_seconds))
            .execute(&mut *tx)
            .await
            .map_err(write_err)?;
        }

        tx.commit().await.map_err(conn)?;
        debug!(
            workout_id,
            prescriptions = workout.prescriptions.len(),
            "inserted workout template"
        );

        workout_id_from_i64(workout_id)
    }

    async fn get_workout(&self, id: WorkoutId) -> Result<Option<Workout>, StorageError> {
        let sql = format!("SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = ?1");
        let row = sqlx::query(&sql)
            .bind(id_i64("workout_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.as_ref().map(map_workout_row).transpose()
    }

    async fn get_workouts(&self, ids: &[WorkoutId]) -> Result<Vec<Workout>, StorageError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id IN ({}) ORDER BY id ASC",
            placeholders(1, ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id_i64("workout_id", id.value())?);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(conn)?;
        rows.iter().map(map_workout_row).collect()
    }

    async fn list_workouts(
        &self,
        trainer_id: Option<TrainerId>,
        limit: u32,
    ) -> Result<Vec<Workout>, StorageError> {
        let rows = match trainer_id {
            Some(trainer) => {
                let sql = format!(
                    r"
                        SELECT {WORKOUT_COLUMNS}
                        FROM workouts
                        WHERE trainer_id = ?1 OR trainer_id IS NULL
                        ORDER BY created_at DESC, id DESC
                        LIMIT ?2
                    "
                );
                sqlx::query(&sql)
                    .bind(id_i64("trainer_id", trainer.value())?)
                    .bind(i64::from(limit))
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    r"
                        SELECT {WORKOUT_COLUMNS}
                        FROM workouts
                        ORDER BY created_at DESC, id DESC
                        LIMIT ?1
                    "
                );
                sqlx::query(&sql)
                    .bind(i64::from(limit))
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(conn)?;

        rows.iter().map(map_workout_row).collect()
    }

    async fn list_prescriptions(
        &self,
        workout_id: WorkoutId,
    ) -> Result<Vec<Prescription>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, workout_id, exercise_id, order_index, sets, reps, rest_seconds
                FROM workout_exercises
                WHERE workout_id = ?1
                ORDER BY order_index ASC, id ASC
            ",
        )
        .bind(id_i64("workout_id", workout_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_prescription_row).collect()
    }
}
