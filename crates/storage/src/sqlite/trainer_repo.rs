use trainer_core::model::{Trainer, TrainerId};

use super::SqliteRepository;
use super::mapping::{conn, id_i64, map_trainer_row, trainer_id_from_i64, write_err};
use crate::repository::{NewTrainerRecord, StorageError, TrainerRepository};

#[async_trait::async_trait]
impl TrainerRepository for SqliteRepository {
    async fn find_trainer_by_email(&self, email: &str) -> Result<Option<Trainer>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT id, user_ref, email, name, created_at
                FROM trainers
                WHERE email = ?1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_trainer_row).transpose()
    }

    async fn insert_trainer(&self, trainer: NewTrainerRecord) -> Result<Trainer, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO trainers (user_ref, email, name, created_at)
                VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(trainer.user_ref)
        .bind(&trainer.email)
        .bind(&trainer.name)
        .bind(trainer.created_at)
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        let id = trainer_id_from_i64(res.last_insert_rowid())?;
        Trainer::new(
            id,
            trainer.user_ref,
            trainer.email,
            trainer.name,
            trainer.created_at,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn get_trainer(&self, id: TrainerId) -> Result<Option<Trainer>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT id, user_ref, email, name, created_at
                FROM trainers
                WHERE id = ?1
            ",
        )
        .bind(id_i64("trainer_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_trainer_row).transpose()
    }
}
