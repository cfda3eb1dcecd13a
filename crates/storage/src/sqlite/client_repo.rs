use chrono::{DateTime, Utc};
use trainer_core::model::{Client, ClientId, TrainerId, ValidClient};

use super::SqliteRepository;
use super::mapping::{client_id_from_i64, conn, id_i64, map_client_row, write_err};
use crate::repository::{ClientOrder, ClientRepository, StorageError};

#[async_trait::async_trait]
impl ClientRepository for SqliteRepository {
    async fn insert_client(
        &self,
        trainer_id: TrainerId,
        fields: ValidClient,
        created_at: DateTime<Utc>,
    ) -> Result<Client, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO clients (trainer_id, name, email, phone, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(id_i64("trainer_id", trainer_id.value())?)
        .bind(&fields.name)
        .bind(fields.email.as_deref())
        .bind(fields.phone.as_deref())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        let id = client_id_from_i64(res.last_insert_rowid())?;
        Ok(Client::from_valid(id, trainer_id, fields, created_at))
    }

    async fn get_client(&self, id: ClientId) -> Result<Option<Client>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT id, trainer_id, name, email, phone, created_at
                FROM clients
                WHERE id = ?1
            ",
        )
        .bind(id_i64("client_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_client_row).transpose()
    }

    async fn list_clients(
        &self,
        trainer_id: TrainerId,
        order: ClientOrder,
        limit: u32,
    ) -> Result<Vec<Client>, StorageError> {
        let order_by = match order {
            ClientOrder::NameAsc => "name ASC, id ASC",
            ClientOrder::NewestFirst => "created_at DESC, id DESC",
        };
        let sql = format!(
            r"
                SELECT id, trainer_id, name, email, phone, created_at
                FROM clients
                WHERE trainer_id = ?1
                ORDER BY {order_by}
                LIMIT ?2
            "
        );

        let rows = sqlx::query(&sql)
            .bind(id_i64("trainer_id", trainer_id.value())?)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        rows.iter().map(map_client_row).collect()
    }

    async fn update_client(&self, client: &Client) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
                UPDATE clients
                SET name = ?2, email = ?3, phone = ?4
                WHERE id = ?1
            ",
        )
        .bind(id_i64("client_id", client.id().value())?)
        .bind(client.name())
        .bind(client.email())
        .bind(client.phone())
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete_client(&self, id: ClientId) -> Result<(), StorageError> {
        // assignments, sessions, and set logs go with it via ON DELETE CASCADE
        let res = sqlx::query("DELETE FROM clients WHERE id = ?1")
            .bind(id_i64("client_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
