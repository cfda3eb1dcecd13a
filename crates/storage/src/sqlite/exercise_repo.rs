use trainer_core::model::{Exercise, ExerciseId};

use super::SqliteRepository;
use super::mapping::{
    conn, difficulty_to_text, exercise_id_from_i64, id_i64, map_exercise_row, placeholders,
    write_err,
};
use crate::repository::{ExerciseRepository, NewExerciseRecord, StorageError};

#[async_trait::async_trait]
impl ExerciseRepository for SqliteRepository {
    async fn insert_exercise(&self, exercise: NewExerciseRecord) -> Result<ExerciseId, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO exercises (name, muscle_group, equipment, difficulty)
                VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(exercise.name)
        .bind(exercise.muscle_group)
        .bind(exercise.equipment)
        .bind(difficulty_to_text(exercise.difficulty.as_ref()))
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        exercise_id_from_i64(res.last_insert_rowid())
    }

    async fn list_exercises(&self) -> Result<Vec<Exercise>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, name, muscle_group, equipment, difficulty
                FROM exercises
                ORDER BY name ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_exercise_row).collect()
    }

    async fn get_exercises(&self, ids: &[ExerciseId]) -> Result<Vec<Exercise>, StorageError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            r"
                SELECT id, name, muscle_group, equipment, difficulty
                FROM exercises
                WHERE id IN ({})
                ORDER BY id ASC
            ",
            placeholders(1, ids.len())
        );

        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id_i64("exercise_id", id.value())?);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(conn)?;
        rows.iter().map(map_exercise_row).collect()
    }
}
