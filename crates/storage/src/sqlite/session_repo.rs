use sqlx::Row;
use trainer_core::model::{ClientId, SessionId, SetLog, ValidSession, WorkoutSession};
use trainer_core::progress::{ExerciseLookup, ExerciseMeta};
use tracing::{info, warn};

use super::SqliteRepository;
use super::mapping::{
    conn, id_i64, map_session_row, map_set_log_row, ser, session_id_from_i64, write_err,
};
use crate::repository::{NewSetLogRecord, SessionRepository, SessionViewRows, StorageError};

#[async_trait::async_trait]
impl SessionRepository for SqliteRepository {
    async fn record_session(
        &self,
        session: ValidSession,
        sets: Vec<NewSetLogRecord>,
    ) -> Result<SessionId, StorageError> {
        let client_id = id_i64("client_id", session.client_id.value())?;
        let workout_id = id_i64("workout_id", session.workout_id.value())?;

        // Dropping the transaction without commit rolls back the session row.
        let mut tx = self.pool.begin().await.map_err(conn)?;

        let res = sqlx::query(
            r"
                INSERT INTO workout_sessions (
                    client_id, workout_id, started_at, completed_at, duration_minutes, notes
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(client_id)
        .bind(workout_id)
        .bind(session.started_at)
        .bind(session.completed_at)
        .bind(session.duration_minutes.map(i64::from))
        .bind(session.notes.as_deref())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            warn!(client_id, workout_id, error = %e, "session insert failed");
            write_err(e)
        })?;
        let session_id = res.last_insert_rowid();

        for set in &sets {
            let prescription_id = set
                .prescription_id
                .map(|p| id_i64("workout_exercise_id", p.value()))
                .transpose()?;

            sqlx::query(
                r"
                    INSERT INTO session_exercises (
                        session_id, exercise_id, workout_exercise_id,
                        set_number, reps_completed, weight_kg
                    )
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ",
            )
            .bind(session_id)
            .bind(id_i64("exercise_id", set.exercise_id.value())?)
            .bind(prescription_id)
            .bind(i64::from(set.set_number))
            .bind(set.reps_completed.map(i64::from))
            .bind(set.weight_kg)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                warn!(session_id, error = %e, "set log insert failed; rolling back session");
                write_err(e)
            })?;
        }

        tx.commit().await.map_err(conn)?;
        info!(session_id, client_id, sets = sets.len(), "recorded workout session");

        session_id_from_i64(session_id)
    }

    async fn get_session(&self, id: SessionId) -> Result<Option<WorkoutSession>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT id, client_id, workout_id, started_at, completed_at, duration_minutes, notes
                FROM workout_sessions
                WHERE id = ?1
            ",
        )
        .bind(id_i64("session_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_session_row).transpose()
    }

    async fn list_sessions_for_client(
        &self,
        client_id: ClientId,
    ) -> Result<Vec<WorkoutSession>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, client_id, workout_id, started_at, completed_at, duration_minutes, notes
                FROM workout_sessions
                WHERE client_id = ?1
                ORDER BY started_at DESC, id DESC
            ",
        )
        .bind(id_i64("client_id", client_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_session_row).collect()
    }

    async fn list_set_logs(&self, session_id: SessionId) -> Result<Vec<SetLog>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT session_id, exercise_id, workout_exercise_id,
                       set_number, reps_completed, weight_kg
                FROM session_exercises
                WHERE session_id = ?1
                ORDER BY id ASC
            ",
        )
        .bind(id_i64("session_id", session_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_set_log_row).collect()
    }

    async fn load_session_view(
        &self,
        session_id: SessionId,
    ) -> Result<Option<SessionViewRows>, StorageError> {
        // One row per set log, or a single row with NULL log columns for an empty session.
        let rows = sqlx::query(
            r"
                SELECT
                    s.id, s.client_id, s.workout_id, s.started_at, s.completed_at,
                    s.duration_minutes, s.notes,
                    c.name AS client_name,
                    w.name AS workout_name,
                    w.focus AS workout_focus,
                    l.id AS log_id,
                    l.session_id, l.exercise_id, l.workout_exercise_id,
                    l.set_number, l.reps_completed, l.weight_kg,
                    e.name AS exercise_name,
                    e.muscle_group AS exercise_muscle_group
                FROM workout_sessions s
                LEFT JOIN clients c ON c.id = s.client_id
                LEFT JOIN workouts w ON w.id = s.workout_id
                LEFT JOIN session_exercises l ON l.session_id = s.id
                LEFT JOIN exercises e ON e.id = l.exercise_id
                WHERE s.id = ?1
                ORDER BY l.id ASC
            ",
        )
        .bind(id_i64("session_id", session_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let Some(first) = rows.first() else {
            return Ok(None);
        };

        let session = map_session_row(first)?;
        let client_name = first.try_get("client_name").map_err(ser)?;
        let workout_name = first.try_get("workout_name").map_err(ser)?;
        let workout_focus = first.try_get("workout_focus").map_err(ser)?;

        let mut logs = Vec::with_capacity(rows.len());
        let mut lookup = ExerciseLookup::new();
        for row in &rows {
            if row.try_get::<Option<i64>, _>("log_id").map_err(ser)?.is_none() {
                continue;
            }
            let log = map_set_log_row(row)?;
            if let Some(name) = row.try_get::<Option<String>, _>("exercise_name").map_err(ser)? {
                let muscle_group = row.try_get("exercise_muscle_group").map_err(ser)?;
                lookup
                    .entry(log.exercise_id)
                    .or_insert(ExerciseMeta { name, muscle_group });
            }
            logs.push(log);
        }

        Ok(Some(SessionViewRows {
            session,
            client_name,
            workout_name,
            workout_focus,
            logs,
            lookup,
        }))
    }
}
