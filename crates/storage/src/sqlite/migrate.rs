use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::SqliteInitError;

const SCHEMA_V1: &[&str] = &[
    r"
        CREATE TABLE IF NOT EXISTS trainers (
            id INTEGER PRIMARY KEY,
            user_ref BLOB NOT NULL,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS clients (
            id INTEGER PRIMARY KEY,
            trainer_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            created_at TEXT NOT NULL,
            FOREIGN KEY (trainer_id) REFERENCES trainers(id) ON DELETE CASCADE
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS exercises (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            muscle_group TEXT,
            equipment TEXT,
            difficulty TEXT
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS workouts (
            id INTEGER PRIMARY KEY,
            trainer_id INTEGER,
            name TEXT NOT NULL,
            focus TEXT,
            duration TEXT,
            difficulty TEXT,
            notes TEXT,
            created_at TEXT NOT NULL,
            FOREIGN KEY (trainer_id) REFERENCES trainers(id) ON DELETE SET NULL
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS workout_exercises (
            id INTEGER PRIMARY KEY,
            workout_id INTEGER NOT NULL,
            exercise_id INTEGER NOT NULL,
            order_index INTEGER NOT NULL CHECK (order_index >= 1),
            sets INTEGER NOT NULL CHECK (sets >= 1),
            reps TEXT NOT NULL,
            rest_seconds INTEGER NOT NULL CHECK (rest_seconds >= 0),
            FOREIGN KEY (workout_id) REFERENCES workouts(id) ON DELETE CASCADE,
            FOREIGN KEY (exercise_id) REFERENCES exercises(id)
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS client_workouts (
            client_id INTEGER NOT NULL,
            workout_id INTEGER NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1 CHECK (is_active IN (0, 1)),
            assigned_at TEXT NOT NULL,
            PRIMARY KEY (client_id, workout_id),
            FOREIGN KEY (client_id) REFERENCES clients(id) ON DELETE CASCADE,
            FOREIGN KEY (workout_id) REFERENCES workouts(id) ON DELETE CASCADE
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS workout_sessions (
            id INTEGER PRIMARY KEY,
            client_id INTEGER NOT NULL,
            workout_id INTEGER NOT NULL,
            started_at TEXT NOT NULL,
            completed_at TEXT,
            duration_minutes INTEGER CHECK (duration_minutes >= 0),
            notes TEXT,
            FOREIGN KEY (client_id) REFERENCES clients(id) ON DELETE CASCADE,
            FOREIGN KEY (workout_id) REFERENCES workouts(id)
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS session_exercises (
            id INTEGER PRIMARY KEY,
            session_id INTEGER NOT NULL,
            exercise_id INTEGER NOT NULL,
            workout_exercise_id INTEGER,
            set_number INTEGER NOT NULL,
            reps_completed INTEGER CHECK (reps_completed >= 0),
            weight_kg REAL,
            FOREIGN KEY (session_id) REFERENCES workout_sessions(id) ON DELETE CASCADE,
            FOREIGN KEY (exercise_id) REFERENCES exercises(id),
            FOREIGN KEY (workout_exercise_id) REFERENCES workout_exercises(id) ON DELETE SET NULL
        );
    ",
    r"
        CREATE INDEX IF NOT EXISTS idx_clients_trainer_created
            ON clients (trainer_id, created_at);
    ",
    r"
        CREATE INDEX IF NOT EXISTS idx_workout_exercises_workout_order
            ON workout_exercises (workout_id, order_index);
    ",
    r"
        CREATE INDEX IF NOT EXISTS idx_sessions_client_started
            ON workout_sessions (client_id, started_at);
    ",
    r"
        CREATE INDEX IF NOT EXISTS idx_session_exercises_session
            ON session_exercises (session_id, id);
    ",
];

/// Runs every pending schema version, each inside its own transaction.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    // Version 1: trainers, clients, library, templates, assignments, sessions.
    if is_applied(pool, 1).await? {
        debug!(version = 1, "schema already applied");
    } else {
        let mut tx = pool.begin().await?;

        for statement in SCHEMA_V1 {
            sqlx::query(*statement).execute(&mut *tx).await?;
        }

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(version = 1, "applied schema migration");
    }

    Ok(())
}
