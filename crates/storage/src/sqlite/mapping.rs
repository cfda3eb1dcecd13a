use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use trainer_core::model::{
    Client, ClientId, ClientWorkout, Difficulty, Exercise, ExerciseId, Prescription, SessionId,
    SetLog, Trainer, TrainerId, Workout, WorkoutExerciseId, WorkoutId, WorkoutSession,
};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

/// Constraint violations become `Conflict`; everything else is a connection failure.
pub(crate) fn write_err(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() || db.is_foreign_key_violation() => {
            StorageError::Conflict
        }
        _ => conn(e),
    }
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn id_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn i32_from_i64(field: &'static str, v: i64) -> Result<i32, StorageError> {
    i32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn trainer_id_from_i64(v: i64) -> Result<TrainerId, StorageError> {
    Ok(TrainerId::new(i64_to_u64("trainer_id", v)?))
}

pub(crate) fn client_id_from_i64(v: i64) -> Result<ClientId, StorageError> {
    Ok(ClientId::new(i64_to_u64("client_id", v)?))
}

pub(crate) fn exercise_id_from_i64(v: i64) -> Result<ExerciseId, StorageError> {
    Ok(ExerciseId::new(i64_to_u64("exercise_id", v)?))
}

pub(crate) fn workout_id_from_i64(v: i64) -> Result<WorkoutId, StorageError> {
    Ok(WorkoutId::new(i64_to_u64("workout_id", v)?))
}

pub(crate) fn prescription_id_from_i64(v: i64) -> Result<WorkoutExerciseId, StorageError> {
    Ok(WorkoutExerciseId::new(i64_to_u64("workout_exercise_id", v)?))
}

pub(crate) fn session_id_from_i64(v: i64) -> Result<SessionId, StorageError> {
    Ok(SessionId::new(i64_to_u64("session_id", v)?))
}

/// Difficulty is stored as its display label; unknown labels survive as `Other`.
pub(crate) fn difficulty_to_text(d: Option<&Difficulty>) -> Option<String> {
    d.map(|d| d.as_str().to_owned())
}

pub(crate) fn difficulty_from_text(raw: Option<String>) -> Option<Difficulty> {
    raw.as_deref().and_then(Difficulty::parse)
}

pub(crate) fn map_trainer_row(row: &SqliteRow) -> Result<Trainer, StorageError> {
    Trainer::new(
        trainer_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get("user_ref").map_err(ser)?,
        row.try_get::<String, _>("email").map_err(ser)?,
        row.try_get::<String, _>("name").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_client_row(row: &SqliteRow) -> Result<Client, StorageError> {
    Client::from_persisted(
        client_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        trainer_id_from_i64(row.try_get::<i64, _>("trainer_id").map_err(ser)?)?,
        row.try_get::<String, _>("name").map_err(ser)?,
        row.try_get::<Option<String>, _>("email").map_err(ser)?,
        row.try_get::<Option<String>, _>("phone").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_exercise_row(row: &SqliteRow) -> Result<Exercise, StorageError> {
    Exercise::new(
        exercise_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("name").map_err(ser)?,
        row.try_get::<Option<String>, _>("muscle_group").map_err(ser)?,
        row.try_get::<Option<String>, _>("equipment").map_err(ser)?,
        difficulty_from_text(row.try_get("difficulty").map_err(ser)?),
    )
    .map_err(ser)
}

pub(crate) fn map_workout_row(row: &SqliteRow) -> Result<Workout, StorageError> {
    let trainer_id = row
        .try_get::<Option<i64>, _>("trainer_id")
        .map_err(ser)?
        .map(trainer_id_from_i64)
        .transpose()?;

    Workout::new(
        workout_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        trainer_id,
        row.try_get::<String, _>("name").map_err(ser)?,
        row.try_get::<Option<String>, _>("focus").map_err(ser)?,
        row.try_get::<Option<String>, _>("duration").map_err(ser)?,
        difficulty_from_text(row.try_get("difficulty").map_err(ser)?),
        row.try_get::<Option<String>, _>("notes").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_prescription_row(row: &SqliteRow) -> Result<Prescription, StorageError> {
    Ok(Prescription {
        id: prescription_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        workout_id: workout_id_from_i64(row.try_get::<i64, _>("workout_id").map_err(ser)?)?,
        exercise_id: exercise_id_from_i64(row.try_get::<i64, _>("exercise_id").map_err(ser)?)?,
        order_index: u32_from_i64(
            "order_index",
            row.try_get::<i64, _>("order_index").map_err(ser)?,
        )?,
        sets: u32_from_i64("sets", row.try_get::<i64, _>("sets").map_err(ser)?)?,
        reps: row.try_get("reps").map_err(ser)?,
        rest_seconds: u32_from_i64(
            "rest_seconds",
            row.try_get::<i64, _>("rest_seconds").map_err(ser)?,
        )?,
    })
}

pub(crate) fn map_assignment_row(row: &SqliteRow) -> Result<ClientWorkout, StorageError> {
    Ok(ClientWorkout {
        client_id: client_id_from_i64(row.try_get::<i64, _>("client_id").map_err(ser)?)?,
        workout_id: workout_id_from_i64(row.try_get::<i64, _>("workout_id").map_err(ser)?)?,
        is_active: row.try_get::<i64, _>("is_active").map_err(ser)? != 0,
        assigned_at: row.try_get("assigned_at").map_err(ser)?,
    })
}

pub(crate) fn map_session_row(row: &SqliteRow) -> Result<WorkoutSession, StorageError> {
    let duration = row
        .try_get::<Option<i64>, _>("duration_minutes")
        .map_err(ser)?
        .map(|v| u32_from_i64("duration_minutes", v))
        .transpose()?;

    WorkoutSession::from_persisted(
        session_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        client_id_from_i64(row.try_get::<i64, _>("client_id").map_err(ser)?)?,
        workout_id_from_i64(row.try_get::<i64, _>("workout_id").map_err(ser)?)?,
        row.try_get("started_at").map_err(ser)?,
        row.try_get("completed_at").map_err(ser)?,
        duration,
        row.try_get::<Option<String>, _>("notes").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_set_log_row(row: &SqliteRow) -> Result<SetLog, StorageError> {
    Ok(SetLog {
        session_id: session_id_from_i64(row.try_get::<i64, _>("session_id").map_err(ser)?)?,
        exercise_id: exercise_id_from_i64(row.try_get::<i64, _>("exercise_id").map_err(ser)?)?,
        prescription_id: row
            .try_get::<Option<i64>, _>("workout_exercise_id")
            .map_err(ser)?
            .map(prescription_id_from_i64)
            .transpose()?,
        set_number: i32_from_i64("set_number", row.try_get::<i64, _>("set_number").map_err(ser)?)?,
        reps_completed: row
            .try_get::<Option<i64>, _>("reps_completed")
            .map_err(ser)?
            .map(|v| u32_from_i64("reps_completed", v))
            .transpose()?,
        weight_kg: row.try_get("weight_kg").map_err(ser)?,
    })
}

/// Builds `?start, ?start+1, …` placeholders for an `IN (…)` list.
pub(crate) fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}
