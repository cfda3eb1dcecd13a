//! Demo data for local development.
//!
//! Shared by the `seed` binary and the app's `seed` subcommand.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::info;
use trainer_core::model::{
    ClientDraft, ExerciseDraft, ExerciseId, PrescriptionDraft, SessionDraft, Trainer, TrainerId,
    WorkoutDraft, normalize_email,
};
use uuid::Uuid;

use crate::repository::{
    NewExerciseRecord, NewSetLogRecord, NewTrainerRecord, NewWorkoutRecord, StorageError, Storage,
};

/// Trainer used when no email is configured.
pub const DEFAULT_TRAINER_EMAIL: &str = "test@gymble.com";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Domain(#[from] trainer_core::error::Error),

    #[error("failed to read exercise file {path}: {source}")]
    ReadExercises {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid exercise file {path}: {source}")]
    ParseExercises {
        path: String,
        source: serde_json::Error,
    },
}

impl From<trainer_core::model::TrainerError> for SeedError {
    fn from(e: trainer_core::model::TrainerError) -> Self {
        Self::Domain(e.into())
    }
}

impl From<trainer_core::model::ClientError> for SeedError {
    fn from(e: trainer_core::model::ClientError) -> Self {
        Self::Domain(e.into())
    }
}

impl From<trainer_core::model::ExerciseError> for SeedError {
    fn from(e: trainer_core::model::ExerciseError) -> Self {
        Self::Domain(e.into())
    }
}

impl From<trainer_core::model::WorkoutError> for SeedError {
    fn from(e: trainer_core::model::WorkoutError) -> Self {
        Self::Domain(e.into())
    }
}

impl From<trainer_core::model::SessionError> for SeedError {
    fn from(e: trainer_core::model::SessionError) -> Self {
        Self::Domain(e.into())
    }
}

#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub trainer_email: String,
    pub clients: u32,
    pub sessions: u32,
    pub now: DateTime<Utc>,
    /// Replaces the built-in library when the store has no exercises yet.
    pub exercises: Option<Vec<ExerciseDraft>>,
}

impl SeedOptions {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            trainer_email: DEFAULT_TRAINER_EMAIL.to_owned(),
            clients: 3,
            sessions: 4,
            now,
            exercises: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub trainer_id: TrainerId,
    pub exercises: usize,
    pub clients: u32,
    pub workouts: usize,
    pub sessions: u32,
}

/// Load an exercise library from a JSON array of `{name, muscle_group, equipment, difficulty}`.
///
/// # Errors
///
/// Returns `SeedError::ReadExercises` or `SeedError::ParseExercises`.
pub fn load_exercise_file(path: &Path) -> Result<Vec<ExerciseDraft>, SeedError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::ReadExercises {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SeedError::ParseExercises {
        path: display,
        source,
    })
}

fn builtin_library() -> Vec<ExerciseDraft> {
    [
        ("Barbell Bench Press", "Chest", "Barbell", "Intermediate"),
        ("Push-Up", "Chest", "Bodyweight", "Beginner"),
        ("Bent-Over Row", "Back", "Barbell", "Intermediate"),
        ("Lat Pulldown", "Back", "Cable", "Beginner"),
        ("Back Squat", "Legs", "Barbell", "Intermediate"),
        ("Romanian Deadlift", "Legs", "Barbell", "Advanced"),
        ("Overhead Press", "Shoulders", "Barbell", "Intermediate"),
        ("Lateral Raise", "Shoulders", "Dumbbell", "Beginner"),
        ("Biceps Curl", "Arms", "Dumbbell", "Beginner"),
        ("Triceps Pushdown", "Arms", "Cable", "Beginner"),
    ]
    .into_iter()
    .map(|(name, group, equipment, level)| ExerciseDraft {
        name: name.to_owned(),
        muscle_group: group.to_owned(),
        equipment: equipment.to_owned(),
        difficulty: level.to_owned(),
    })
    .collect()
}

const CLIENT_NAMES: [(&str, &str); 5] = [
    ("Alex Morgan", "alex@example.com"),
    ("Jordan Lee", "jordan@example.com"),
    ("Sam Rivera", ""),
    ("Casey Kim", "casey@example.com"),
    ("Riley Chen", ""),
];

async fn ensure_trainer(
    storage: &Storage,
    email: &str,
    now: DateTime<Utc>,
) -> Result<Trainer, SeedError> {
    let email = normalize_email(email)?;
    if let Some(existing) = storage.trainers.find_trainer_by_email(&email).await? {
        return Ok(existing);
    }
    let trainer = storage
        .trainers
        .insert_trainer(NewTrainerRecord {
            user_ref: Uuid::new_v4(),
            name: Trainer::default_name_for(&email),
            email,
            created_at: now,
        })
        .await?;
    Ok(trainer)
}

/// Populate `storage` with a trainer, a library, two templates, clients, and logged sessions.
///
/// # Errors
///
/// Returns `SeedError` if validation or any storage call fails.
pub async fn seed_demo(storage: &Storage, options: SeedOptions) -> Result<SeedReport, SeedError> {
    let now = options.now;
    let trainer = ensure_trainer(storage, &options.trainer_email, now).await?;

    let mut library = storage.exercises.list_exercises().await?;
    if library.is_empty() {
        let drafts = options.exercises.unwrap_or_else(builtin_library);
        for draft in drafts {
            let exercise = draft.validate(ExerciseId::new(0))?;
            storage
                .exercises
                .insert_exercise(NewExerciseRecord::from_exercise(&exercise))
                .await?;
        }
        library = storage.exercises.list_exercises().await?;
    }
    let ids: Vec<ExerciseId> = library.iter().map(|e| e.id()).collect();

    let templates = [
        ("Full Body Foundations", "Full body", "45 min", "Beginner"),
        ("Strength Builder", "Strength", "60 min", "Intermediate"),
    ];
    let mut workout_ids = Vec::new();
    for (i, (name, focus, duration, level)) in templates.into_iter().enumerate() {
        let picks: Vec<PrescriptionDraft> = ids
            .iter()
            .skip(i)
            .step_by(2)
            .take(4)
            .map(|id| PrescriptionDraft::for_exercise(*id))
            .collect();
        if picks.is_empty() {
            continue;
        }
        let draft = WorkoutDraft {
            name: name.to_owned(),
            focus: focus.to_owned(),
            duration: duration.to_owned(),
            difficulty: level.to_owned(),
            notes: String::new(),
            exercises: picks,
        };
        let (workout, rows) = draft.validate(Some(trainer.id()), now)?;
        let id = storage
            .workouts
            .insert_workout(NewWorkoutRecord::from_workout(&workout, rows))
            .await?;
        workout_ids.push(id);
    }

    let mut clients = Vec::new();
    for i in 0..options.clients {
        let (name, email) = CLIENT_NAMES[i as usize % CLIENT_NAMES.len()];
        let fields = ClientDraft::new(name, email, "").validate()?;
        let created = now - Duration::days(i64::from(options.clients - i));
        let client = storage
            .clients
            .insert_client(trainer.id(), fields, created)
            .await?;
        if let Some(first) = workout_ids.first() {
            storage
                .assignments
                .assign_workout(client.id(), *first, created)
                .await?;
        }
        clients.push(client);
    }

    let mut sessions = 0;
    if !clients.is_empty() && !workout_ids.is_empty() {
        for i in 0..options.sessions {
            let client = &clients[i as usize % clients.len()];
            let workout_id = workout_ids[i as usize % workout_ids.len()];
            let started_at = now - Duration::days(i64::from(i) * 2 + 1);
            let session = SessionDraft {
                client_id: client.id(),
                workout_id,
                started_at,
                completed_at: Some(started_at + Duration::minutes(60)),
                duration_minutes: Some(60),
                notes: if i == 0 {
                    "Felt **strong** today.".to_owned()
                } else {
                    String::new()
                },
            }
            .validate()?;

            let mut sets = Vec::new();
            for p in storage.workouts.list_prescriptions(workout_id).await? {
                for set_number in 1..=p.sets {
                    sets.push(NewSetLogRecord {
                        exercise_id: p.exercise_id,
                        prescription_id: Some(p.id),
                        set_number: i32::try_from(set_number).unwrap_or(i32::MAX),
                        reps_completed: Some(10 - set_number.min(4)),
                        weight_kg: Some(20.0 + 2.5 * f64::from(i + set_number)),
                    });
                }
            }
            storage.sessions.record_session(session, sets).await?;
            sessions += 1;
        }
    }

    let report = SeedReport {
        trainer_id: trainer.id(),
        exercises: library.len(),
        clients: options.clients,
        workouts: workout_ids.len(),
        sessions,
    };
    info!(
        trainer = %report.trainer_id,
        exercises = report.exercises,
        clients = report.clients,
        workouts = report.workouts,
        sessions = report.sessions,
        "seeded demo data"
    );
    Ok(report)
}
