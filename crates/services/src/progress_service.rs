//! Session logging and the session-detail read path.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use storage::repository::{
    ClientRepository, ExerciseRepository, NewSetLogRecord, SessionRepository, WorkoutRepository,
};
use tracing::{info, warn};
use trainer_core::model::{
    Client, ClientId, ExerciseId, SessionDraft, SessionId, SessionStatus, TrainerId, Workout,
    WorkoutExerciseId, WorkoutId, WorkoutSession,
};
use trainer_core::progress::{
    ExerciseMeta, GroupedExercise, SessionTotals, group_set_logs, lookup_from_exercises,
};

use crate::Clock;
use crate::error::ProgressError;

/// Workout label for sessions whose template is gone.
pub const UNKNOWN_WORKOUT: &str = "Unknown Workout";

/// Client or workout label on a session whose row could not be joined.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Default session length offered by the logging form.
pub const DEFAULT_SESSION_MINUTES: u32 = 60;

/// One row of a client's session history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionListItem {
    pub id: SessionId,
    pub workout_name: String,
    pub started_at: DateTime<Utc>,
    pub status: SessionStatus,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
}

impl SessionListItem {
    #[must_use]
    pub fn from_session(session: &WorkoutSession, workout: Option<&Workout>) -> Self {
        Self {
            id: session.id(),
            workout_name: workout.map_or_else(|| UNKNOWN_WORKOUT.to_owned(), |w| w.name().to_owned()),
            started_at: session.started_at(),
            status: session.status(),
            duration_minutes: session.duration_minutes(),
            notes: session.notes().map(str::to_owned),
        }
    }
}

/// Everything the session-detail page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionDetail {
    pub session: WorkoutSession,
    pub client_name: String,
    pub workout_name: String,
    pub workout_focus: Option<String>,
    pub exercises: Vec<GroupedExercise>,
    pub totals: SessionTotals,
}

/// One editable set on the logging form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoggedSet {
    pub exercise_id: ExerciseId,
    pub prescription_id: Option<WorkoutExerciseId>,
    pub set_number: i32,
    pub reps: Option<u32>,
    pub weight_kg: Option<f64>,
}

impl LoggedSet {
    /// Zero reps or weight mean "not entered" and are stored as absent.
    fn into_record(self) -> NewSetLogRecord {
        NewSetLogRecord {
            exercise_id: self.exercise_id,
            prescription_id: self.prescription_id,
            set_number: self.set_number,
            reps_completed: self.reps.filter(|r| *r > 0),
            weight_kg: self.weight_kg.filter(|w| *w > 0.0),
        }
    }
}

/// One prescribed exercise on the logging form, with its blank set rows.
#[derive(Debug, Clone, PartialEq)]
pub struct LogTemplateExercise {
    pub exercise_id: ExerciseId,
    pub prescription_id: WorkoutExerciseId,
    pub name: String,
    pub reps_hint: String,
    pub sets: Vec<LoggedSet>,
}

/// Logging form seeded from a workout template.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionLogTemplate {
    pub workout: Workout,
    pub exercises: Vec<LogTemplateExercise>,
}

impl SessionLogTemplate {
    /// Every set row in form order.
    #[must_use]
    pub fn entries(&self) -> Vec<LoggedSet> {
        self.exercises
            .iter()
            .flat_map(|e| e.sets.iter().copied())
            .collect()
    }
}

/// Session header as entered on the logging form; selections may still be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLogForm {
    pub client_id: Option<ClientId>,
    pub workout_id: Option<WorkoutId>,
    pub started_at: DateTime<Utc>,
    pub duration_minutes: Option<u32>,
    pub notes: String,
}

impl SessionLogForm {
    #[must_use]
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            client_id: None,
            workout_id: None,
            started_at,
            duration_minutes: Some(DEFAULT_SESSION_MINUTES),
            notes: String::new(),
        }
    }
}

/// Session logging and progress views.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    clients: Arc<dyn ClientRepository>,
    workouts: Arc<dyn WorkoutRepository>,
    exercises: Arc<dyn ExerciseRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        clock: Clock,
        clients: Arc<dyn ClientRepository>,
        workouts: Arc<dyn WorkoutRepository>,
        exercises: Arc<dyn ExerciseRepository>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            clock,
            clients,
            workouts,
            exercises,
            sessions,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    async fn owned_client(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
    ) -> Result<Client, ProgressError> {
        self.clients
            .get_client(client_id)
            .await?
            .filter(|c| c.trainer_id() == trainer_id)
            .ok_or(ProgressError::ClientNotFound)
    }

    async fn visible_workout(
        &self,
        trainer_id: TrainerId,
        workout_id: WorkoutId,
    ) -> Result<Workout, ProgressError> {
        self.workouts
            .get_workout(workout_id)
            .await?
            .filter(|w| w.trainer_id().is_none_or(|owner| owner == trainer_id))
            .ok_or(ProgressError::WorkoutNotFound)
    }

    /// A client's sessions, most recent first, labelled with workout names.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::ClientNotFound` if the client is not visible to the trainer.
    /// Returns `ProgressError::Storage` if repository access fails.
    pub async fn list_sessions_for_client(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
    ) -> Result<Vec<SessionListItem>, ProgressError> {
        self.owned_client(trainer_id, client_id).await?;
        let sessions = self.sessions.list_sessions_for_client(client_id).await?;

        let mut ids: Vec<WorkoutId> = sessions.iter().map(WorkoutSession::workout_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let workouts: HashMap<WorkoutId, Workout> = self
            .workouts
            .get_workouts(&ids)
            .await?
            .into_iter()
            .map(|w| (w.id(), w))
            .collect();

        Ok(sessions
            .iter()
            .map(|s| SessionListItem::from_session(s, workouts.get(&s.workout_id())))
            .collect())
    }

    /// Load, group, and total one session.
    ///
    /// Missing client, workout, or exercise metadata falls back to placeholder names.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::SessionNotFound` if the session does not exist or its
    /// client belongs to another trainer.
    /// Returns `ProgressError::Storage` if repository access fails.
    pub async fn session_detail(
        &self,
        trainer_id: TrainerId,
        session_id: SessionId,
    ) -> Result<SessionDetail, ProgressError> {
        let rows = self
            .sessions
            .load_session_view(session_id)
            .await
            .inspect_err(|e| warn!(session = %session_id, error = %e, "session view fetch failed"))?
            .ok_or(ProgressError::SessionNotFound(session_id))?;

        let client_id = rows.session.client_id();
        match self.clients.get_client(client_id).await? {
            Some(client) if client.trainer_id() != trainer_id => {
                return Err(ProgressError::SessionNotFound(session_id));
            }
            _ => {}
        }

        let missing = rows
            .logs
            .iter()
            .filter(|l| !rows.lookup.contains_key(&l.exercise_id))
            .count();
        if missing > 0 {
            warn!(session = %session_id, missing, "set logs reference unknown exercises");
        }

        let exercises = group_set_logs(&rows.logs, &rows.lookup);
        let totals = SessionTotals::from_groups(&exercises);

        Ok(SessionDetail {
            session: rows.session,
            client_name: rows
                .client_name
                .unwrap_or_else(|| UNKNOWN_NAME.to_owned()),
            workout_name: rows
                .workout_name
                .unwrap_or_else(|| UNKNOWN_NAME.to_owned()),
            workout_focus: rows.workout_focus,
            exercises,
            totals,
        })
    }

    /// Seed the logging form from a template: one blank row per prescribed set.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::WorkoutNotFound` if the template does not exist or is
    /// private to another trainer.
    /// Returns `ProgressError::Storage` if repository access fails.
    pub async fn start_log(
        &self,
        trainer_id: TrainerId,
        workout_id: WorkoutId,
    ) -> Result<SessionLogTemplate, ProgressError> {
        let workout = self.visible_workout(trainer_id, workout_id).await?;
        let prescriptions = self.workouts.list_prescriptions(workout_id).await?;
        let ids: Vec<ExerciseId> = prescriptions.iter().map(|p| p.exercise_id).collect();
        let lookup = lookup_from_exercises(&self.exercises.get_exercises(&ids).await?);

        let exercises = prescriptions
            .into_iter()
            .map(|p| {
                let name = lookup
                    .get(&p.exercise_id)
                    .map_or_else(|| ExerciseMeta::unknown().name, |m| m.name.clone());
                let sets = (1..=p.sets)
                    .map(|n| LoggedSet {
                        exercise_id: p.exercise_id,
                        prescription_id: Some(p.id),
                        set_number: i32::try_from(n).unwrap_or(i32::MAX),
                        reps: None,
                        weight_kg: None,
                    })
                    .collect();
                LogTemplateExercise {
                    exercise_id: p.exercise_id,
                    prescription_id: p.id,
                    name,
                    reps_hint: p.reps,
                    sets,
                }
            })
            .collect();

        Ok(SessionLogTemplate { workout, exercises })
    }

    /// Record a completed session and all entered sets in one write.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::MissingSelection` when client or workout is unset.
    /// Returns `ProgressError::ClientNotFound` if the client is not visible to the trainer.
    /// Returns `ProgressError::WorkoutNotFound` if the template is not visible to the trainer.
    /// Returns `ProgressError::Session` if the start time lies after now.
    /// Returns `ProgressError::Storage` if persistence fails; nothing is kept then.
    pub async fn log_session(
        &self,
        trainer_id: TrainerId,
        form: SessionLogForm,
        entries: Vec<LoggedSet>,
    ) -> Result<SessionId, ProgressError> {
        let (Some(client_id), Some(workout_id)) = (form.client_id, form.workout_id) else {
            return Err(ProgressError::MissingSelection);
        };
        self.owned_client(trainer_id, client_id).await?;
        self.visible_workout(trainer_id, workout_id).await?;

        let session = SessionDraft {
            client_id,
            workout_id,
            started_at: form.started_at,
            completed_at: Some(self.clock.now()),
            duration_minutes: form.duration_minutes,
            notes: form.notes,
        }
        .validate()?;

        let sets: Vec<NewSetLogRecord> = entries.into_iter().map(LoggedSet::into_record).collect();
        let set_count = sets.len();
        let id = self.sessions.record_session(session, sets).await?;
        info!(session = %id, client = %client_id, workout = %workout_id, set_count, "session logged");
        Ok(id)
    }
}
