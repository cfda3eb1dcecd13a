use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use trainer_core::model::{
    Client, ClientId, ClientWorkout, Difficulty, Exercise, ExerciseId, Prescription, SessionId,
    SetLog, Trainer, TrainerId, ValidClient, ValidPrescription, ValidSession, Workout,
    WorkoutExerciseId, WorkoutId, WorkoutSession,
};
use trainer_core::progress::{ExerciseLookup, ExerciseMeta};
use uuid::Uuid;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

//
// ─── RECORDS ───────────────────────────────────────────────────────────────────
//

/// Insert shape for a trainer row; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewTrainerRecord {
    pub user_ref: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Sort order for client listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientOrder {
    NameAsc,
    NewestFirst,
}

/// Insert shape for a library exercise.
#[derive(Debug, Clone)]
pub struct NewExerciseRecord {
    pub name: String,
    pub muscle_group: Option<String>,
    pub equipment: Option<String>,
    pub difficulty: Option<Difficulty>,
}

impl NewExerciseRecord {
    /// Take every field except the (placeholder) id from a validated exercise.
    #[must_use]
    pub fn from_exercise(exercise: &Exercise) -> Self {
        Self {
            name: exercise.name().to_owned(),
            muscle_group: exercise.muscle_group().map(str::to_owned),
            equipment: exercise.equipment().map(str::to_owned),
            difficulty: exercise.difficulty().cloned(),
        }
    }
}

/// Insert shape for a workout template together with its prescriptions.
#[derive(Debug, Clone)]
pub struct NewWorkoutRecord {
    pub trainer_id: Option<TrainerId>,
    pub name: String,
    pub focus: Option<String>,
    pub duration: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub prescriptions: Vec<ValidPrescription>,
}

impl NewWorkoutRecord {
    #[must_use]
    pub fn from_workout(workout: &Workout, prescriptions: Vec<ValidPrescription>) -> Self {
        Self {
            trainer_id: workout.trainer_id(),
            name: workout.name().to_owned(),
            focus: workout.focus().map(str::to_owned),
            duration: workout.duration().map(str::to_owned),
            difficulty: workout.difficulty().cloned(),
            notes: workout.notes().map(str::to_owned),
            created_at: workout.created_at(),
            prescriptions,
        }
    }
}

/// One set row written alongside a new session.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSetLogRecord {
    pub exercise_id: ExerciseId,
    pub prescription_id: Option<WorkoutExerciseId>,
    pub set_number: i32,
    pub reps_completed: Option<u32>,
    pub weight_kg: Option<f64>,
}

impl NewSetLogRecord {
    #[must_use]
    pub fn into_set_log(self, session_id: SessionId) -> SetLog {
        SetLog {
            session_id,
            exercise_id: self.exercise_id,
            prescription_id: self.prescription_id,
            set_number: self.set_number,
            reps_completed: self.reps_completed,
            weight_kg: self.weight_kg,
        }
    }
}

/// Everything the session detail view needs, fetched as one unit.
///
/// Names are `None` when the referenced row no longer exists; `lookup` only
/// holds exercises that were found.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionViewRows {
    pub session: WorkoutSession,
    pub client_name: Option<String>,
    pub workout_name: Option<String>,
    pub workout_focus: Option<String>,
    pub logs: Vec<SetLog>,
    pub lookup: ExerciseLookup,
}

//
// ─── CONTRACTS ─────────────────────────────────────────────────────────────────
//

#[async_trait]
pub trait TrainerRepository: Send + Sync {
    /// Look up a trainer by normalized email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn find_trainer_by_email(&self, email: &str) -> Result<Option<Trainer>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the email is already registered.
    async fn insert_trainer(&self, trainer: NewTrainerRecord) -> Result<Trainer, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn get_trainer(&self, id: TrainerId) -> Result<Option<Trainer>, StorageError>;
}

/// Repository contract for a trainer's clients.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the client cannot be stored.
    async fn insert_client(
        &self,
        trainer_id: TrainerId,
        fields: ValidClient,
        created_at: DateTime<Utc>,
    ) -> Result<Client, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn get_client(&self, id: ClientId) -> Result<Option<Client>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn list_clients(
        &self,
        trainer_id: TrainerId,
        order: ClientOrder,
        limit: u32,
    ) -> Result<Vec<Client>, StorageError>;

    /// Overwrite the editable fields of an existing client.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the client does not exist.
    async fn update_client(&self, client: &Client) -> Result<(), StorageError>;

    /// Delete a client together with assignments, sessions, and set logs.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the client does not exist.
    async fn delete_client(&self, id: ClientId) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the exercise cannot be stored.
    async fn insert_exercise(&self, exercise: NewExerciseRecord) -> Result<ExerciseId, StorageError>;

    /// Entire library, name ascending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn list_exercises(&self) -> Result<Vec<Exercise>, StorageError>;

    /// Fetch the exercises whose id is in `ids`. Unknown ids are silently absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn get_exercises(&self, ids: &[ExerciseId]) -> Result<Vec<Exercise>, StorageError>;
}

#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Insert a template and its prescriptions as one unit.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if any row cannot be stored; nothing is kept in that case.
    async fn insert_workout(&self, workout: NewWorkoutRecord) -> Result<WorkoutId, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn get_workout(&self, id: WorkoutId) -> Result<Option<Workout>, StorageError>;

    /// Unknown ids are silently absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn get_workouts(&self, ids: &[WorkoutId]) -> Result<Vec<Workout>, StorageError>;

    /// Newest first. With a trainer, lists that trainer's templates plus shared ones.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn list_workouts(
        &self,
        trainer_id: Option<TrainerId>,
        limit: u32,
    ) -> Result<Vec<Workout>, StorageError>;

    /// Prescriptions of a template, by order index.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn list_prescriptions(
        &self,
        workout_id: WorkoutId,
    ) -> Result<Vec<Prescription>, StorageError>;
}

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Assign (or re-activate) a template for a client.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the assignment cannot be stored.
    async fn assign_workout(
        &self,
        client_id: ClientId,
        workout_id: WorkoutId,
        assigned_at: DateTime<Utc>,
    ) -> Result<ClientWorkout, StorageError>;

    /// Mark an assignment inactive.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no such assignment exists.
    async fn unassign_workout(
        &self,
        client_id: ClientId,
        workout_id: WorkoutId,
    ) -> Result<(), StorageError>;

    /// Active assignments only, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn list_active_assignments(
        &self,
        client_id: ClientId,
    ) -> Result<Vec<ClientWorkout>, StorageError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Write a session and all of its set logs as one unit.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if any row cannot be stored; no partial session is kept.
    async fn record_session(
        &self,
        session: ValidSession,
        sets: Vec<NewSetLogRecord>,
    ) -> Result<SessionId, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn get_session(&self, id: SessionId) -> Result<Option<WorkoutSession>, StorageError>;

    /// Sessions of one client, most recently started first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn list_sessions_for_client(
        &self,
        client_id: ClientId,
    ) -> Result<Vec<WorkoutSession>, StorageError>;

    /// Set logs of one session in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn list_set_logs(&self, session_id: SessionId) -> Result<Vec<SetLog>, StorageError>;

    /// Session header, client and workout names, set logs in insertion order,
    /// and exercise metadata, resolved in a single query.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn load_session_view(
        &self,
        session_id: SessionId,
    ) -> Result<Option<SessionViewRows>, StorageError>;
}

//
// ─── IN-MEMORY BACKEND ─────────────────────────────────────────────────────────
//

#[derive(Default)]
struct MemoryState {
    next_id: u64,
    trainers: BTreeMap<TrainerId, Trainer>,
    clients: BTreeMap<ClientId, Client>,
    exercises: BTreeMap<ExerciseId, Exercise>,
    workouts: BTreeMap<WorkoutId, Workout>,
    prescriptions: Vec<Prescription>,
    assignments: HashMap<(ClientId, WorkoutId), ClientWorkout>,
    sessions: BTreeMap<SessionId, WorkoutSession>,
    set_logs: Vec<SetLog>,
}

impl MemoryState {
    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[async_trait]
impl TrainerRepository for InMemoryRepository {
    async fn find_trainer_by_email(&self, email: &str) -> Result<Option<Trainer>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .trainers
            .values()
            .find(|t| t.email() == email)
            .cloned())
    }

    async fn insert_trainer(&self, trainer: NewTrainerRecord) -> Result<Trainer, StorageError> {
        let mut guard = self.lock()?;
        if guard.trainers.values().any(|t| t.email() == trainer.email) {
            return Err(StorageError::Conflict);
        }
        let id = TrainerId::new(guard.next());
        let stored = Trainer::new(
            id,
            trainer.user_ref,
            trainer.email,
            trainer.name,
            trainer.created_at,
        )
        .map_err(ser)?;
        guard.trainers.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_trainer(&self, id: TrainerId) -> Result<Option<Trainer>, StorageError> {
        Ok(self.lock()?.trainers.get(&id).cloned())
    }
}

#[async_trait]
impl ClientRepository for InMemoryRepository {
    async fn insert_client(
        &self,
        trainer_id: TrainerId,
        fields: ValidClient,
        created_at: DateTime<Utc>,
    ) -> Result<Client, StorageError> {
        let mut guard = self.lock()?;
        if !guard.trainers.contains_key(&trainer_id) {
            return Err(StorageError::Conflict);
        }
        let id = ClientId::new(guard.next());
        let client = Client::from_valid(id, trainer_id, fields, created_at);
        guard.clients.insert(id, client.clone());
        Ok(client)
    }

    async fn get_client(&self, id: ClientId) -> Result<Option<Client>, StorageError> {
        Ok(self.lock()?.clients.get(&id).cloned())
    }

    async fn list_clients(
        &self,
        trainer_id: TrainerId,
        order: ClientOrder,
        limit: u32,
    ) -> Result<Vec<Client>, StorageError> {
        let guard = self.lock()?;
        let mut clients: Vec<Client> = guard
            .clients
            .values()
            .filter(|c| c.trainer_id() == trainer_id)
            .cloned()
            .collect();
        match order {
            ClientOrder::NameAsc => clients.sort_by(|a, b| a.name().cmp(b.name())),
            ClientOrder::NewestFirst => clients.sort_by(|a, b| {
                b.created_at()
                    .cmp(&a.created_at())
                    .then_with(|| b.id().cmp(&a.id()))
            }),
        }
        clients.truncate(limit as usize);
        Ok(clients)
    }

    async fn update_client(&self, client: &Client) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        let slot = guard
            .clients
            .get_mut(&client.id())
            .ok_or(StorageError::NotFound)?;
        *slot = client.clone();
        Ok(())
    }

    async fn delete_client(&self, id: ClientId) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        if guard.clients.remove(&id).is_none() {
            return Err(StorageError::NotFound);
        }
        guard.assignments.retain(|(client_id, _), _| *client_id != id);
        let doomed: Vec<SessionId> = guard
            .sessions
            .values()
            .filter(|s| s.client_id() == id)
            .map(WorkoutSession::id)
            .collect();
        guard.sessions.retain(|sid, _| !doomed.contains(sid));
        guard.set_logs.retain(|log| !doomed.contains(&log.session_id));
        Ok(())
    }
}

#[async_trait]
impl ExerciseRepository for InMemoryRepository {
    async fn insert_exercise(&self, exercise: NewExerciseRecord) -> Result<ExerciseId, StorageError> {
        let mut guard = self.lock()?;
        let id = ExerciseId::new(guard.next());
        let stored = Exercise::new(
            id,
            exercise.name,
            exercise.muscle_group,
            exercise.equipment,
            exercise.difficulty,
        )
        .map_err(ser)?;
        guard.exercises.insert(id, stored);
        Ok(id)
    }

    async fn list_exercises(&self) -> Result<Vec<Exercise>, StorageError> {
        let guard = self.lock()?;
        let mut all: Vec<Exercise> = guard.exercises.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(all)
    }

    async fn get_exercises(&self, ids: &[ExerciseId]) -> Result<Vec<Exercise>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .exercises
            .values()
            .filter(|e| ids.contains(&e.id()))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl WorkoutRepository for InMemoryRepository {
    async fn insert_workout(&self, workout: NewWorkoutRecord) -> Result<WorkoutId, StorageError> {
        let mut guard = self.lock()?;
        if workout
            .prescriptions
            .iter()
            .any(|p| !guard.exercises.contains_key(&p.exercise_id))
        {
            return Err(StorageError::Conflict);
        }

        let id = WorkoutId::new(guard.next());
        let stored = Workout::new(
            id,
            workout.trainer_id,
            workout.name,
            workout.focus,
            workout.duration,
            workout.difficulty,
            workout.notes,
            workout.created_at,
        )
        .map_err(ser)?;
        guard.workouts.insert(id, stored);

        for p in workout.prescriptions {
            let row_id = WorkoutExerciseId::new(guard.next());
            guard.prescriptions.push(Prescription {
                id: row_id,
                workout_id: id,
                exercise_id: p.exercise_id,
                order_index: p.order_index,
                sets: p.sets,
                reps: p.reps,
                rest_seconds: p.rest_seconds,
            });
        }
        Ok(id)
    }

    async fn get_workout(&self, id: WorkoutId) -> Result<Option<Workout>, StorageError> {
        Ok(self.lock()?.workouts.get(&id).cloned())
    }

    async fn get_workouts(&self, ids: &[WorkoutId]) -> Result<Vec<Workout>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .workouts
            .values()
            .filter(|w| ids.contains(&w.id()))
            .cloned()
            .collect())
    }

    async fn list_workouts(
        &self,
        trainer_id: Option<TrainerId>,
        limit: u32,
    ) -> Result<Vec<Workout>, StorageError> {
        let guard = self.lock()?;
        let mut workouts: Vec<Workout> = guard
            .workouts
            .values()
            .filter(|w| match (trainer_id, w.trainer_id()) {
                (None, _) | (Some(_), None) => true,
                (Some(wanted), Some(owner)) => wanted == owner,
            })
            .cloned()
            .collect();
        workouts.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        workouts.truncate(limit as usize);
        Ok(workouts)
    }

    async fn list_prescriptions(
        &self,
        workout_id: WorkoutId,
    ) -> Result<Vec<Prescription>, StorageError> {
        let guard = self.lock()?;
        let mut rows: Vec<Prescription> = guard
            .prescriptions
            .iter()
            .filter(|p| p.workout_id == workout_id)
            .cloned()
            .collect();
        rows.sort_by_key(|p| (p.order_index, p.id));
        Ok(rows)
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryRepository {
    async fn assign_workout(
        &self,
        client_id: ClientId,
        workout_id: WorkoutId,
        assigned_at: DateTime<Utc>,
    ) -> Result<ClientWorkout, StorageError> {
        let mut guard = self.lock()?;
        if !guard.clients.contains_key(&client_id) || !guard.workouts.contains_key(&workout_id) {
            return Err(StorageError::NotFound);
        }
        let assignment = ClientWorkout {
            client_id,
            workout_id,
            is_active: true,
            assigned_at,
        };
        guard
            .assignments
            .insert((client_id, workout_id), assignment.clone());
        Ok(assignment)
    }

    async fn unassign_workout(
        &self,
        client_id: ClientId,
        workout_id: WorkoutId,
    ) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        let slot = guard
            .assignments
            .get_mut(&(client_id, workout_id))
            .ok_or(StorageError::NotFound)?;
        slot.is_active = false;
        Ok(())
    }

    async fn list_active_assignments(
        &self,
        client_id: ClientId,
    ) -> Result<Vec<ClientWorkout>, StorageError> {
        let guard = self.lock()?;
        let mut rows: Vec<ClientWorkout> = guard
            .assignments
            .values()
            .filter(|a| a.client_id == client_id && a.is_active)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.assigned_at
                .cmp(&a.assigned_at)
                .then_with(|| a.workout_id.cmp(&b.workout_id))
        });
        Ok(rows)
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn record_session(
        &self,
        session: ValidSession,
        sets: Vec<NewSetLogRecord>,
    ) -> Result<SessionId, StorageError> {
        let mut guard = self.lock()?;
        if !guard.clients.contains_key(&session.client_id)
            || !guard.workouts.contains_key(&session.workout_id)
            || sets.iter().any(|s| !guard.exercises.contains_key(&s.exercise_id))
        {
            return Err(StorageError::Conflict);
        }

        let id = SessionId::new(guard.next());
        let stored = WorkoutSession::from_persisted(
            id,
            session.client_id,
            session.workout_id,
            session.started_at,
            session.completed_at,
            session.duration_minutes,
            session.notes,
        )
        .map_err(ser)?;
        guard.sessions.insert(id, stored);
        guard
            .set_logs
            .extend(sets.into_iter().map(|s| s.into_set_log(id)));
        Ok(id)
    }

    async fn get_session(&self, id: SessionId) -> Result<Option<WorkoutSession>, StorageError> {
        Ok(self.lock()?.sessions.get(&id).cloned())
    }

    async fn list_sessions_for_client(
        &self,
        client_id: ClientId,
    ) -> Result<Vec<WorkoutSession>, StorageError> {
        let guard = self.lock()?;
        let mut rows: Vec<WorkoutSession> = guard
            .sessions
            .values()
            .filter(|s| s.client_id() == client_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.started_at()
                .cmp(&a.started_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(rows)
    }

    async fn list_set_logs(&self, session_id: SessionId) -> Result<Vec<SetLog>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .set_logs
            .iter()
            .filter(|log| log.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn load_session_view(
        &self,
        session_id: SessionId,
    ) -> Result<Option<SessionViewRows>, StorageError> {
        let guard = self.lock()?;
        let Some(session) = guard.sessions.get(&session_id).cloned() else {
            return Ok(None);
        };
        let workout = guard.workouts.get(&session.workout_id());
        let logs: Vec<SetLog> = guard
            .set_logs
            .iter()
            .filter(|log| log.session_id == session_id)
            .cloned()
            .collect();
        let lookup = logs
            .iter()
            .filter_map(|log| guard.exercises.get(&log.exercise_id))
            .map(|e| (e.id(), ExerciseMeta::from(e)))
            .collect();

        Ok(Some(SessionViewRows {
            client_name: guard
                .clients
                .get(&session.client_id())
                .map(|c| c.name().to_owned()),
            workout_name: workout.map(|w| w.name().to_owned()),
            workout_focus: workout.and_then(|w| w.focus().map(str::to_owned)),
            session,
            logs,
            lookup,
        }))
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub trainers: Arc<dyn TrainerRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub exercises: Arc<dyn ExerciseRepository>,
    pub workouts: Arc<dyn WorkoutRepository>,
    pub assignments: Arc<dyn AssignmentRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_backend(InMemoryRepository::new())
    }

    /// Wire every handle to the same backend.
    pub fn from_backend<R>(repo: R) -> Self
    where
        R: TrainerRepository
            + ClientRepository
            + ExerciseRepository
            + WorkoutRepository
            + AssignmentRepository
            + SessionRepository
            + Clone
            + 'static,
    {
        Self {
            trainers: Arc::new(repo.clone()),
            clients: Arc::new(repo.clone()),
            exercises: Arc::new(repo.clone()),
            workouts: Arc::new(repo.clone()),
            assignments: Arc::new(repo.clone()),
            sessions: Arc::new(repo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trainer_core::model::{ClientDraft, ExerciseDraft, SessionDraft, WorkoutDraft};
    use trainer_core::model::PrescriptionDraft;
    use trainer_core::time::fixed_now;

    async fn trainer(repo: &InMemoryRepository) -> Trainer {
        repo.insert_trainer(NewTrainerRecord {
            user_ref: Uuid::nil(),
            email: "coach@gymble.com".into(),
            name: "Coach".into(),
            created_at: fixed_now(),
        })
        .await
        .unwrap()
    }

    async fn exercise(repo: &InMemoryRepository, name: &str) -> ExerciseId {
        let draft = ExerciseDraft {
            name: name.into(),
            muscle_group: "Chest".into(),
            ..ExerciseDraft::default()
        };
        let ex = draft.validate(ExerciseId::new(0)).unwrap();
        repo.insert_exercise(NewExerciseRecord::from_exercise(&ex))
            .await
            .unwrap()
    }

    async fn workout(repo: &InMemoryRepository, exercises: &[ExerciseId]) -> WorkoutId {
        let draft = WorkoutDraft {
            name: "Push".into(),
            exercises: exercises
                .iter()
                .map(|id| PrescriptionDraft::for_exercise(*id))
                .collect(),
            ..WorkoutDraft::default()
        };
        let (w, rows) = draft.validate(None, fixed_now()).unwrap();
        repo.insert_workout(NewWorkoutRecord::from_workout(&w, rows))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn duplicate_trainer_email_conflicts() {
        let repo = InMemoryRepository::new();
        trainer(&repo).await;
        let err = repo
            .insert_trainer(NewTrainerRecord {
                user_ref: Uuid::nil(),
                email: "coach@gymble.com".into(),
                name: "Other".into(),
                created_at: fixed_now(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }

    #[tokio::test]
    async fn set_logs_keep_insertion_order() {
        let repo = InMemoryRepository::new();
        let coach = trainer(&repo).await;
        let client = repo
            .insert_client(
                coach.id(),
                ClientDraft::new("Sam", "", "").validate().unwrap(),
                fixed_now(),
            )
            .await
            .unwrap();
        let bench = exercise(&repo, "Bench").await;
        let row = exercise(&repo, "Row").await;
        let wid = workout(&repo, &[bench, row]).await;

        let session = SessionDraft {
            client_id: client.id(),
            workout_id: wid,
            started_at: fixed_now(),
            completed_at: None,
            duration_minutes: None,
            notes: String::new(),
        }
        .validate()
        .unwrap();
        let sets = vec![
            NewSetLogRecord {
                exercise_id: row,
                prescription_id: None,
                set_number: 1,
                reps_completed: Some(8),
                weight_kg: Some(60.0),
            },
            NewSetLogRecord {
                exercise_id: bench,
                prescription_id: None,
                set_number: 1,
                reps_completed: Some(5),
                weight_kg: None,
            },
        ];
        let sid = repo.record_session(session, sets).await.unwrap();

        let logs = repo.list_set_logs(sid).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].exercise_id, row);
        assert_eq!(logs[1].exercise_id, bench);

        repo.delete_client(client.id()).await.unwrap();
        assert!(repo.get_session(sid).await.unwrap().is_none());
        assert!(repo.list_set_logs(sid).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_ids_are_silently_absent() {
        let repo = InMemoryRepository::new();
        let bench = exercise(&repo, "Bench").await;
        let found = repo
            .get_exercises(&[bench, ExerciseId::new(999)])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(repo.get_workouts(&[WorkoutId::new(5)]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unassign_hides_assignment() {
        let repo = InMemoryRepository::new();
        let coach = trainer(&repo).await;
        let client = repo
            .insert_client(
                coach.id(),
                ClientDraft::new("Sam", "", "").validate().unwrap(),
                fixed_now(),
            )
            .await
            .unwrap();
        let bench = exercise(&repo, "Bench").await;
        let wid = workout(&repo, &[bench]).await;

        repo.assign_workout(client.id(), wid, fixed_now()).await.unwrap();
        assert_eq!(repo.list_active_assignments(client.id()).await.unwrap().len(), 1);

        repo.unassign_workout(client.id(), wid).await.unwrap();
        assert!(repo.list_active_assignments(client.id()).await.unwrap().is_empty());
    }
}
