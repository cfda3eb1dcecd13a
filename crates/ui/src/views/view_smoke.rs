use std::sync::Arc;

use chrono::Duration;
use services::{AppServices, LoggedSet, SessionLogForm};
use storage::repository::{
    NewSetLogRecord, SessionRepository, SessionViewRows, Storage, StorageError,
};
use trainer_core::model::{
    ClientDraft, ClientId, ExerciseDraft, ExerciseId, PrescriptionDraft, SessionId, SetLog,
    ValidSession, WorkoutDraft, WorkoutId, WorkoutSession,
};
use trainer_core::time::fixed_now;

use super::test_harness::{ViewKind, mount, test_services};

struct Seeded {
    client: ClientId,
    workout: WorkoutId,
    squat: ExerciseId,
}

async fn seed(app: &AppServices) -> Seeded {
    let trainer = app.trainer().id();
    let squat = app
        .exercises()
        .add_exercise(ExerciseDraft {
            name: "Back Squat".into(),
            muscle_group: "Legs".into(),
            equipment: "Barbell".into(),
            difficulty: "Intermediate".into(),
        })
        .await
        .expect("exercise");
    let workout = app
        .workouts()
        .create_workout(
            trainer,
            WorkoutDraft {
                name: "Leg Day".into(),
                focus: "Lower body".into(),
                difficulty: "Advanced".into(),
                exercises: vec![PrescriptionDraft::for_exercise(squat)],
                ..WorkoutDraft::default()
            },
        )
        .await
        .expect("workout");
    let client = app
        .clients()
        .add_client(trainer, ClientDraft::new("Jordan Lee", "jordan@example.com", ""))
        .await
        .expect("client")
        .id();
    Seeded {
        client,
        workout,
        squat,
    }
}

fn squat_set(exercise_id: ExerciseId, n: i32, reps: Option<u32>, kg: Option<f64>) -> LoggedSet {
    LoggedSet {
        exercise_id,
        prescription_id: None,
        set_number: n,
        reps,
        weight_kg: kg,
    }
}

async fn log(app: &AppServices, seeded: &Seeded, entries: Vec<LoggedSet>) -> SessionId {
    let form = SessionLogForm {
        client_id: Some(seeded.client),
        workout_id: Some(seeded.workout),
        notes: "Felt **strong** today".into(),
        ..SessionLogForm::new(fixed_now() - Duration::minutes(50))
    };
    app.progress()
        .log_session(app.trainer().id(), form, entries)
        .await
        .expect("log session")
}

#[tokio::test(flavor = "current_thread")]
async fn session_detail_renders_cards_and_set_table() {
    let storage = Storage::in_memory();
    let app = test_services(&storage).await;
    let seeded = seed(&app).await;
    let id = log(
        &app,
        &seeded,
        vec![
            squat_set(seeded.squat, 1, Some(5), Some(100.0)),
            squat_set(seeded.squat, 2, Some(5), Some(100.0)),
            squat_set(seeded.squat, 3, Some(5), None),
        ],
    )
    .await;

    let mut harness = mount(Arc::clone(&app), ViewKind::SessionDetail(id.value()));
    harness.settle().await;
    let html = harness.render();

    for expected in [
        "Leg Day",
        "Jordan Lee",
        "Total Exercises",
        "Total Sets",
        "Total Volume (kg)",
        "1000.0",
        "Back Squat",
        "Weight (kg)",
        "100 kg",
        "<strong>strong</strong>",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn session_detail_reports_unknown_session() {
    let storage = Storage::in_memory();
    let app = test_services(&storage).await;

    let mut harness = mount(app, ViewKind::SessionDetail(404));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Session not found"), "missing banner in {html}");
    assert!(!html.contains("Retry"), "not-found must not offer retry: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_lists_recent_clients_and_workouts() {
    let storage = Storage::in_memory();
    let app = test_services(&storage).await;
    seed(&app).await;

    let mut harness = mount(app, ViewKind::Dashboard);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome back, Coach Kim"), "missing greeting in {html}");
    assert!(html.contains("Jordan Lee"), "missing client in {html}");
    assert!(html.contains("JL"), "missing initials in {html}");
    assert!(html.contains("Leg Day"), "missing workout in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn clients_view_shows_empty_state() {
    let storage = Storage::in_memory();
    let app = test_services(&storage).await;

    let mut harness = mount(app, ViewKind::Clients);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No clients yet"), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn client_detail_shows_assignments_and_history() {
    let storage = Storage::in_memory();
    let app = test_services(&storage).await;
    let seeded = seed(&app).await;
    app.clients()
        .assign_workout(app.trainer().id(), seeded.client, seeded.workout)
        .await
        .expect("assign");
    log(&app, &seeded, vec![squat_set(seeded.squat, 1, Some(8), Some(60.0))]).await;

    let mut harness = mount(Arc::clone(&app), ViewKind::ClientDetail(seeded.client.value()));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("jordan@example.com"), "missing email in {html}");
    assert!(html.contains("Assigned Workouts"), "missing section in {html}");
    assert!(html.contains("Completed"), "missing status in {html}");
    assert!(html.contains("60 min"), "missing duration in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn workout_views_render_template() {
    let storage = Storage::in_memory();
    let app = test_services(&storage).await;
    let seeded = seed(&app).await;

    let mut list = mount(Arc::clone(&app), ViewKind::Workouts);
    list.settle().await;
    let html = list.render();
    assert!(html.contains("Leg Day"), "missing card in {html}");
    assert!(html.contains("badge-advanced"), "missing difficulty badge in {html}");

    let mut detail = mount(app, ViewKind::WorkoutDetail(seeded.workout.value()));
    detail.settle().await;
    let html = detail.render();
    assert!(html.contains("Back Squat"), "missing exercise in {html}");
    assert!(html.contains("8–12"), "missing reps in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exercises_view_lists_library() {
    let storage = Storage::in_memory();
    let app = test_services(&storage).await;
    seed(&app).await;

    let mut harness = mount(app, ViewKind::Exercises);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Back Squat"), "missing exercise in {html}");
    assert!(html.contains("All muscles"), "missing filter in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn log_and_progress_views_offer_selections() {
    let storage = Storage::in_memory();
    let app = test_services(&storage).await;
    seed(&app).await;

    let mut harness = mount(Arc::clone(&app), ViewKind::LogSession);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Select a client"), "missing client select in {html}");
    assert!(html.contains("Leg Day"), "missing workout option in {html}");

    let mut harness = mount(app, ViewKind::Progress);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Jordan Lee"), "missing client option in {html}");
}

struct FailingSessionRepo;

#[async_trait::async_trait]
impl SessionRepository for FailingSessionRepo {
    async fn record_session(
        &self,
        _session: ValidSession,
        _sets: Vec<NewSetLogRecord>,
    ) -> Result<SessionId, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_session(&self, _id: SessionId) -> Result<Option<WorkoutSession>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_sessions_for_client(
        &self,
        _client_id: ClientId,
    ) -> Result<Vec<WorkoutSession>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_set_logs(&self, _session_id: SessionId) -> Result<Vec<SetLog>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn load_session_view(
        &self,
        _session_id: SessionId,
    ) -> Result<Option<SessionViewRows>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn session_detail_offers_retry_on_storage_failure() {
    let storage = Storage {
        sessions: Arc::new(FailingSessionRepo),
        ..Storage::in_memory()
    };
    let app = test_services(&storage).await;

    let mut harness = mount(app, ViewKind::SessionDetail(1));
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Something went wrong. Please try again."),
        "missing error banner in {html}"
    );
    assert!(html.contains("Retry"), "missing retry button in {html}");
}
