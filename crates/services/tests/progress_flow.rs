use chrono::Duration;
use services::{
    AppServices, Clock, LoggedSet, ProgressError, SessionLogForm, TrainerIdentity,
};
use storage::repository::Storage;
use trainer_core::model::{
    ClientDraft, ClientId, ExerciseDraft, ExerciseId, PrescriptionDraft, SessionId, WorkoutDraft,
    WorkoutId,
};
use trainer_core::time::fixed_now;

struct Fixture {
    storage: Storage,
    app: AppServices,
    client: ClientId,
    workout: WorkoutId,
    bench: ExerciseId,
    row: ExerciseId,
}

async fn fixture() -> Fixture {
    let storage = Storage::in_memory();
    let app = AppServices::new(
        &storage,
        Clock::fixed(fixed_now()),
        &TrainerIdentity::new("coach@gym.com", Some("Coach".into())),
    )
    .await
    .unwrap();
    let trainer = app.trainer().id();

    let exercises = app.exercises();
    let mut ids = Vec::new();
    for (name, group) in [("Bench Press", "Chest"), ("Bent-Over Row", "Back")] {
        ids.push(
            exercises
                .add_exercise(ExerciseDraft {
                    name: name.into(),
                    muscle_group: group.into(),
                    ..ExerciseDraft::default()
                })
                .await
                .unwrap(),
        );
    }
    let (bench, row) = (ids[0], ids[1]);

    let mut draft = WorkoutDraft {
        name: "Upper".into(),
        focus: "Strength".into(),
        exercises: vec![
            PrescriptionDraft::for_exercise(bench),
            PrescriptionDraft::for_exercise(row),
        ],
        ..WorkoutDraft::default()
    };
    draft.exercises[1].sets = 2;
    let workout = app.workouts().create_workout(trainer, draft).await.unwrap();

    let client = app
        .clients()
        .add_client(trainer, ClientDraft::new("Sam Rivera", "", ""))
        .await
        .unwrap()
        .id();

    Fixture {
        storage,
        app,
        client,
        workout,
        bench,
        row,
    }
}

async fn second_trainer(f: &Fixture) -> AppServices {
    AppServices::new(
        &f.storage,
        Clock::fixed(fixed_now()),
        &TrainerIdentity::new("other@gym.com", Some("Other".into())),
    )
    .await
    .unwrap()
}

fn form(f: &Fixture) -> SessionLogForm {
    SessionLogForm {
        client_id: Some(f.client),
        workout_id: Some(f.workout),
        notes: "Good pace".into(),
        ..SessionLogForm::new(fixed_now() - Duration::minutes(55))
    }
}

fn set(exercise_id: ExerciseId, n: i32, reps: u32, weight: f64) -> LoggedSet {
    LoggedSet {
        exercise_id,
        prescription_id: None,
        set_number: n,
        reps: Some(reps),
        weight_kg: Some(weight),
    }
}

#[tokio::test]
async fn logged_session_groups_and_totals() {
    let f = fixture().await;
    let trainer = f.app.trainer().id();
    let progress = f.app.progress();

    let entries = vec![
        set(f.row, 2, 10, 50.0),
        set(f.row, 1, 10, 50.0),
        set(f.bench, 1, 8, 0.0),
    ];
    let id = progress
        .log_session(trainer, form(&f), entries)
        .await
        .unwrap();

    let detail = progress.session_detail(trainer, id).await.unwrap();
    assert_eq!(detail.client_name, "Sam Rivera");
    assert_eq!(detail.workout_name, "Upper");
    assert_eq!(detail.workout_focus.as_deref(), Some("Strength"));
    assert_eq!(detail.session.completed_at(), Some(fixed_now()));
    assert_eq!(detail.session.notes(), Some("Good pace"));

    let names: Vec<_> = detail.exercises.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Bent-Over Row", "Bench Press"]);

    let row = &detail.exercises[0];
    let numbers: Vec<_> = row.sets.iter().map(|s| s.set_number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert!((row.total_volume() - 1000.0).abs() < f64::EPSILON);

    let bench = &detail.exercises[1];
    assert_eq!(bench.sets[0].weight, None);
    assert!(bench.total_volume().abs() < f64::EPSILON);

    assert_eq!(detail.totals.exercise_count, 2);
    assert_eq!(detail.totals.set_count, 3);
    assert_eq!(detail.totals.incomplete_sets, 1);
    let summed: f64 = detail.exercises.iter().map(|g| g.total_volume()).sum();
    assert!((detail.totals.total_volume - summed).abs() < f64::EPSILON);
}

#[tokio::test]
async fn template_seeds_blank_rows_per_prescribed_set() {
    let f = fixture().await;
    let trainer = f.app.trainer().id();
    let progress = f.app.progress();

    let template = progress.start_log(trainer, f.workout).await.unwrap();
    assert_eq!(template.exercises.len(), 2);
    assert_eq!(template.exercises[0].name, "Bench Press");
    assert_eq!(template.exercises[0].sets.len(), 3);
    assert_eq!(template.exercises[1].sets.len(), 2);
    assert_eq!(template.exercises[1].reps_hint, "8–12");

    let entries = template.entries();
    assert_eq!(entries.len(), 5);
    assert!(entries.iter().all(|e| e.reps.is_none() && e.prescription_id.is_some()));

    let id = progress
        .log_session(trainer, form(&f), entries)
        .await
        .unwrap();
    let detail = progress.session_detail(trainer, id).await.unwrap();
    assert_eq!(detail.totals.set_count, 5);
    assert_eq!(detail.totals.incomplete_sets, 5);
    assert!(detail.totals.total_volume.abs() < f64::EPSILON);
}

#[tokio::test]
async fn empty_session_has_zero_totals() {
    let f = fixture().await;
    let trainer = f.app.trainer().id();
    let progress = f.app.progress();

    let id = progress
        .log_session(trainer, form(&f), Vec::new())
        .await
        .unwrap();
    let detail = progress.session_detail(trainer, id).await.unwrap();
    assert!(detail.exercises.is_empty());
    assert_eq!(detail.totals.set_count, 0);
    assert!(detail.totals.total_volume.abs() < f64::EPSILON);
}

#[tokio::test]
async fn missing_selection_is_rejected_before_any_write() {
    let f = fixture().await;
    let trainer = f.app.trainer().id();
    let progress = f.app.progress();

    let mut incomplete = form(&f);
    incomplete.workout_id = None;
    let err = progress
        .log_session(trainer, incomplete, Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ProgressError::MissingSelection));
    assert_eq!(err.to_string(), "Please select a client and workout");

    let history = progress
        .list_sessions_for_client(trainer, f.client)
        .await
        .unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn history_lists_newest_first_with_workout_names() {
    let f = fixture().await;
    let trainer = f.app.trainer().id();
    let progress = f.app.progress();

    let mut older = form(&f);
    older.started_at = fixed_now() - Duration::days(3);
    let first = progress.log_session(trainer, older, Vec::new()).await.unwrap();
    let second = progress
        .log_session(trainer, form(&f), Vec::new())
        .await
        .unwrap();

    let history = progress
        .list_sessions_for_client(trainer, f.client)
        .await
        .unwrap();
    let ids: Vec<_> = history.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![second, first]);
    assert_eq!(history[0].workout_name, "Upper");
    assert_eq!(history[0].duration_minutes, Some(60));
}

#[tokio::test]
async fn unknown_session_reports_not_found() {
    let f = fixture().await;
    let err = f
        .app
        .progress()
        .session_detail(f.app.trainer().id(), SessionId::new(4_040))
        .await
        .unwrap_err();
    assert!(matches!(err, ProgressError::SessionNotFound(_)));
    assert_eq!(err.to_string(), "Session not found");
}

#[tokio::test]
async fn dashboard_shows_newest_rows() {
    let f = fixture().await;
    let overview = f
        .app
        .dashboard()
        .overview(f.app.trainer().id())
        .await
        .unwrap();
    assert_eq!(overview.recent_clients.len(), 1);
    assert_eq!(overview.recent_workouts[0].id(), f.workout);
}

#[tokio::test]
async fn sessions_of_another_trainers_client_are_not_found() {
    let f = fixture().await;
    let owner = f.app.trainer().id();
    let id = f
        .app
        .progress()
        .log_session(owner, form(&f), vec![set(f.bench, 1, 10, 50.0)])
        .await
        .unwrap();

    let other = second_trainer(&f).await;
    assert_ne!(other.trainer().id(), owner);
    let err = other
        .progress()
        .session_detail(other.trainer().id(), id)
        .await
        .unwrap_err();
    assert!(matches!(err, ProgressError::SessionNotFound(found) if found == id));

    let detail = f.app.progress().session_detail(owner, id).await.unwrap();
    assert!((detail.totals.total_volume - 500.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn private_template_of_another_trainer_cannot_be_logged() {
    let f = fixture().await;
    let other = second_trainer(&f).await;
    let other_id = other.trainer().id();
    let progress = other.progress();

    let err = progress.start_log(other_id, f.workout).await.unwrap_err();
    assert!(matches!(err, ProgressError::WorkoutNotFound));

    let own_client = other
        .clients()
        .add_client(other_id, ClientDraft::new("Lee Park", "", ""))
        .await
        .unwrap()
        .id();
    let attempt = SessionLogForm {
        client_id: Some(own_client),
        ..form(&f)
    };
    let err = progress
        .log_session(other_id, attempt, vec![set(f.row, 1, 8, 40.0)])
        .await
        .unwrap_err();
    assert!(matches!(err, ProgressError::WorkoutNotFound));
    assert!(
        progress
            .list_sessions_for_client(other_id, own_client)
            .await
            .unwrap()
            .is_empty()
    );
}
