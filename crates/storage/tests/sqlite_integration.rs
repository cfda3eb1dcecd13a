use chrono::Duration;
use storage::repository::{
    AssignmentRepository, ClientOrder, ClientRepository, ExerciseRepository, NewExerciseRecord,
    NewSetLogRecord, NewTrainerRecord, NewWorkoutRecord, SessionRepository, StorageError,
    TrainerRepository, WorkoutRepository,
};
use storage::sqlite::SqliteRepository;
use trainer_core::model::{
    ClientDraft, ClientId, Difficulty, ExerciseDraft, ExerciseId, PrescriptionDraft, SessionDraft,
    SessionId, SessionStatus, Trainer, WorkoutDraft, WorkoutId,
};
use trainer_core::time::fixed_now;
use uuid::Uuid;

async fn connect(name: &str) -> SqliteRepository {
    let repo = SqliteRepository::connect(&format!("sqlite:file:{name}?mode=memory&cache=shared"))
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

async fn trainer(repo: &SqliteRepository) -> Trainer {
    repo.insert_trainer(NewTrainerRecord {
        user_ref: Uuid::new_v4(),
        email: "test@gymble.com".into(),
        name: "Test".into(),
        created_at: fixed_now(),
    })
    .await
    .expect("trainer")
}

async fn exercise(repo: &SqliteRepository, name: &str, group: &str) -> ExerciseId {
    let ex = ExerciseDraft {
        name: name.into(),
        muscle_group: group.into(),
        equipment: "Barbell".into(),
        difficulty: "Intermediate".into(),
    }
    .validate(ExerciseId::new(0))
    .unwrap();
    repo.insert_exercise(NewExerciseRecord::from_exercise(&ex))
        .await
        .expect("exercise")
}

async fn workout(repo: &SqliteRepository, exercises: &[ExerciseId]) -> WorkoutId {
    let (w, rows) = WorkoutDraft {
        name: "Push Day".into(),
        difficulty: "advanced".into(),
        exercises: exercises
            .iter()
            .map(|id| PrescriptionDraft::for_exercise(*id))
            .collect(),
        ..WorkoutDraft::default()
    }
    .validate(None, fixed_now())
    .unwrap();
    repo.insert_workout(NewWorkoutRecord::from_workout(&w, rows))
        .await
        .expect("workout")
}

fn set(exercise_id: ExerciseId, n: i32, reps: Option<u32>, kg: Option<f64>) -> NewSetLogRecord {
    NewSetLogRecord {
        exercise_id,
        prescription_id: None,
        set_number: n,
        reps_completed: reps,
        weight_kg: kg,
    }
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");
    assert!(repo.list_exercises().await.unwrap().is_empty());
}

#[tokio::test]
async fn trainer_email_is_unique() {
    let repo = connect("memdb_trainer_unique").await;
    let coach = trainer(&repo).await;
    let found = repo
        .find_trainer_by_email("test@gymble.com")
        .await
        .unwrap()
        .expect("found");
    assert_eq!(found.id(), coach.id());
    assert_eq!(found.user_ref(), coach.user_ref());

    let err = repo
        .insert_trainer(NewTrainerRecord {
            user_ref: Uuid::new_v4(),
            email: "test@gymble.com".into(),
            name: "Dup".into(),
            created_at: fixed_now(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict));
}

#[tokio::test]
async fn clients_list_update_and_order() {
    let repo = connect("memdb_clients").await;
    let coach = trainer(&repo).await;

    for (i, name) in ["Zoe", "Adam", "Mia"].iter().enumerate() {
        repo.insert_client(
            coach.id(),
            ClientDraft::new(*name, "", "").validate().unwrap(),
            fixed_now() + Duration::minutes(i64::try_from(i).unwrap()),
        )
        .await
        .unwrap();
    }

    let by_name = repo
        .list_clients(coach.id(), ClientOrder::NameAsc, 10)
        .await
        .unwrap();
    let names: Vec<_> = by_name.iter().map(|c| c.name().to_owned()).collect();
    assert_eq!(names, vec!["Adam", "Mia", "Zoe"]);

    let newest = repo
        .list_clients(coach.id(), ClientOrder::NewestFirst, 2)
        .await
        .unwrap();
    assert_eq!(newest.len(), 2);
    assert_eq!(newest[0].name(), "Mia");

    let edited = newest[0].with_fields(
        ClientDraft::new("Mia Wong", "mia@example.com", "555")
            .validate()
            .unwrap(),
    );
    repo.update_client(&edited).await.unwrap();
    let fetched = repo.get_client(edited.id()).await.unwrap().unwrap();
    assert_eq!(fetched.email(), Some("mia@example.com"));

    let missing = repo.delete_client(ClientId::new(9_999)).await.unwrap_err();
    assert!(matches!(missing, StorageError::NotFound));
}

#[tokio::test]
async fn workout_template_round_trips_prescriptions() {
    let repo = connect("memdb_workouts").await;
    let squat = exercise(&repo, "Back Squat", "Legs").await;
    let bench = exercise(&repo, "Bench Press", "Chest").await;
    let wid = workout(&repo, &[squat, bench]).await;

    let fetched = repo.get_workout(wid).await.unwrap().unwrap();
    assert_eq!(fetched.name(), "Push Day");
    assert_eq!(fetched.difficulty(), Some(&Difficulty::Advanced));

    let rows = repo.list_prescriptions(wid).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].exercise_id, squat);
    assert_eq!(rows[0].order_index, 1);
    assert_eq!(rows[1].order_index, 2);
    assert_eq!(rows[1].reps, "8–12");

    let listed = repo.list_workouts(None, 10).await.unwrap();
    assert_eq!(listed.len(), 1);
    let library = repo.list_exercises().await.unwrap();
    assert_eq!(library[0].name(), "Back Squat");
}

#[tokio::test]
async fn workout_with_unknown_exercise_is_rolled_back() {
    let repo = connect("memdb_workout_rollback").await;
    let squat = exercise(&repo, "Back Squat", "Legs").await;
    let (w, rows) = WorkoutDraft {
        name: "Broken".into(),
        exercises: vec![
            PrescriptionDraft::for_exercise(squat),
            PrescriptionDraft::for_exercise(ExerciseId::new(404)),
        ],
        ..WorkoutDraft::default()
    }
    .validate(None, fixed_now())
    .unwrap();

    let err = repo
        .insert_workout(NewWorkoutRecord::from_workout(&w, rows))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict));
    assert!(repo.list_workouts(None, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn session_and_sets_are_recorded_together() {
    let repo = connect("memdb_sessions").await;
    let coach = trainer(&repo).await;
    let client = repo
        .insert_client(
            coach.id(),
            ClientDraft::new("Sam", "", "").validate().unwrap(),
            fixed_now(),
        )
        .await
        .unwrap();
    let bench = exercise(&repo, "Bench Press", "Chest").await;
    let row = exercise(&repo, "Row", "Back").await;
    let wid = workout(&repo, &[bench, row]).await;

    let draft = |offset: i64| {
        SessionDraft {
            client_id: client.id(),
            workout_id: wid,
            started_at: fixed_now() + Duration::days(offset),
            completed_at: Some(fixed_now() + Duration::days(offset) + Duration::minutes(60)),
            duration_minutes: Some(60),
            notes: "Solid".into(),
        }
        .validate()
        .unwrap()
    };

    let older = repo
        .record_session(
            draft(0),
            vec![
                set(row, 2, Some(10), Some(50.0)),
                set(bench, 1, Some(8), None),
                set(row, 1, Some(10), Some(50.0)),
            ],
        )
        .await
        .unwrap();
    let newer = repo.record_session(draft(1), Vec::new()).await.unwrap();

    let sessions = repo.list_sessions_for_client(client.id()).await.unwrap();
    assert_eq!(
        sessions.iter().map(|s| s.id()).collect::<Vec<_>>(),
        vec![newer, older]
    );
    assert_eq!(sessions[1].status(), SessionStatus::Completed);
    assert_eq!(sessions[1].notes(), Some("Solid"));

    let logs = repo.list_set_logs(older).await.unwrap();
    assert_eq!(logs.len(), 3);
    assert_eq!(logs[0].exercise_id, row);
    assert_eq!(logs[0].set_number, 2);
    assert_eq!(logs[1].weight_kg, None);

    // a bad set log must not leave an orphaned session behind
    let err = repo
        .record_session(draft(2), vec![set(ExerciseId::new(777), 1, Some(1), Some(1.0))])
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict));
    assert_eq!(repo.list_sessions_for_client(client.id()).await.unwrap().len(), 2);

    let view = repo.load_session_view(older).await.unwrap().expect("view");
    assert_eq!(view.client_name.as_deref(), Some("Sam"));
    assert_eq!(view.workout_name.as_deref(), Some("Push Day"));
    assert_eq!(view.logs.len(), 3);
    assert_eq!(view.logs[0].exercise_id, row);
    assert_eq!(view.lookup[&bench].name, "Bench Press");
    assert_eq!(view.lookup[&row].muscle_group.as_deref(), Some("Back"));

    let empty = repo.load_session_view(newer).await.unwrap().expect("empty view");
    assert!(empty.logs.is_empty());
    assert!(empty.lookup.is_empty());
    assert!(repo.load_session_view(SessionId::new(4_242)).await.unwrap().is_none());

    repo.assign_workout(client.id(), wid, fixed_now()).await.unwrap();
    assert_eq!(repo.list_active_assignments(client.id()).await.unwrap().len(), 1);

    repo.delete_client(client.id()).await.unwrap();
    assert!(repo.get_session(older).await.unwrap().is_none());
    assert!(repo.list_set_logs(older).await.unwrap().is_empty());
    assert!(repo.list_active_assignments(client.id()).await.unwrap().is_empty());
}
