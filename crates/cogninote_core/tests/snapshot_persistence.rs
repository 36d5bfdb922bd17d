use cogninote_core::db::open_db;
use cogninote_core::{
    seed_store, Snapshot, SnapshotLoad, SnapshotRepository, SqliteSnapshotRepository,
    WorkspaceService,
};
use rusqlite::Connection;

fn put_raw(conn: &Connection, key: &str, value: &str) {
    conn.execute(
        "INSERT INTO snapshot_kv (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
        [key, value],
    )
    .unwrap();
}

#[test]
fn missing_snapshot_seeds_first_run_data() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("cogninote.db")).unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    assert!(matches!(
        repo.load_snapshot().unwrap(),
        SnapshotLoad::Missing
    ));

    let workspace = WorkspaceService::open(repo).unwrap();
    assert_eq!(workspace.store(), &seed_store());
}

#[test]
fn saved_snapshot_round_trips_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cogninote.db");

    let note_id;
    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
        let mut workspace = WorkspaceService::open(repo).unwrap();
        workspace.begin_session().unwrap();

        let (created, _) = workspace
            .create_note("p1", "b2", Some("Field notes"), Some("[ ] verify data"))
            .unwrap();
        workspace.move_note_to_branch("n1", "p1", "b2").unwrap();
        note_id = created;
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let workspace = WorkspaceService::open(repo).unwrap();
    let store = workspace.store();

    assert_eq!(store.active_note_id(), Some(note_id.as_str()));
    let note = store.note(&note_id).unwrap();
    assert_eq!(note.title, "Field notes");
    let branch = store.project("p1").unwrap().branch("b2").unwrap();
    assert!(branch.notes.contains(&note_id));
    assert!(branch.notes.contains(&"n1".to_string()));
    assert!(workspace.session_active());
}

#[test]
fn undecodable_payload_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("cogninote.db")).unwrap();

    put_raw(&conn, "cogni_projects", "{not json");
    put_raw(&conn, "cogni_notes", "[]");

    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    match repo.load_snapshot().unwrap() {
        SnapshotLoad::Invalid(reason) => assert!(reason.contains("cogni_projects")),
        other => panic!("expected invalid load, got {other:?}"),
    }

    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let workspace = WorkspaceService::open(repo).unwrap();
    assert_eq!(workspace.store(), &seed_store());
}

#[test]
fn unsupported_envelope_version_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("cogninote.db")).unwrap();

    put_raw(&conn, "cogni_projects", r#"{"version":99,"data":[]}"#);
    put_raw(&conn, "cogni_notes", r#"{"version":99,"data":[]}"#);

    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    match repo.load_snapshot().unwrap() {
        SnapshotLoad::Invalid(reason) => assert!(reason.contains("version 99")),
        other => panic!("expected invalid load, got {other:?}"),
    }

    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let workspace = WorkspaceService::open(repo).unwrap();
    assert_eq!(workspace.store(), &seed_store());
}

#[test]
fn missing_active_note_key_falls_back_to_front_note() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("cogninote.db")).unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    let snapshot = Snapshot {
        active_note_id: None,
        ..seed_store().to_snapshot()
    };
    repo.save_snapshot(&snapshot).unwrap();

    let workspace = WorkspaceService::open(repo).unwrap();
    assert_eq!(workspace.store().active_note_id(), Some("n1"));
}

#[test]
fn stale_active_note_id_falls_back_to_front_note() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("cogninote.db")).unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    let snapshot = Snapshot {
        active_note_id: Some("n-deleted-elsewhere".to_string()),
        ..seed_store().to_snapshot()
    };
    repo.save_snapshot(&snapshot).unwrap();

    let workspace = WorkspaceService::open(repo).unwrap();
    assert_eq!(workspace.store().active_note_id(), Some("n1"));
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteSnapshotRepository::try_new(&conn).unwrap_err();
    assert!(err.to_string().contains("schema version"));
}
