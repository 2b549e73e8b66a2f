use std::fs;

use tempfile::TempDir;

use taskboard::board::Board;
use taskboard::config::Config;
use taskboard::db::{connection, kv_repo, snapshot, SqliteKv, StoreSource};
use taskboard::error::ErrorCode;
use taskboard::models::Role;
use taskboard::notify::{NoticeLog, Route};
use taskboard::session::{CredentialStore, MemoryStore, Session, USER_INFO_KEY};
use taskboard::source::{DataSource, FixtureSource, JsonFileSource};

fn jane() -> taskboard::models::User {
    taskboard::models::User {
        id: "u-02".into(),
        name: "Jane Smith".into(),
        email: "jane@example.com".into(),
        title: "Product Manager".into(),
        role: Role::Manager,
    }
}

// ─── session ───────────────────────────────────────────────────────

#[test]
fn test_session_starts_logged_out() {
    let session = Session::restore(MemoryStore::new()).unwrap();
    assert!(!session.is_authenticated());
    assert!(!session.is_sidebar_open());
}

#[test]
fn test_session_survives_restart() {
    let mut session = Session::restore(MemoryStore::new()).unwrap();
    session.set_credentials(jane()).unwrap();
    let store = session.into_store();

    let session = Session::restore(store).unwrap();
    assert_eq!(session.user(), Some(&jane()));
}

#[test]
fn test_login_requests_dashboard() {
    let mut session = Session::restore(MemoryStore::new()).unwrap();
    let route = session.set_credentials(jane()).unwrap();
    assert_eq!(route, Route::Dashboard);
    assert_eq!(route.path(), "/dashboard");
}

#[test]
fn test_logout_clears_record_and_sidebar() {
    let mut session = Session::restore(MemoryStore::new()).unwrap();
    session.set_credentials(jane()).unwrap();
    session.set_open_sidebar(true);

    let route = session.logout().unwrap();
    assert_eq!(route, Route::Login);
    assert!(!session.is_sidebar_open());
    assert!(session.store().read(USER_INFO_KEY).unwrap().is_none());
}

#[test]
fn test_malformed_record_means_logged_out() {
    let mut store = MemoryStore::new();
    store.write(USER_INFO_KEY, "{not json").unwrap();
    let session = Session::restore(store).unwrap();
    assert!(session.user().is_none());
}

#[test]
fn test_navigation_closes_sidebar() {
    let mut session = Session::restore(MemoryStore::new()).unwrap();
    session.toggle_sidebar();
    assert!(session.is_sidebar_open());
    let route = session.navigate(Route::TaskDetail("t-01".into()));
    assert_eq!(route.path(), "/task/t-01");
    assert!(!session.is_sidebar_open());
}

// ─── data sources ──────────────────────────────────────────────────

#[test]
fn test_json_source_rejects_duplicate_ids() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("seed.json");
    let task = serde_json::json!({
        "id": "x", "title": "One", "date": "2024-01-01",
        "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"
    });
    fs::write(&path, serde_json::json!({ "tasks": [task.clone(), task] }).to_string()).unwrap();

    let err = JsonFileSource::new(&path).load_initial_tasks().unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert!(err.message.contains("Duplicate task id"));
}

#[test]
fn test_json_source_rejects_trashed_at_on_live_task() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("seed.json");
    let task = serde_json::json!({
        "id": "x", "title": "One", "date": "2024-01-01",
        "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z",
        "is_trashed": false, "trashed_at": "2024-02-01T00:00:00Z"
    });
    fs::write(&path, serde_json::json!({ "tasks": [task] }).to_string()).unwrap();

    let err = JsonFileSource::new(&path).load_initial_tasks().unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert_eq!(err.message, "Task x has trashed_at but is not trashed");
}

#[test]
fn test_json_source_reads_file_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("seed.json");
    let user = |id: &str| serde_json::json!({ "id": id, "name": "N", "email": "n@example.com" });
    fs::write(&path, serde_json::json!({ "users": [user("first")] }).to_string()).unwrap();

    let source = JsonFileSource::new(&path);
    assert!(source.load_initial_tasks().unwrap().is_empty());
    fs::write(&path, serde_json::json!({ "users": [user("second")] }).to_string()).unwrap();

    let users = source.load_initial_users().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, "first");
}

#[test]
fn test_json_source_role_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("seed.json");
    fs::write(
        &path,
        r#"{"users": [
            {"id": "a", "name": "A", "email": "a@example.com", "role": "admin"},
            {"id": "b", "name": "B", "email": "b@example.com", "role": "TESTER"},
            {"id": "c", "name": "C", "email": "c@example.com", "role": "Designer"}
        ]}"#,
    )
    .unwrap();
    let roles: Vec<Role> = JsonFileSource::new(&path)
        .load_initial_users()
        .unwrap()
        .iter()
        .map(|u| u.role)
        .collect();
    assert_eq!(roles, vec![Role::Admin, Role::Tester, Role::Designer]);

    fs::write(&path, r#"{"users": [{"id": "a", "name": "A", "email": "a@example.com", "role": "Boss"}]}"#).unwrap();
    let err = JsonFileSource::new(&path).load_initial_users().unwrap_err();
    assert_eq!(err.code, ErrorCode::DataSourceError);
}

#[test]
fn test_json_source_missing_file() {
    let err = JsonFileSource::new("/nonexistent/seed.json")
        .load_initial_tasks()
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DataSourceError);
}

#[test]
fn test_json_source_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("seed.json");
    fs::write(
        &path,
        r#"{"tasks": [{"id": "a", "title": "Only", "date": "2024-05-01",
            "created_at": "2024-05-01T00:00:00Z", "updated_at": "2024-05-01T00:00:00Z",
            "subtasks": [{"id": "s", "title": "Sub", "date": "2024-05-01T00:00:00Z"}]}]}"#,
    )
    .unwrap();
    let tasks = JsonFileSource::new(&path).load_initial_tasks().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].subtasks[0].tag, "general");
    assert!(!tasks[0].is_trashed);
}

// ─── config ────────────────────────────────────────────────────────

#[test]
fn test_config_defaults_when_missing() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(&dir.path().join("config.json")).unwrap();
    assert_eq!(config.retention_days, 30);
    assert_eq!(config.recent_limit, 5);
}

#[test]
fn test_config_partial_and_invalid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"recent_limit": 2}"#).unwrap();
    let config = Config::load(&path).unwrap();
    assert_eq!((config.retention_days, config.recent_limit), (30, 2));

    fs::write(&path, r#"{"retention_days": -1}"#).unwrap();
    assert_eq!(Config::load(&path).unwrap_err().code, ErrorCode::ConfigError);

    fs::write(&path, "nope").unwrap();
    assert_eq!(Config::load(&path).unwrap_err().code, ErrorCode::ConfigError);
}

#[test]
fn test_config_rejects_out_of_range_retention() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"retention_days": 1000000000000000}"#).unwrap();
    let err = Config::load(&path).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigError);
    assert!(err.message.contains("out of range"));

    fs::write(&path, r#"{"retention_days": 100000000}"#).unwrap();
    let config = Config::load(&path).unwrap();
    assert_eq!(config.retention().unwrap().num_days(), 100_000_000);
}

// ─── database ──────────────────────────────────────────────────────

#[test]
fn test_snapshot_round_trip_keeps_order() {
    let conn = connection::open_in_memory().unwrap();
    let mut board = Board::load(&FixtureSource, NoticeLog::new()).unwrap();
    board.delete_task("t-03").unwrap();
    board.remove_user("u-05").unwrap();
    snapshot::save(&conn, board.tasks().tasks(), board.users().users()).unwrap();

    let resumed = Board::resume(&StoreSource::new(&conn), NoticeLog::new()).unwrap();
    assert_eq!(resumed.tasks().tasks(), board.tasks().tasks());
    assert_eq!(resumed.users().users(), board.users().users());
    assert!(resumed.users().get("u-05").is_none());
    assert!(resumed.tasks().get("t-03").unwrap().is_trashed);
}

#[test]
fn test_kv_store_backs_session() {
    let conn = connection::open_in_memory().unwrap();
    let mut session = Session::restore(SqliteKv::new(&conn)).unwrap();
    session.set_credentials(jane()).unwrap();
    assert!(kv_repo::get(&conn, USER_INFO_KEY).unwrap().is_some());

    let mut session = Session::restore(SqliteKv::new(&conn)).unwrap();
    assert_eq!(session.user().map(|u| u.id.as_str()), Some("u-02"));
    session.logout().unwrap();
    assert!(kv_repo::get(&conn, USER_INFO_KEY).unwrap().is_none());
}
