use std::path::Path;

use serde_json::json;
use tracing::info;

use crate::board::Board;
use crate::cli::finish;
use crate::config::Config;
use crate::db::{connection, snapshot, task_repo, user_repo};
use crate::error::TaskboardError;
use crate::notify::NoticeLog;
use crate::output;
use crate::source::{DataSource, FixtureSource, JsonFileSource};

pub fn run(seed: Option<&Path>, json_output: bool) -> i32 {
    finish(run_inner(seed, json_output), json_output, &[])
}

fn run_inner(seed: Option<&Path>, json_output: bool) -> Result<i32, TaskboardError> {
    let (path, existed) = connection::init_db()?;
    let conn = connection::open_db()?;

    let config_path = connection::config_path()?;
    if !config_path.exists() {
        Config::default().save(&config_path)?;
    }

    // Seeding only happens on an empty workspace; existing data is kept.
    let empty = task_repo::count_tasks(&conn)? == 0 && user_repo::list_users(&conn)?.is_empty();
    let seeded = if empty {
        let source: Box<dyn DataSource> = match seed {
            Some(file) => Box::new(JsonFileSource::new(file)),
            None => Box::new(FixtureSource),
        };
        let board = Board::load(source.as_ref(), NoticeLog::new())?;
        snapshot::save(&conn, board.tasks().tasks(), board.users().users())?;
        info!(path = %path.display(), "workspace seeded");
        true
    } else {
        false
    };

    let tasks = task_repo::count_tasks(&conn)?;
    let users = user_repo::list_users(&conn)?.len();

    output::emit_success(
        json_output,
        json!({
            "path": path.to_string_lossy(),
            "already_initialized": existed,
            "seeded": seeded,
            "tasks": tasks,
            "users": users
        }),
        &[],
        || {
            println!("Initialized taskboard at {}", path.display());
            if seeded {
                println!("Seeded {tasks} task(s) and {users} user(s)");
            }
        },
    );
    Ok(0)
}
