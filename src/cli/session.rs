use serde_json::json;

use crate::cli::commands::SessionCommands;
use crate::cli::{finish, Workspace};
use crate::error::TaskboardError;
use crate::notify::{Level, Notice, NoticeLog, Notifier};
use crate::output;

pub fn run(cmd: SessionCommands, json_output: bool) -> i32 {
    let mut notices = NoticeLog::new();
    let result = match cmd {
        SessionCommands::Login { user_id } => run_login(&mut notices, &user_id, json_output),
        SessionCommands::Logout => run_logout(&mut notices, json_output),
        SessionCommands::Whoami => run_whoami(json_output),
    };
    finish(result, json_output, notices.notices())
}

fn run_login(notices: &mut NoticeLog, user_id: &str, json_output: bool) -> Result<i32, TaskboardError> {
    let ws = Workspace::open()?;
    let mut scratch = NoticeLog::new();
    let board = ws.board(&mut scratch)?;
    let user = board
        .users()
        .get(user_id)
        .cloned()
        .ok_or_else(|| TaskboardError::user_not_found(user_id))?;

    let mut session = ws.session()?;
    let route = session.set_credentials(user.clone())?;
    notices.success(format!("Logged in as {}", user.name));

    output::emit_success(
        json_output,
        json!({
            "user": output::json::user_json(&user),
            "navigate": output::json::route_json(&route)
        }),
        notices.notices(),
        || {},
    );
    Ok(0)
}

fn run_logout(notices: &mut NoticeLog, json_output: bool) -> Result<i32, TaskboardError> {
    let ws = Workspace::open()?;
    let mut session = ws.session()?;
    let was = session.user().map(|u| u.name.clone());
    let route = session.logout()?;
    match was {
        Some(name) => notices.success(format!("{name} logged out")),
        None => notices.notify(Notice::new(Level::Info, "Not logged in")),
    }

    output::emit_success(
        json_output,
        json!({ "navigate": output::json::route_json(&route) }),
        notices.notices(),
        || {},
    );
    Ok(0)
}

fn run_whoami(json_output: bool) -> Result<i32, TaskboardError> {
    let ws = Workspace::open()?;
    let session = ws.session()?;
    let user = session.user().ok_or_else(TaskboardError::not_logged_in)?;

    output::emit_success(
        json_output,
        json!({ "user": output::json::user_json(user) }),
        &[],
        || output::text::print_user(user),
    );
    Ok(0)
}
