use serde_json::json;

use crate::cli::commands::UserCommands;
use crate::cli::{finish, parse_role, Workspace};
use crate::error::TaskboardError;
use crate::models::{NewUser, UserPatch};
use crate::notify::NoticeLog;
use crate::output;

pub fn run(cmd: UserCommands, json_output: bool) -> i32 {
    let mut notices = NoticeLog::new();
    let result = match cmd {
        UserCommands::List { search } => run_list(&search, json_output),
        UserCommands::Add { name, email, title, role } => {
            parse_role(role.as_deref()).and_then(|role| {
                let input = NewUser { name, email, title, role };
                run_add(&mut notices, input, json_output)
            })
        }
        UserCommands::Edit { id, name, email, title, role } => {
            parse_role(role.as_deref()).and_then(|role| {
                let patch = UserPatch { name, email, title, role };
                run_edit(&mut notices, &id, patch, json_output)
            })
        }
        UserCommands::Remove { id } => run_remove(&mut notices, &id, json_output),
    };
    finish(result, json_output, notices.notices())
}

fn run_list(search: &str, json_output: bool) -> Result<i32, TaskboardError> {
    let ws = Workspace::open()?;
    let mut notices = NoticeLog::new();
    let board = ws.board(&mut notices)?;
    let users = board.users().search(search);

    output::emit_success(
        json_output,
        json!({
            "count": users.len(),
            "users": users.iter().map(|u| output::json::user_json(u)).collect::<Vec<_>>()
        }),
        &[],
        || output::text::print_user_list(&users),
    );
    Ok(0)
}

fn run_add(notices: &mut NoticeLog, input: NewUser, json_output: bool) -> Result<i32, TaskboardError> {
    let ws = Workspace::open()?;
    let mut board = ws.board(notices)?;
    let user = board.add_user(input)?;
    ws.save(&board)?;

    output::emit_success(
        json_output,
        json!({ "user": output::json::user_json(&user) }),
        board.notifier().notices(),
        || output::text::print_user(&user),
    );
    Ok(0)
}

fn run_edit(notices: &mut NoticeLog, id: &str, patch: UserPatch, json_output: bool) -> Result<i32, TaskboardError> {
    if patch.name.is_none() && patch.email.is_none() && patch.title.is_none() && patch.role.is_none() {
        return Err(TaskboardError::validation(
            "Nothing to update. Pass at least one of --name, --email, --title, --role",
        ));
    }

    let ws = Workspace::open()?;
    let mut board = ws.board(notices)?;
    let user = board
        .edit_user(id, patch)?
        .ok_or_else(|| TaskboardError::user_not_found(id))?;
    ws.save(&board)?;

    output::emit_success(
        json_output,
        json!({ "user": output::json::user_json(&user) }),
        board.notifier().notices(),
        || output::text::print_user(&user),
    );
    Ok(0)
}

fn run_remove(notices: &mut NoticeLog, id: &str, json_output: bool) -> Result<i32, TaskboardError> {
    let ws = Workspace::open()?;
    let mut board = ws.board(notices)?;
    let user = board
        .remove_user(id)
        .ok_or_else(|| TaskboardError::user_not_found(id))?;
    ws.save(&board)?;

    output::emit_success(
        json_output,
        json!({ "removed": output::json::user_json(&user) }),
        board.notifier().notices(),
        || {},
    );
    Ok(0)
}
