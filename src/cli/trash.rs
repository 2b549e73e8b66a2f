use chrono::{Duration, Utc};
use serde_json::json;

use crate::board::Board;
use crate::cli::commands::TrashCommands;
use crate::cli::{finish, Workspace};
use crate::error::TaskboardError;
use crate::filter::TaskFilter;
use crate::notify::{NoticeLog, Notifier};
use crate::output;
use crate::trash::Selection;

pub fn run(cmd: TrashCommands, json_output: bool) -> i32 {
    let mut notices = NoticeLog::new();
    let result = match cmd {
        TrashCommands::List { search } => run_list(&search, json_output),
        TrashCommands::Restore { ids, all, search } => {
            run_restore(&mut notices, &ids, all, &search, json_output)
        }
        TrashCommands::Delete { ids, all, search } => {
            run_delete(&mut notices, &ids, all, &search, json_output)
        }
        TrashCommands::Empty => run_empty(&mut notices, json_output),
        TrashCommands::Purge { older_than_days } => run_purge(&mut notices, older_than_days, json_output),
    };
    finish(result, json_output, notices.notices())
}

fn run_list(search: &str, json_output: bool) -> Result<i32, TaskboardError> {
    let ws = Workspace::open()?;
    let mut notices = NoticeLog::new();
    let board = ws.board(&mut notices)?;
    let trashed = board.view(&TaskFilter::trash().with_search(search));

    output::emit_success(
        json_output,
        json!({
            "count": trashed.len(),
            "retention_days": ws.config.retention_days,
            "tasks": trashed.iter().map(|t| output::json::task_summary(t)).collect::<Vec<_>>()
        }),
        &[],
        || {
            println!(
                "Deleted tasks ({}). Items in trash are removed after {} days.",
                trashed.len(),
                ws.config.retention_days
            );
            output::text::print_trash_list(&trashed);
        },
    );
    Ok(0)
}

/// Build the selection for a batch command. With `--all`, everything visible
/// under the search term is selected; otherwise the explicit ids.
fn select<N: Notifier>(board: &Board<N>, ids: &[String], all: bool, search: &str) -> Selection {
    let mut selection = Selection::new();
    if all {
        selection.select_all(&board.view(&TaskFilter::trash().with_search(search)));
    }
    for id in ids {
        selection.select(id.as_str());
    }
    selection
}

fn run_restore(
    notices: &mut NoticeLog,
    ids: &[String],
    all: bool,
    search: &str,
    json_output: bool,
) -> Result<i32, TaskboardError> {
    let ws = Workspace::open()?;
    let mut board = ws.board(notices)?;
    let mut selection = select(&board, ids, all, search);
    let restored = board.restore_selected(&mut selection)?;
    ws.save(&board)?;

    output::emit_success(
        json_output,
        json!({ "restored": restored }),
        board.notifier().notices(),
        || {},
    );
    Ok(0)
}

fn run_delete(
    notices: &mut NoticeLog,
    ids: &[String],
    all: bool,
    search: &str,
    json_output: bool,
) -> Result<i32, TaskboardError> {
    let ws = Workspace::open()?;
    let mut board = ws.board(notices)?;
    let mut selection = select(&board, ids, all, search);
    let deleted = board.delete_selected(&mut selection)?;
    ws.save(&board)?;

    output::emit_success(
        json_output,
        json!({ "deleted": deleted.iter().map(|t| t.id.as_str()).collect::<Vec<_>>() }),
        board.notifier().notices(),
        || {},
    );
    Ok(0)
}

fn run_empty(notices: &mut NoticeLog, json_output: bool) -> Result<i32, TaskboardError> {
    let ws = Workspace::open()?;
    let mut board = ws.board(notices)?;
    let removed = board.empty_trash(&mut Selection::new());
    ws.save(&board)?;

    output::emit_success(
        json_output,
        json!({ "deleted": removed.len() }),
        board.notifier().notices(),
        || {},
    );
    Ok(0)
}

fn run_purge(notices: &mut NoticeLog, older_than_days: Option<i64>, json_output: bool) -> Result<i32, TaskboardError> {
    let ws = Workspace::open()?;
    let (days, retention) = match older_than_days {
        Some(days) if days < 0 => {
            return Err(TaskboardError::validation("--older-than-days must not be negative"));
        }
        Some(days) => {
            let retention = Duration::try_days(days).ok_or_else(|| {
                TaskboardError::validation(format!("--older-than-days {days} is out of range"))
            })?;
            (days, retention)
        }
        None => (ws.config.retention_days, ws.config.retention()?),
    };

    let mut board = ws.board(notices)?;
    let purged = board.purge_expired(retention, Utc::now());
    ws.save(&board)?;

    output::emit_success(
        json_output,
        json!({
            "retention_days": days,
            "purged": purged.iter().map(|t| t.id.as_str()).collect::<Vec<_>>()
        }),
        board.notifier().notices(),
        || {},
    );
    Ok(0)
}
