use serde_json::json;

use crate::board::Board;
use crate::cli::commands::{SubtaskCommands, TaskCommands};
use crate::cli::{finish, parse_date, parse_priority, parse_stage, Workspace};
use crate::error::TaskboardError;
use crate::filter::{StatusFilter, TaskFilter};
use crate::models::{NewTask, TaskPatch};
use crate::notify::{NoticeLog, Notifier};
use crate::output;

pub fn run(cmd: TaskCommands, json_output: bool) -> i32 {
    let mut notices = NoticeLog::new();
    let result = match cmd {
        TaskCommands::Add { title, priority, stage, date } => run_add(
            &mut notices,
            title,
            priority.as_deref(),
            stage.as_deref(),
            date.as_deref(),
            json_output,
        ),
        TaskCommands::List { status, search } => run_list(&status, &search, json_output),
        TaskCommands::Show { id } => run_show(&id, json_output),
        TaskCommands::Edit { id, title, priority, stage, date } => {
            let patch = build_patch(title, priority.as_deref(), stage.as_deref(), date.as_deref());
            patch.and_then(|patch| run_edit(&mut notices, &id, patch, json_output))
        }
        TaskCommands::Stage { id, stage } => run_stage(&mut notices, &id, &stage, json_output),
        TaskCommands::Delete { id } => run_delete(&mut notices, &id, json_output),
        TaskCommands::Subtask(sub) => run_subtask(&mut notices, sub, json_output),
    };
    finish(result, json_output, notices.notices())
}

fn run_add(
    notices: &mut NoticeLog,
    title: String,
    priority: Option<&str>,
    stage: Option<&str>,
    date: Option<&str>,
    json_output: bool,
) -> Result<i32, TaskboardError> {
    // Parse every option before touching storage to fail fast
    let input = NewTask {
        title,
        priority: parse_priority(priority)?,
        stage: parse_stage(stage)?,
        date: parse_date(date)?,
    };

    let ws = Workspace::open()?;
    let mut board = ws.board(notices)?;
    let task = board.create_task(input)?;
    ws.save(&board)?;

    output::emit_success(
        json_output,
        json!({ "task": output::json::task_summary(&task) }),
        board.notifier().notices(),
        || println!("Added task: {} ({})", task.title, task.id),
    );
    Ok(0)
}

fn run_list(status: &str, search: &str, json_output: bool) -> Result<i32, TaskboardError> {
    let filter = TaskFilter::active()
        .with_status(StatusFilter::parse(status)?)
        .with_search(search);

    let ws = Workspace::open()?;
    let mut notices = NoticeLog::new();
    let board = ws.board(&mut notices)?;
    let tasks = board.view(&filter);

    output::emit_success(
        json_output,
        json!({
            "status": filter.status.as_str(),
            "count": tasks.len(),
            "tasks": tasks.iter().map(|t| output::json::task_summary(t)).collect::<Vec<_>>()
        }),
        &[],
        || output::text::print_task_list(&tasks),
    );
    Ok(0)
}

fn run_show(id: &str, json_output: bool) -> Result<i32, TaskboardError> {
    let ws = Workspace::open()?;
    let mut notices = NoticeLog::new();
    let board = ws.board(&mut notices)?;
    let task = board
        .tasks()
        .get(id)
        .ok_or_else(|| TaskboardError::task_not_found(id))?;

    output::emit_success(
        json_output,
        json!({ "task": output::json::task_detail(task) }),
        &[],
        || output::text::print_task(task),
    );
    Ok(0)
}

fn build_patch(
    title: Option<String>,
    priority: Option<&str>,
    stage: Option<&str>,
    date: Option<&str>,
) -> Result<TaskPatch, TaskboardError> {
    let patch = TaskPatch {
        title,
        priority: parse_priority(priority)?,
        stage: parse_stage(stage)?,
        date: parse_date(date)?,
        ..TaskPatch::default()
    };
    if patch.is_empty() {
        return Err(TaskboardError::validation(
            "Nothing to update. Pass at least one of --title, --priority, --stage, --date",
        ));
    }
    Ok(patch)
}

fn run_edit(notices: &mut NoticeLog, id: &str, patch: TaskPatch, json_output: bool) -> Result<i32, TaskboardError> {
    let ws = Workspace::open()?;
    let mut board = ws.board(notices)?;
    let task = board
        .update_task(id, patch)?
        .ok_or_else(|| TaskboardError::task_not_found(id))?;
    ws.save(&board)?;

    output::emit_success(
        json_output,
        json!({ "task": output::json::task_summary(&task) }),
        board.notifier().notices(),
        || output::text::print_task(&task),
    );
    Ok(0)
}

fn run_stage(notices: &mut NoticeLog, id: &str, stage: &str, json_output: bool) -> Result<i32, TaskboardError> {
    let ws = Workspace::open()?;
    let mut board = ws.board(notices)?;
    let task = board
        .change_stage(id, stage)?
        .ok_or_else(|| TaskboardError::task_not_found(id))?;
    ws.save(&board)?;

    output::emit_success(
        json_output,
        json!({ "task": output::json::task_summary(&task) }),
        board.notifier().notices(),
        || {},
    );
    Ok(0)
}

fn run_delete(notices: &mut NoticeLog, id: &str, json_output: bool) -> Result<i32, TaskboardError> {
    let ws = Workspace::open()?;
    let mut board = ws.board(notices)?;
    let trashed = board
        .delete_task(id)
        .ok_or_else(|| TaskboardError::task_not_found(id))?;
    ws.save(&board)?;

    output::emit_success(
        json_output,
        json!({
            "task": output::json::task_summary(&trashed.task),
            "navigate": output::json::route_json(&trashed.navigate)
        }),
        board.notifier().notices(),
        || {},
    );
    Ok(0)
}

fn run_subtask(notices: &mut NoticeLog, cmd: SubtaskCommands, json_output: bool) -> Result<i32, TaskboardError> {
    let ws = Workspace::open()?;
    let mut board = ws.board(notices)?;

    let (task_id, subtask) = match cmd {
        SubtaskCommands::Add { task_id, title } => {
            if board.tasks().get(&task_id).is_none() {
                return Err(TaskboardError::task_not_found(&task_id));
            }
            // A blank title only produces a warning; the task stays unchanged.
            let added = board.add_subtask(&task_id, &title);
            (task_id, added)
        }
        SubtaskCommands::Toggle { task_id, subtask_id } => {
            let toggled = board
                .toggle_subtask(&task_id, &subtask_id)
                .ok_or_else(|| missing_subtask(&board, &task_id, &subtask_id))?;
            (task_id, Some(toggled))
        }
        SubtaskCommands::Remove { task_id, subtask_id } => {
            let removed = board
                .remove_subtask(&task_id, &subtask_id)
                .ok_or_else(|| missing_subtask(&board, &task_id, &subtask_id))?;
            (task_id, Some(removed))
        }
    };

    if subtask.is_some() {
        ws.save(&board)?;
    }

    output::emit_success(
        json_output,
        json!({
            "task_id": task_id,
            "subtask": subtask.as_ref().map(output::json::subtask_json)
        }),
        board.notifier().notices(),
        || {},
    );
    Ok(0)
}

fn missing_subtask<N: Notifier>(board: &Board<N>, task_id: &str, subtask_id: &str) -> TaskboardError {
    if board.tasks().get(task_id).is_none() {
        TaskboardError::task_not_found(task_id)
    } else {
        TaskboardError::subtask_not_found(subtask_id)
    }
}
