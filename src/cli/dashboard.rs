use serde_json::json;

use crate::cli::{finish, Workspace};
use crate::error::TaskboardError;
use crate::notify::NoticeLog;
use crate::output;

pub fn run(json_output: bool) -> i32 {
    finish(run_inner(json_output), json_output, &[])
}

fn run_inner(json_output: bool) -> Result<i32, TaskboardError> {
    let ws = Workspace::open()?;
    let mut notices = NoticeLog::new();
    let board = ws.board(&mut notices)?;
    let summary = board.summary();
    let recent = board.recent(ws.config.recent_limit);

    let session = ws.session()?;
    let greeting = session.user().map(|u| u.name.clone());

    output::emit_success(
        json_output,
        json!({
            "user": greeting,
            "summary": output::json::summary_json(&summary),
            "recent": recent.iter().map(|t| output::json::task_summary(t)).collect::<Vec<_>>()
        }),
        &[],
        || {
            if let Some(name) = &greeting {
                println!("Welcome back, {name}");
                println!();
            }
            output::text::print_summary(&summary);
            println!();
            println!("Recent tasks:");
            output::text::print_task_list(&recent);
        },
    );
    Ok(0)
}
