use serde_json::{json, Value};

use crate::error::TaskboardError;
use crate::models::{Subtask, Task, User};
use crate::notify::{Notice, Route};
use crate::summary::TaskSummary;

pub fn success(data: Value, notices: &[Notice]) -> Value {
    json!({
        "success": true,
        "data": data,
        "notices": notices_json(notices)
    })
}

pub fn error(err: &TaskboardError, notices: &[Notice]) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        },
        "notices": notices_json(notices)
    })
}

fn notices_json(notices: &[Notice]) -> Value {
    json!(notices
        .iter()
        .map(|n| json!({ "level": n.level.as_str(), "message": n.message }))
        .collect::<Vec<_>>())
}

pub fn summary_json(s: &TaskSummary) -> Value {
    json!({
        "total": s.total,
        "todo": s.todo,
        "in_progress": s.in_progress,
        "completed": s.completed,
        "percentage": (s.percentage * 10.0).round() / 10.0
    })
}

pub fn task_summary(t: &Task) -> Value {
    let mut v = json!({
        "id": t.id,
        "title": t.title,
        "priority": t.priority.as_str(),
        "stage": t.stage.as_str(),
        "date": t.date.to_string(),
        "team_size": t.team.len(),
        "subtasks": t.subtasks.len(),
        "is_trashed": t.is_trashed
    });
    if let Some(at) = t.trashed_at {
        v["trashed_at"] = json!(at.to_rfc3339());
    }
    v
}

pub fn task_detail(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "priority": t.priority.as_str(),
        "stage": t.stage.as_str(),
        "date": t.date.to_string(),
        "team": t.team.iter().map(user_json).collect::<Vec<_>>(),
        "subtasks": t.subtasks.iter().map(subtask_json).collect::<Vec<_>>(),
        "assets": t.assets,
        "activities": t.activities,
        "is_trashed": t.is_trashed,
        "trashed_at": t.trashed_at.map(|at| at.to_rfc3339()),
        "created_at": t.created_at.to_rfc3339(),
        "updated_at": t.updated_at.to_rfc3339()
    })
}

pub fn subtask_json(s: &Subtask) -> Value {
    json!({
        "id": s.id,
        "title": s.title,
        "date": s.date.to_rfc3339(),
        "completed": s.completed,
        "tag": s.tag
    })
}

pub fn user_json(u: &User) -> Value {
    json!({
        "id": u.id,
        "name": u.name,
        "email": u.email,
        "title": u.title,
        "role": u.role.as_str()
    })
}

pub fn route_json(r: &Route) -> Value {
    json!(r.path())
}
