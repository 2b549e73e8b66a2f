use crate::models::{Task, User};
use crate::notify::{Level, Notice};
use crate::summary::TaskSummary;

pub fn print_notices(notices: &[Notice]) {
    for n in notices {
        match n.level {
            Level::Success | Level::Info => println!("{}", n.message),
            Level::Warning => eprintln!("Warning: {}", n.message),
            // Errors are reported once, by the command's error path.
            Level::Error => {}
        }
    }
}

pub fn print_task(t: &Task) {
    println!("Task: {} ({})", t.title, t.id);
    println!("  Priority: {}", t.priority.as_str());
    println!("  Stage: {}", t.stage.as_str());
    println!("  Due: {}", t.date);
    if t.is_trashed {
        match t.trashed_at {
            Some(at) => println!("  Trashed: {}", at.format("%Y-%m-%d %H:%M")),
            None => println!("  Trashed: yes"),
        }
    }
    if !t.team.is_empty() {
        println!("  Team:");
        for member in &t.team {
            println!("    {} <{}> [{}] {}", member.name, member.email, member.role.as_str(), member.title);
        }
    }
    if !t.subtasks.is_empty() {
        println!("  Subtasks ({}/{} done):", t.completed_subtasks(), t.subtasks.len());
        for s in &t.subtasks {
            let mark = if s.completed { "x" } else { " " };
            println!("    [{mark}] {} ({}) #{}", s.title, s.id, s.tag);
        }
    }
    if !t.assets.is_empty() {
        println!("  Attachments: {}", t.assets.len());
    }
}

pub fn print_task_list(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    for t in tasks {
        println!(
            "  [{}] {} ({}) p={} due={} team={} subtasks={}",
            t.stage.as_str(),
            t.title,
            t.id,
            t.priority.as_str(),
            t.date,
            t.team.len(),
            t.subtasks.len()
        );
    }
}

pub fn print_trash_list(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("Trash is empty.");
        return;
    }
    for t in tasks {
        let deleted = t
            .trashed_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "?".to_string());
        println!(
            "  {} ({}) p={} [{}] deleted={}",
            t.title,
            t.id,
            t.priority.as_str(),
            t.stage.as_str(),
            deleted
        );
    }
}

pub fn print_summary(s: &TaskSummary) {
    println!("Progress: {:.1}% ({}/{})", s.percentage, s.completed, s.total);
    println!(
        "  todo={} in-progress={} completed={}",
        s.todo, s.in_progress, s.completed
    );
}

pub fn print_user(u: &User) {
    println!("  {} ({}) <{}> [{}] {}", u.name, u.id, u.email, u.role.as_str(), u.title);
}

pub fn print_user_list(users: &[&User]) {
    if users.is_empty() {
        println!("No users found.");
        return;
    }
    for u in users {
        print_user(u);
    }
}
