use chrono::{Duration, TimeZone, Utc};

use taskboard::board::Board;
use taskboard::collection::TaskCollection;
use taskboard::directory::{derive_users, UserDirectory};
use taskboard::error::ErrorCode;
use taskboard::filter::{filter_tasks, StatusFilter, TaskFilter};
use taskboard::models::{NewTask, NewUser, Priority, Role, Stage, Task, TaskPatch, UserPatch};
use taskboard::notify::{Level, NoticeLog, Route};
use taskboard::source::FixtureSource;
use taskboard::summary::summarize;
use taskboard::trash::Selection;

// ─── helpers ───────────────────────────────────────────────────────

fn fixture_board() -> Board<NoticeLog> {
    Board::load(&FixtureSource, NoticeLog::new()).expect("load fixtures")
}

fn collection_with(titles: &[&str]) -> TaskCollection {
    let mut tasks = TaskCollection::default();
    for title in titles {
        tasks.create(NewTask::titled(*title)).expect("create");
    }
    tasks
}

fn ids(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|t| t.id.clone()).collect()
}

// ─── 1. collection ─────────────────────────────────────────────────

#[test]
fn test_create_defaults() {
    let mut tasks = TaskCollection::default();
    let task = tasks.create(NewTask::titled("  Write docs  ")).unwrap().clone();
    assert_eq!(task.title, "Write docs");
    assert_eq!(task.priority, Priority::Normal);
    assert_eq!(task.stage, Stage::Todo);
    assert_eq!(task.date, Utc::now().date_naive());
    assert!(!task.is_trashed);
    assert!(task.trashed_at.is_none());
    assert!(task.team.is_empty());
}

#[test]
fn test_create_blank_title_rejected() {
    let mut tasks = TaskCollection::default();
    let err = tasks.create(NewTask::titled("   ")).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert!(tasks.is_empty());
}

#[test]
fn test_update_patches_fields() {
    let mut tasks = collection_with(&["Draft"]);
    let id = tasks.tasks()[0].id.clone();
    let patch = TaskPatch {
        title: Some("Final".into()),
        priority: Some(Priority::High),
        ..TaskPatch::default()
    };
    let updated = tasks.update(&id, patch).unwrap().unwrap().clone();
    assert_eq!(updated.title, "Final");
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.stage, Stage::Todo);
}

#[test]
fn test_update_unknown_is_noop() {
    let mut tasks = collection_with(&["Draft"]);
    let before = tasks.tasks().to_vec();
    let result = tasks.update("missing", TaskPatch::default()).unwrap();
    assert!(result.is_none());
    assert_eq!(tasks.tasks(), before.as_slice());
}

#[test]
fn test_update_blank_title_leaves_task_unchanged() {
    let mut tasks = collection_with(&["Draft"]);
    let id = tasks.tasks()[0].id.clone();
    let patch = TaskPatch {
        title: Some(" ".into()),
        ..TaskPatch::default()
    };
    let err = tasks.update(&id, patch).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert_eq!(tasks.get(&id).unwrap().title, "Draft");
}

#[test]
fn test_change_stage_invalid_value() {
    let mut tasks = collection_with(&["Draft"]);
    let id = tasks.tasks()[0].id.clone();
    let err = tasks.change_stage(&id, "bogus").unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert_eq!(tasks.get(&id).unwrap().stage, Stage::Todo);

    let task = tasks.change_stage(&id, "in-progress").unwrap().unwrap();
    assert_eq!(task.stage, Stage::InProgress);
}

#[test]
fn test_soft_delete_keeps_first_timestamp() {
    let mut tasks = collection_with(&["Draft"]);
    let id = tasks.tasks()[0].id.clone();
    let first = tasks.soft_delete(&id).unwrap().trashed_at;
    assert!(first.is_some());
    let second = tasks.soft_delete(&id).unwrap().trashed_at;
    assert_eq!(first, second);
    assert!(tasks.soft_delete("missing").is_none());
}

#[test]
fn test_subtasks() {
    let mut tasks = collection_with(&["Parent"]);
    let id = tasks.tasks()[0].id.clone();

    assert!(tasks.add_subtask(&id, "   ").is_none());
    assert!(tasks.get(&id).unwrap().subtasks.is_empty());

    let sub = tasks.add_subtask(&id, "Child").unwrap().clone();
    assert_eq!(sub.tag, "general");
    assert!(!sub.completed);

    assert!(tasks.toggle_subtask(&id, &sub.id).unwrap().completed);
    assert!(!tasks.toggle_subtask(&id, &sub.id).unwrap().completed);
    assert!(tasks.toggle_subtask(&id, "missing").is_none());

    let removed = tasks.remove_subtask(&id, &sub.id).unwrap();
    assert_eq!(removed.id, sub.id);
    assert!(tasks.get(&id).unwrap().subtasks.is_empty());
}

// ─── 2. filters and summary ────────────────────────────────────────

#[test]
fn test_soft_delete_hides_from_active_views() {
    let mut tasks = collection_with(&["A", "B", "C"]);
    let id = tasks.tasks()[1].id.clone();
    tasks.soft_delete(&id);

    let active = filter_tasks(tasks.tasks(), &TaskFilter::active());
    assert!(!ids(&active).contains(&id));
    let trash = filter_tasks(tasks.tasks(), &TaskFilter::trash());
    assert_eq!(ids(&trash), vec![id]);
}

#[test]
fn test_restore_is_inverse_of_soft_delete() {
    let mut tasks = collection_with(&["A", "B"]);
    let id = tasks.tasks()[0].id.clone();
    let before = ids(&filter_tasks(tasks.tasks(), &TaskFilter::active()));

    tasks.soft_delete(&id);
    tasks.trash().restore(&id).unwrap();

    let after = ids(&filter_tasks(tasks.tasks(), &TaskFilter::active()));
    assert_eq!(before, after);
    assert!(tasks.get(&id).unwrap().trashed_at.is_none());
}

#[test]
fn test_empty_search_is_no_filter() {
    let board = fixture_board();
    let plain = ids(&board.view(&TaskFilter::active()));
    let searched = ids(&board.view(&TaskFilter::active().with_search("")));
    assert_eq!(plain, searched);
    assert_eq!(plain.len(), 6);
}

#[test]
fn test_search_matches_title_and_priority() {
    let board = fixture_board();
    let by_title = board.view(&TaskFilter::active().with_search("BUG"));
    assert_eq!(ids(&by_title), vec!["t-02"]);

    let by_priority = board.view(&TaskFilter::active().with_search("high"));
    assert_eq!(ids(&by_priority), vec!["t-01", "t-02"]);
}

#[test]
fn test_status_filter() {
    let board = fixture_board();
    let filter = TaskFilter::active().with_status(StatusFilter::parse("completed").unwrap());
    assert_eq!(ids(&board.view(&filter)), vec!["t-05", "t-06"]);

    let err = StatusFilter::parse("done").unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
}

#[test]
fn test_summary_counts_live_tasks_only() {
    let mut board = fixture_board();
    let s = board.summary();
    assert_eq!((s.total, s.todo, s.in_progress, s.completed), (6, 2, 2, 2));

    board.delete_task("t-05").unwrap();
    let s = summarize(board.tasks().tasks());
    assert_eq!((s.total, s.completed), (5, 1));
    assert!((s.percentage - 20.0).abs() < 1e-9);

    let recent = board.recent(3);
    assert_eq!(ids(&recent), vec!["t-01", "t-02", "t-03"]);
}

// ─── 3. trash ──────────────────────────────────────────────────────

#[test]
fn test_permanently_delete_only_trashed() {
    let mut tasks = collection_with(&["A", "B"]);
    let id = tasks.tasks()[0].id.clone();
    assert!(tasks.trash().permanently_delete(&id).is_none());
    assert_eq!(tasks.len(), 2);

    tasks.soft_delete(&id);
    let removed = tasks.trash().permanently_delete(&id).unwrap();
    assert_eq!(removed.id, id);
    assert!(tasks.get(&id).is_none());
    assert!(filter_tasks(tasks.tasks(), &TaskFilter::trash()).is_empty());
    assert_eq!(filter_tasks(tasks.tasks(), &TaskFilter::active()).len(), 1);
}

#[test]
fn test_select_all_scoped_to_visible() {
    let mut tasks = collection_with(&["Alpha report", "Beta", "Alpha review", "Gamma", "Delta"]);
    let all: Vec<String> = tasks.tasks().iter().map(|t| t.id.clone()).collect();
    for id in &all {
        tasks.soft_delete(id);
    }

    let visible = filter_tasks(tasks.tasks(), &TaskFilter::trash().with_search("alpha"));
    assert_eq!(visible.len(), 2);
    let mut selection = Selection::new();
    selection.select_all(&visible);
    assert!(selection.is_all_selected(&visible));

    let restored = tasks.trash().restore_many(selection.ids());
    assert_eq!(restored.len(), 2);
    assert_eq!(filter_tasks(tasks.tasks(), &TaskFilter::trash()).len(), 3);
    let active = filter_tasks(tasks.tasks(), &TaskFilter::active());
    assert!(active.iter().all(|t| t.title.starts_with("Alpha")));
}

#[test]
fn test_selection_toggle() {
    let mut selection = Selection::new();
    selection.toggle("a", true);
    selection.toggle("b", true);
    selection.toggle("a", false);
    assert!(!selection.contains("a"));
    assert!(selection.contains("b"));
    assert_eq!(selection.len(), 1);
    selection.clear();
    assert!(selection.is_empty());
}

#[test]
fn test_empty_trash_ignores_search() {
    let mut tasks = collection_with(&["A", "B", "C"]);
    let (a, b) = (tasks.tasks()[0].id.clone(), tasks.tasks()[1].id.clone());
    tasks.soft_delete(&a);
    tasks.soft_delete(&b);
    let removed = tasks.trash().empty();
    assert_eq!(removed.len(), 2);
    assert_eq!(tasks.len(), 1);
}

#[test]
fn test_purge_expired() {
    let mut tasks = collection_with(&["Old", "New", "Live"]);
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let (old, new) = (tasks.tasks()[0].id.clone(), tasks.tasks()[1].id.clone());
    tasks.soft_delete(&old);
    tasks.soft_delete(&new);
    // backdate directly since soft_delete stamps the wall clock
    let mut raw = tasks.into_tasks();
    raw[0].trashed_at = Some(now - Duration::days(31));
    raw[1].trashed_at = Some(now - Duration::days(2));
    let mut tasks = TaskCollection::new(raw);

    assert_eq!(tasks.trash().expired(Duration::days(30), now), vec![old.clone()]);
    let purged = tasks.trash().purge_expired(Duration::days(30), now);
    assert_eq!(purged.len(), 1);
    assert_eq!(purged[0].id, old);
    assert!(tasks.get(&new).is_some());
}

#[test]
fn test_purge_with_retention_beyond_calendar_range() {
    let mut board = fixture_board();
    board.delete_task("t-01").unwrap();
    let retention = Duration::days(100_000_000);

    assert!(board.tasks().trash().expired(retention, Utc::now()).is_empty());
    let purged = board.purge_expired(retention, Utc::now());
    assert!(purged.is_empty());
    assert!(board.tasks().get("t-01").is_some_and(|t| t.is_trashed));
}

// ─── 4. board notices ──────────────────────────────────────────────

#[test]
fn test_scenario_single_todo_task() {
    let now = Utc::now();
    let task = Task {
        id: "1".into(),
        title: "Write spec".into(),
        priority: Priority::High,
        stage: Stage::Todo,
        date: now.date_naive(),
        team: Vec::new(),
        subtasks: Vec::new(),
        assets: Vec::new(),
        activities: Vec::new(),
        is_trashed: false,
        trashed_at: None,
        created_at: now,
        updated_at: now,
    };
    let mut tasks = TaskCollection::new(vec![task]);

    let todo = TaskFilter::active().with_status(StatusFilter::Stage(Stage::Todo));
    assert_eq!(ids(&filter_tasks(tasks.tasks(), &todo)), vec!["1"]);
    let completed = TaskFilter::active().with_status(StatusFilter::Stage(Stage::Completed));
    assert!(filter_tasks(tasks.tasks(), &completed).is_empty());

    assert!(tasks.add_subtask("1", "  ").is_none());
    assert!(tasks.get("1").unwrap().subtasks.is_empty());
}

#[test]
fn test_create_then_stage_notices() {
    let mut board = Board::new(TaskCollection::default(), UserDirectory::default(), NoticeLog::new());
    let input = NewTask {
        title: "Write spec".into(),
        priority: Some(Priority::High),
        ..NewTask::default()
    };
    let task = board.create_task(input).unwrap();
    assert_eq!(task.stage, Stage::Todo);
    assert_eq!(board.notifier().last().unwrap().message, "Task created successfully");

    board.change_stage(&task.id, "completed").unwrap().unwrap();
    assert_eq!(board.summary().completed, 1);
    assert_eq!(board.notifier().last().unwrap().message, "Task status updated to completed");
}

#[test]
fn test_delete_task_navigates_to_list() {
    let mut board = fixture_board();
    let trashed = board.delete_task("t-01").unwrap();
    assert!(trashed.task.is_trashed);
    assert_eq!(trashed.navigate, Route::Tasks);
    assert_eq!(trashed.navigate.path(), "/tasks");
    assert_eq!(board.notifier().notices().len(), 1);
}

#[test]
fn test_blank_subtask_warns() {
    let mut board = fixture_board();
    assert!(board.add_subtask("t-04", "  ").is_none());
    let notice = board.notifier().last().unwrap();
    assert_eq!(notice.level, Level::Warning);
    assert!(board.tasks().get("t-04").unwrap().subtasks.is_empty());
}

#[test]
fn test_empty_selection_rejected_with_notice() {
    let mut board = fixture_board();
    let err = board.restore_selected(&mut Selection::new()).unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptySelection);
    let notice = board.notifier().last().unwrap();
    assert_eq!(notice.level, Level::Error);
    assert_eq!(notice.message, "Please select tasks to restore");
}

#[test]
fn test_restore_selected_clears_selection() {
    let mut board = fixture_board();
    board.delete_task("t-01");
    board.delete_task("t-02");
    let mut selection = Selection::new();
    selection.select("t-01");
    selection.select("t-03");
    let restored = board.restore_selected(&mut selection).unwrap();
    assert_eq!(restored, vec!["t-01"]);
    assert!(selection.is_empty());
    assert_eq!(board.notifier().last().unwrap().message, "1 task(s) restored successfully");
}

// ─── 5. directory ──────────────────────────────────────────────────

#[test]
fn test_derived_users_first_seen_wins() {
    let board = fixture_board();
    let users = derive_users(board.tasks().tasks());
    let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Codewave Asante", "Jane Smith", "Alex Johnson", "Emily Wilson", "Sam Lee"]
    );
    let jane = board.users().get("u-02").unwrap();
    assert_eq!(jane.title, "Product Manager");
}

#[test]
fn test_directory_diverges_from_task_teams() {
    let mut board = fixture_board();
    let patch = UserPatch {
        name: Some("Jane Doe".into()),
        ..UserPatch::default()
    };
    board.edit_user("u-02", patch).unwrap().unwrap();
    assert_eq!(board.users().get("u-02").unwrap().name, "Jane Doe");

    let team = &board.tasks().get("t-01").unwrap().team;
    assert!(team.iter().any(|u| u.id == "u-02" && u.name == "Jane Smith"));

    board.remove_user("u-05").unwrap();
    assert!(board.users().get("u-05").is_none());
    let team = &board.tasks().get("t-04").unwrap().team;
    assert!(team.iter().any(|u| u.id == "u-05"));
}

#[test]
fn test_add_user_validation() {
    let mut board = fixture_board();
    let err = board
        .add_user(NewUser {
            name: "Nobody".into(),
            ..NewUser::default()
        })
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert_eq!(board.users().users().len(), 5);

    let user = board
        .add_user(NewUser {
            name: "Kim".into(),
            email: "kim@example.com".into(),
            ..NewUser::default()
        })
        .unwrap();
    assert_eq!(user.role, Role::Developer);
    assert_eq!(board.users().search("kim@").len(), 1);
    assert_eq!(board.users().search("tester").len(), 1);
}
