use std::path::PathBuf;

use clap::{Parser, Subcommand};

const VERSION: &str = env!("TASKBOARD_VERSION");

#[derive(Parser)]
#[command(
    name = "taskboard",
    version = VERSION,
    about = "Team task board: tasks, trash and team directory",
    after_help = "\
NOTE:
  Data lives in $TASKBOARD_DIR, or ./.taskboard when unset.
  Run `taskboard init` before any other command.

EXIT CODES:
  0  Success
  1  Error (validation, unknown id, storage, etc.)

TRASH:
  `task delete` only moves a task to the trash; it stays recoverable until
  `trash delete`, `trash empty` or `trash purge` removes it for good.
  `trash purge` removes items older than `retention_days` (default 30) and is
  meant to be run on a schedule."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the workspace and seed it with tasks
    #[command(after_help = "\
NOTE:
  Without --seed the built-in demo dataset is loaded.
  Seed file format: {\"tasks\": [...], \"users\": [...]}
  Re-running on an initialized workspace keeps existing data.")]
    Init {
        /// JSON dataset to seed from
        #[arg(long)]
        seed: Option<PathBuf>,
    },

    /// Show task counters and recent tasks
    Dashboard,

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Trashed tasks
    #[command(subcommand)]
    Trash(TrashCommands),

    /// Team directory
    #[command(subcommand)]
    User(UserCommands),

    /// Login state
    #[command(subcommand)]
    Session(SessionCommands),
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a task
    Add {
        /// Task title
        title: String,
        /// low | normal | medium | high (default: normal)
        #[arg(long)]
        priority: Option<String>,
        /// todo | in-progress | completed (default: todo)
        #[arg(long)]
        stage: Option<String>,
        /// Due date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List tasks that are not in the trash
    List {
        /// all | todo | in-progress | completed
        #[arg(long, default_value = "all")]
        status: String,
        /// Case-insensitive match on title or priority
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show task details
    Show { id: String },
    /// Edit task fields
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        stage: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Move a task to another stage
    Stage { id: String, stage: String },
    /// Move a task to the trash
    Delete { id: String },
    /// Manage subtasks
    #[command(subcommand)]
    Subtask(SubtaskCommands),
}

#[derive(Subcommand)]
pub enum SubtaskCommands {
    /// Append a subtask
    Add { task_id: String, title: String },
    /// Flip a subtask's completed flag
    Toggle { task_id: String, subtask_id: String },
    /// Remove a subtask
    Remove { task_id: String, subtask_id: String },
}

#[derive(Subcommand)]
pub enum TrashCommands {
    /// List trashed tasks
    List {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Restore trashed tasks
    Restore {
        ids: Vec<String>,
        /// Select every trashed task matching --search
        #[arg(long)]
        all: bool,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Permanently delete trashed tasks
    Delete {
        ids: Vec<String>,
        /// Select every trashed task matching --search
        #[arg(long)]
        all: bool,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Permanently delete every trashed task
    Empty,
    /// Permanently delete trashed tasks past the retention period
    Purge {
        /// Overrides retention_days from config.json
        #[arg(long)]
        older_than_days: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List users
    List {
        /// Case-insensitive match on name, email or role
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Add a user
    Add {
        name: String,
        #[arg(long)]
        email: String,
        /// Job title
        #[arg(long, default_value = "")]
        title: String,
        /// Admin | Manager | Developer | Designer | Tester (default: Developer)
        #[arg(long)]
        role: Option<String>,
    },
    /// Edit a user
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    /// Remove a user
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Log in as a user from the directory
    Login { user_id: String },
    /// Log out
    Logout,
    /// Show the logged-in user
    Whoami,
}
