use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    ValidationError,
    TaskNotFound,
    SubtaskNotFound,
    UserNotFound,
    EmptySelection,
    NotLoggedIn,
    DataSourceError,
    ConfigError,
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::SubtaskNotFound => "SUBTASK_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::EmptySelection => "EMPTY_SELECTION",
            Self::NotLoggedIn => "NOT_LOGGED_IN",
            Self::DataSourceError => "DATA_SOURCE_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct TaskboardError {
    pub code: ErrorCode,
    pub message: String,
}

impl TaskboardError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_initialized() -> Self {
        Self::new(
            ErrorCode::NotInitialized,
            "taskboard is not initialized. Run `taskboard init` first.",
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn invalid_value(field: &str, value: &str, allowed: &[&str]) -> Self {
        Self::validation(format!(
            "Invalid {field} '{value}'. Expected one of: {}",
            allowed.join(", ")
        ))
    }

    pub fn task_not_found(reference: &str) -> Self {
        Self::new(ErrorCode::TaskNotFound, format!("Task not found: {reference}"))
    }

    pub fn subtask_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::SubtaskNotFound,
            format!("Subtask not found: {reference}"),
        )
    }

    pub fn user_not_found(reference: &str) -> Self {
        Self::new(ErrorCode::UserNotFound, format!("User not found: {reference}"))
    }

    pub fn empty_selection(action: &str) -> Self {
        Self::new(
            ErrorCode::EmptySelection,
            format!("Please select tasks to {action}"),
        )
    }

    pub fn not_logged_in() -> Self {
        Self::new(
            ErrorCode::NotLoggedIn,
            "No user is logged in. Use `taskboard session login <user-id>`.",
        )
    }

    pub fn data_source(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DataSourceError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }
}

impl From<rusqlite::Error> for TaskboardError {
    fn from(e: rusqlite::Error) -> Self {
        Self::database(e.to_string())
    }
}

impl From<serde_json::Error> for TaskboardError {
    fn from(e: serde_json::Error) -> Self {
        Self::data_source(e.to_string())
    }
}
