//! Outbound boundaries: user-facing notices and navigation requests.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Fire-and-forget sink for notices. Rendering is the implementor's concern.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);

    fn success(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notice::new(Level::Success, message));
    }

    fn warning(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notice::new(Level::Warning, message));
    }

    fn error(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notice::new(Level::Error, message));
    }
}

impl<T: Notifier + ?Sized> Notifier for &mut T {
    fn notify(&mut self, notice: Notice) {
        (**self).notify(notice);
    }
}

/// Collects notices in emission order.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    notices: Vec<Notice>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl Notifier for NoticeLog {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Navigation targets a mutation can request as its post-condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Tasks,
    TaskDetail(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/log-in".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Tasks => "/tasks".to_string(),
            Self::TaskDetail(id) => format!("/task/{id}"),
        }
    }
}
