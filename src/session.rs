//! Session store: the authenticated user and the sidebar flag.
//!
//! The user record is mirrored into a durable key-value store under
//! [`USER_INFO_KEY`]; the sidebar flag is never persisted.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::TaskboardError;
use crate::models::User;
use crate::notify::Route;

pub const USER_INFO_KEY: &str = "userInfo";

/// Durable key-value storage for the session.
pub trait CredentialStore {
    fn read(&self, key: &str) -> Result<Option<String>, TaskboardError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), TaskboardError>;
    fn remove(&mut self, key: &str) -> Result<(), TaskboardError>;
}

/// Process-local store, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, TaskboardError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), TaskboardError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), TaskboardError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Debug)]
pub struct Session<S: CredentialStore> {
    user: Option<User>,
    sidebar_open: bool,
    store: S,
}

impl<S: CredentialStore> Session<S> {
    /// Seed the session from `store`. A missing or unreadable record means
    /// logged out; the sidebar always starts closed.
    pub fn restore(store: S) -> Result<Self, TaskboardError> {
        let user = match store.read(USER_INFO_KEY)? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "discarding malformed persisted user record");
                    None
                }
            },
            None => None,
        };
        Ok(Self {
            user,
            sidebar_open: false,
            store,
        })
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Store the user and request the dashboard.
    pub fn set_credentials(&mut self, user: User) -> Result<Route, TaskboardError> {
        let raw = serde_json::to_string(&user)?;
        self.store.write(USER_INFO_KEY, &raw)?;
        debug!(user_id = %user.id, "credentials stored");
        self.user = Some(user);
        Ok(Route::Dashboard)
    }

    /// Clear the user and its persisted record, close the sidebar and
    /// request the login view.
    pub fn logout(&mut self) -> Result<Route, TaskboardError> {
        self.store.remove(USER_INFO_KEY)?;
        self.user = None;
        self.sidebar_open = false;
        debug!("logged out");
        Ok(Route::Login)
    }

    pub fn set_open_sidebar(&mut self, open: bool) {
        self.sidebar_open = open;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Navigation implicitly closes the sidebar.
    pub fn navigate(&mut self, route: Route) -> Route {
        self.sidebar_open = false;
        route
    }
}
