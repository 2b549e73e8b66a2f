pub mod commands;
pub mod dashboard;
pub mod init;
pub mod session;
pub mod task;
pub mod trash;
pub mod user;

pub use commands::*;

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::board::Board;
use crate::config::Config;
use crate::db::{self, connection, SqliteKv, StoreSource};
use crate::error::TaskboardError;
use crate::models::{Priority, Role, Stage};
use crate::notify::{Notice, NoticeLog, Notifier};
use crate::output;
use crate::session::Session;

/// An opened workspace: database connection plus configuration.
pub struct Workspace {
    pub conn: Connection,
    pub config: Config,
}

impl Workspace {
    pub fn open() -> Result<Self, TaskboardError> {
        let conn = connection::open_db()?;
        let config = Config::load(&connection::config_path()?)?;
        Ok(Self { conn, config })
    }

    pub fn board<'n>(&self, notices: &'n mut NoticeLog) -> Result<Board<&'n mut NoticeLog>, TaskboardError> {
        Board::resume(&StoreSource::new(&self.conn), notices)
    }

    pub fn save<N: Notifier>(&self, board: &Board<N>) -> Result<(), TaskboardError> {
        db::snapshot::save(&self.conn, board.tasks().tasks(), board.users().users())
    }

    pub fn session(&self) -> Result<Session<SqliteKv<'_>>, TaskboardError> {
        Session::restore(SqliteKv::new(&self.conn))
    }
}

/// Turn a runner's result into an exit code, reporting errors.
pub(crate) fn finish(result: Result<i32, TaskboardError>, json_output: bool, notices: &[Notice]) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            output::emit_error(json_output, &e, notices);
            1
        }
    }
}

pub(crate) fn parse_priority(raw: Option<&str>) -> Result<Option<Priority>, TaskboardError> {
    raw.map(|s| {
        Priority::from_str(s).ok_or_else(|| TaskboardError::invalid_value("priority", s, &Priority::ALL))
    })
    .transpose()
}

pub(crate) fn parse_stage(raw: Option<&str>) -> Result<Option<Stage>, TaskboardError> {
    raw.map(|s| Stage::from_str(s).ok_or_else(|| TaskboardError::invalid_value("stage", s, &Stage::ALL)))
        .transpose()
}

pub(crate) fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, TaskboardError> {
    raw.map(|s| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| TaskboardError::validation(format!("Invalid date '{s}'. Expected YYYY-MM-DD")))
    })
    .transpose()
}

pub(crate) fn parse_role(raw: Option<&str>) -> Result<Option<Role>, TaskboardError> {
    raw.map(|s| Role::from_str(s).ok_or_else(|| TaskboardError::invalid_value("role", s, &Role::ALL)))
        .transpose()
}
