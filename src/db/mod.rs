pub mod connection;
pub mod kv_repo;
pub mod migrations;
pub mod snapshot;
pub mod task_repo;
pub mod user_repo;

pub use connection::*;
pub use kv_repo::SqliteKv;
pub use snapshot::StoreSource;
