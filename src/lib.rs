pub mod board;
pub mod cli;
pub mod collection;
pub mod config;
pub mod db;
pub mod directory;
pub mod error;
pub mod filter;
pub mod models;
pub mod notify;
pub mod output;
pub mod session;
pub mod source;
pub mod summary;
pub mod trash;
