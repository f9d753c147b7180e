//! SQLite storage and command-line front end for the deep work session
//! engine in `deepwork-core`.

pub mod block_spec;
pub mod commands;
pub mod config;
pub mod db;
pub mod render;
