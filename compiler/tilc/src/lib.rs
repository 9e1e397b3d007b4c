//! Driver for the `til` command line tool.
//!
//! The binary in `main.rs` only parses arguments; all work happens in
//! [`commands`], which the integration tests drive directly.

pub mod commands;
