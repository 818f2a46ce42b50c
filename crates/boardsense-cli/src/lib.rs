//! Boardsense CLI
//!
//! Argument parsing and request dispatch for the `boardsense` binary. Each
//! invocation answers one request with one JSON document on stdout.

pub mod cli;
pub mod dispatch;

pub use cli::{Cli, Command};
pub use dispatch::{usage_response, Dispatcher, Response};
