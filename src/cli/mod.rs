//! CLI module for eli5
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP server
//! - explain: One-shot explanation of a block of text
//! - rules: Print the loaded rule table

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{explain, rules, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_response};
