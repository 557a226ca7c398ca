//! CLI module for schoolval
//!
//! Provides command-line interface for:
//! - validate: check a record (or a batch) against a named schema
//! - schemas: list registered schemas
//! - check: load and check a directory of schema files
//! - export: write the predefined schemas as files

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, describe, export, run_command, schemas, validate, Outcome};
pub use config::{Config, LogConfig};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_input, read_input, write_error, write_response};

use tracing::error;

use crate::observability::Event;

/// Parse arguments and run the selected command.
///
/// Errors are logged and reported on stdout as an error document before
/// being returned to the caller.
pub fn run() -> CliResult<Outcome> {
    let cli = Cli::parse_args();
    run_command(cli).map_err(|e| {
        error!(
            event = Event::CommandFailed.as_str(),
            code = e.code_str(),
            message = e.message()
        );
        let _ = write_error(e.code_str(), e.message());
        e
    })
}
