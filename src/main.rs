//! schoolval CLI entry point
//!
//! Parses arguments, dispatches to the CLI module and maps the outcome
//! to an exit code: 0 accepted, 2 rejected, 1 on any error.

use schoolval::cli;

fn main() {
    match cli::run() {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
