//! CLI argument definitions using clap
//!
//! Commands:
//! - schoolval validate --schema <name> [--input <file>] [--batch]
//! - schoolval schemas
//! - schoolval check --schema-dir <dir>
//! - schoolval export --out <dir>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::messages::Locale;

/// schoolval - strict validation for school management records
#[derive(Parser, Debug)]
#[command(name = "schoolval")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Message language (overrides the configuration file)
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    /// Log directive, e.g. `debug` (overrides the configuration file)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a JSON record read from a file or stdin
    Validate {
        /// Schema name
        #[arg(long)]
        schema: String,

        /// Input file (defaults to stdin)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Treat the input as a JSON array of records
        #[arg(long)]
        batch: bool,
    },

    /// List registered schemas and their fields
    Schemas,

    /// Load and check every schema file in a directory
    Check {
        /// Directory holding `*.json` schema files
        #[arg(long)]
        schema_dir: PathBuf,
    },

    /// Write the predefined schemas as JSON files
    Export {
        /// Output directory
        #[arg(long)]
        out: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
