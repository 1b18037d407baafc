//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

pub mod commands;
pub mod output;

/// Skillbook - maintain a tiered skill catalogue as JSON stores and TSV sheets
#[derive(Parser, Debug)]
#[command(name = "skillbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Catalogue root directory (default: current directory)
    #[arg(long, global = true, env = "SKILLBOOK_ROOT")]
    pub root: Option<PathBuf>,

    /// Config file path (default: ~/.config/skillbook/config.toml + <root>/skillbook.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (human, json, plain)
    #[arg(long, short = 'O', global = true, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Machine-readable JSON output (shorthand for --output-format=json)
    #[arg(long, short = 'm', visible_alias = "json", global = true)]
    pub machine: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective output format: `--output-format`, then `--machine`, then human.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        if let Some(fmt) = self.output_format {
            return fmt;
        }
        if self.machine {
            return OutputFormat::Json;
        }
        OutputFormat::Human
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import a TSV sheet into one tier store
    Import(commands::import::ImportArgs),

    /// Export one tier store as a TSV sheet
    Export(commands::export::ExportArgs),

    /// Check every tier store and the manifest
    Validate(commands::validate::ValidateArgs),

    /// Split the combined store into per-tier stores and a manifest
    Split(commands::split::SplitArgs),

    /// Merge per-tier stores back into the combined store
    Merge(commands::merge::MergeArgs),
}
