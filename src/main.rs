//! skillbook - Skill catalogue CLI
//!
//! Keep per-tier skill stores in sync with TSV sheets and a combined store.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use skillbook::app::AppContext;
use skillbook::cli::Cli;
use skillbook::cli::output::emit_error;
use skillbook::{Result, SbError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let format = cli.output_format();
            // The JSON report already carries the findings.
            let reported = matches!(e, SbError::ValidationFailed(_)) && format.is_machine_readable();
            if !reported {
                emit_error(&e, format);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::from_cli(cli)?;
    skillbook::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,skillbook=info",
        1 => "info,skillbook=debug",
        2 => "debug,skillbook=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.output_format().is_machine_readable() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
