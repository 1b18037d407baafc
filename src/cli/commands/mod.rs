//! Command implementations

pub mod export;
pub mod import;
pub mod merge;
pub mod split;
pub mod validate;

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Import(args) => import::run(ctx, args),
        Commands::Export(args) => export::run(ctx, args),
        Commands::Validate(args) => validate::run(ctx, args),
        Commands::Split(args) => split::run(ctx, args),
        Commands::Merge(args) => merge::run(ctx, args),
    }
}
