//! Command handlers
//!
//! Each handler builds an operation, runs it through the [`CliContext`] and
//! prints the result. Every command except `init` starts by loading the board.

pub mod activity;
pub mod board;
pub mod column;
pub mod lead;

use crate::cli::Commands;
use crate::context::CliContext;
use crate::error::CliResult;

pub async fn run(ctx: &CliContext, command: Commands) -> CliResult<()> {
    if let Commands::Init { empty } = command {
        return board::init(ctx, empty).await;
    }

    ctx.load().await?;

    match command {
        Commands::Init { .. } => Ok(()),
        Commands::Board => board::show(ctx).await,
        Commands::Lead { action } => lead::run(ctx, action).await,
        Commands::Column { action } => column::run(ctx, action).await,
        Commands::Activity { limit } => activity::list(ctx, limit).await,
    }
}
