//! leadboard - a Kanban board for sales leads
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error
//! - 2: Partial success (a column delete left some leads behind)

use clap::Parser;
use tracing_subscriber::EnvFilter;

use leadboard_cli::{commands, handle_cli_result, Cli, CliContext, CliResult};
use leadboard_config::ConfigProvider;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = handle_cli_result(run(cli).await);
    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> CliResult<()> {
    let mut provider = ConfigProvider::new();
    if let Some(path) = &cli.config {
        provider = provider.with_file(path)?;
    }
    if cli.strict_env {
        provider = provider.with_strict_env();
    }
    let config = provider.load()?;

    let ctx = CliContext::new(
        config,
        cli.format.unwrap_or_default(),
        cli.quiet,
        cli.actor,
    )?;
    commands::run(&ctx, cli.command).await
}
