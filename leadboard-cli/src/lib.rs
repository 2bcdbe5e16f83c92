//! The `leadboard` command-line interface
//!
//! Parses arguments with clap, loads [`leadboard_config`] settings, and runs
//! board operations from [`leadboard_kanban`], printing results as a table,
//! JSON or YAML.

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod output;

pub use cli::{Cli, Commands, OutputFormat};
pub use context::CliContext;
pub use error::{handle_cli_result, CliError, CliResult};
