use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(name = "leadboard")]
#[command(version)]
#[command(about = "A Kanban board for your sales pipeline")]
#[command(long_about = "
leadboard keeps sales leads on a Kanban board: columns are pipeline stages and
each lead sits at one position in one column. Leads live in a lead store
(memory, YAML files, or a PostgREST-style HTTP table) and the board layout
lives in .leadboard/board.yaml.

Example usage:
  leadboard init                                  # Create the default pipeline
  leadboard board                                 # Show every column
  leadboard lead add --title ERP --value 50000    # Add a lead to the first column
  leadboard lead move <id> --to negociando        # Move a lead to another stage
  leadboard --format=json column list             # List columns as JSON
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Name recorded in the activity log for changes made by this command
    #[arg(long, global = true)]
    pub actor: Option<String>,

    /// Extra configuration file, applied after the discovered ones
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fail when a ${VAR} reference in configuration is unset and has no default
    #[arg(long, global = true)]
    pub strict_env: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the board with the default pipeline columns
    Init {
        /// Skip the sample leads
        #[arg(long)]
        empty: bool,
    },
    /// Show the whole board
    Board,
    /// Manage leads
    Lead {
        #[command(subcommand)]
        action: LeadCommands,
    },
    /// Manage columns
    Column {
        #[command(subcommand)]
        action: ColumnCommands,
    },
    /// Show recent board changes
    Activity {
        /// Show at most this many entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LeadCommands {
    /// Add a lead
    Add {
        /// Deal title
        #[arg(long)]
        title: String,
        /// Contact person
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        whatsapp: Option<String>,
        /// Free-form contact note
        #[arg(long)]
        contact: Option<String>,
        /// Deal value
        #[arg(long, default_value_t = 0.0)]
        value: f64,
        /// Column id or slug (defaults to the first column)
        #[arg(long)]
        column: Option<String>,
    },
    /// List leads
    List {
        /// Only leads in this column
        #[arg(long)]
        column: Option<String>,
    },
    /// Show one lead
    Get {
        /// Lead id
        id: String,
    },
    /// Move a lead to a column
    Move {
        /// Lead id
        id: String,
        /// Destination column id or slug
        #[arg(long)]
        to: String,
        /// Position in the destination (defaults to the end)
        #[arg(long)]
        index: Option<usize>,
    },
    /// Apply a drag-end event given as JSON
    Drop {
        /// e.g. '{"draggableId":"lead-1","source":{"droppableId":"novo","index":0},"destination":{"droppableId":"fechado","index":0}}'
        event: String,
    },
    /// Delete a lead from the store and the board
    Delete {
        /// Lead id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ColumnCommands {
    /// Append a column
    Add {
        /// Column title
        title: String,
    },
    /// Rename a column
    Rename {
        /// Column id or slug
        id: String,
        /// New title
        title: String,
    },
    /// Delete a column and every lead in it
    Delete {
        /// Column id or slug
        id: String,
    },
    /// List columns
    List,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "leadboard", "lead", "move", "lead-1", "--to", "fechado", "--format", "json",
            "--actor", "ana",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.actor.as_deref(), Some("ana"));
        match cli.command {
            Commands::Lead {
                action: LeadCommands::Move { id, to, index },
            } => {
                assert_eq!(id, "lead-1");
                assert_eq!(to, "fechado");
                assert_eq!(index, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_lead_add_requires_title() {
        assert!(Cli::try_parse_from(["leadboard", "lead", "add"]).is_err());
    }

    #[test]
    fn test_init_empty_flag() {
        let cli = Cli::try_parse_from(["leadboard", "init", "--empty"]).unwrap();
        assert!(matches!(cli.command, Commands::Init { empty: true }));
    }
}
