//! Error handling for the leadboard CLI
//!
//! Keeps the source error for the `Caused by` chain while carrying the exit
//! code the process should end with.

use std::error::Error;
use std::fmt;

use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use leadboard_config::ConfigError;
use leadboard_kanban::BoardError;

/// CLI-specific result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI error with the exit code it maps to
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Message, then each underlying cause on its own line
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        let mut current_source = self.source();
        while let Some(err) = current_source {
            result.push_str(&format!("\n  Caused by: {err}"));
            current_source = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<BoardError> for CliError {
    fn from(error: BoardError) -> Self {
        let message = match &error {
            BoardError::NotInitialized { path } => format!(
                "no board at {} (run `leadboard init` first)",
                path.display()
            ),
            BoardError::CascadeIncomplete { id, failures } => {
                let mut message = format!(
                    "column '{}' kept: {} lead(s) could not be deleted",
                    id,
                    failures.len()
                );
                for failure in failures {
                    message.push_str(&format!("\n  {}: {}", failure.lead_id, failure.error));
                }
                message
            }
            other if other.is_validation() => format!("{other} (board unchanged)"),
            other => other.to_string(),
        };
        let exit_code = match &error {
            BoardError::CascadeIncomplete { .. } => EXIT_WARNING,
            _ => EXIT_ERROR,
        };
        Self {
            message,
            exit_code,
            source: match error {
                BoardError::Store(e) => Some(Box::new(e) as Box<dyn Error + Send + Sync>),
                _ => None,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        Self {
            message: "invalid configuration".to_string(),
            exit_code: EXIT_ERROR,
            source: Some(Box::new(error)),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        Self {
            message: "invalid JSON".to_string(),
            exit_code: EXIT_ERROR,
            source: Some(Box::new(error)),
        }
    }
}

impl From<serde_yaml_ng::Error> for CliError {
    fn from(error: serde_yaml_ng::Error) -> Self {
        Self::new(format!("failed to render YAML: {error}"), EXIT_ERROR)
    }
}

/// Exit code for a result, reporting the error chain on stderr
pub fn handle_cli_result<T>(result: CliResult<T>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            tracing::debug!(exit_code = e.exit_code, "command failed");
            eprintln!("Error: {}", e.full_chain());
            e.exit_code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadboard_kanban::{LeadFailure, StoreError};

    #[test]
    fn test_cascade_failure_is_a_warning() {
        let err: CliError = BoardError::CascadeIncomplete {
            id: "inativo".into(),
            failures: vec![LeadFailure {
                lead_id: "lead-9".into(),
                error: "store unavailable: down".into(),
            }],
        }
        .into();
        assert_eq!(err.exit_code, EXIT_WARNING);
        assert!(err.message.contains("lead-9: store unavailable"));
    }

    #[test]
    fn test_store_error_keeps_cause() {
        let err: CliError = BoardError::Store(StoreError::Transport("refused".into())).into();
        assert_eq!(err.exit_code, EXIT_ERROR);
        assert!(err.full_chain().contains("Caused by: transport error: refused"));
    }

    #[test]
    fn test_not_initialized_hint() {
        let err: CliError = BoardError::NotInitialized {
            path: ".leadboard".into(),
        }
        .into();
        assert!(err.message.contains("leadboard init"));
    }

    #[test]
    fn test_rejected_change_says_board_unchanged() {
        let err: CliError = BoardError::EmptyTitle.into();
        assert_eq!(err.exit_code, EXIT_ERROR);
        assert_eq!(err.message, "column title cannot be empty (board unchanged)");

        let err: CliError = BoardError::NoColumns.into();
        assert_eq!(err.message, "board has no columns");
    }
}
