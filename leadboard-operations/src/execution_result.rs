//! Execution result types for operations

use crate::LogEntry;
use serde_json::Value;
use std::time::Instant;

/// Result of executing an operation
///
/// Distinguishes between:
/// - Logged: operations that changed the board and should be audited
/// - Unlogged: reads and no-ops
/// - Failed: errors (optionally logged)
pub enum ExecutionResult<T, E> {
    /// Operation succeeded and should be logged
    Logged { value: T, log_entry: LogEntry },
    /// Operation succeeded but no logging needed
    Unlogged { value: T },
    /// Operation failed
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Check if this should be logged
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }
}

impl<E: std::fmt::Display> ExecutionResult<Value, E> {
    /// Wrap a mutating operation's outcome, logging success and failure alike.
    pub fn logged(
        op: impl Into<String>,
        input: Value,
        started: Instant,
        result: Result<Value, E>,
    ) -> Self {
        let op = op.into();
        let duration_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(value) => {
                let log_entry =
                    LogEntry::new(op, input, value.clone()).with_duration_ms(duration_ms);
                Self::Logged { value, log_entry }
            }
            Err(error) => {
                let output = serde_json::json!({ "error": error.to_string() });
                let log_entry = LogEntry::new(op, input, output).with_duration_ms(duration_ms);
                Self::Failed {
                    error,
                    log_entry: Some(log_entry),
                }
            }
        }
    }
}
