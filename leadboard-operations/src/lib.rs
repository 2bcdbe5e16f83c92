//! # Leadboard Operations
//!
//! Operations are structs where the fields ARE the parameters. Each one names
//! itself with a verb and a noun ("move lead", "delete column") and executes
//! against a context, producing an [`ExecutionResult`] that tells the caller
//! whether the outcome belongs in the activity log.
//!
//! ## Example
//!
//! ```ignore
//! use leadboard_operations::*;
//!
//! #[derive(Debug, Deserialize, Serialize)]
//! pub struct AddColumn {
//!     /// Display title
//!     pub title: String,
//! }
//!
//! operation!(AddColumn, verb = "add", noun = "column", description = "Add a column");
//!
//! #[async_trait]
//! impl Execute<BoardContext, BoardError> for AddColumn {
//!     async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
//!         // returns ExecutionResult::Logged or Unlogged
//!     }
//! }
//! ```

mod execution_result;
mod log;
mod operation;
mod processor;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use processor::OperationProcessor;

// Re-export for use in implementations
pub use async_trait::async_trait;
pub use serde_json::Value;
