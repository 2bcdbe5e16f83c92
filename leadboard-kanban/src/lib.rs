//! Lead pipeline board engine
//!
//! A Kanban board of sales leads: columns are pipeline stages, each holding an
//! ordered list of lead ids, and leads themselves live in a [`LeadStore`]
//! (memory, YAML files, or a PostgREST-style HTTP table).
//!
//! ## Overview
//!
//! - **Pure reducer** - [`apply`] turns a board and a [`BoardOp`] into the next
//!   board or an error; it never mutates in place
//! - **Remote first** - deletes reach the store before the board changes, with
//!   retry for transient failures
//! - **Commands** - every user action is an operation struct executed against a
//!   [`BoardContext`]; mutations produce activity log entries
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use leadboard_kanban::{
//!     board::InitBoard, lead::MoveLead, BoardContext, Execute, MemoryLeadStore,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = BoardContext::new(Arc::new(MemoryLeadStore::new()));
//! InitBoard::new().execute(&ctx).await.into_result()?;
//!
//! MoveLead::new("lead-1", "negociando").execute(&ctx).await.into_result()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Structure
//!
//! ```text
//! .leadboard/
//! ├── board.yaml       # Columns in order with their lead ids
//! ├── activity.jsonl   # Operation log
//! └── leads/
//!     └── {id}.yaml    # One lead per file (file store only)
//! ```

mod context;
pub mod defaults;
mod error;
mod processor;
pub mod reducer;
pub mod retry;
pub mod store;
pub mod types;

// Command modules
pub mod activity;
pub mod board;
pub mod column;
pub mod lead;

pub use leadboard_operations::{
    async_trait, Execute, ExecutionResult, LogEntry, Operation, OperationProcessor,
};

pub use context::{BoardContext, BoardLock};
pub use error::{BoardError, LeadFailure, Result};
pub use processor::BoardOperationProcessor;
pub use reducer::{apply, apply_all, BoardOp};
pub use retry::RetryPolicy;
pub use store::{FileLeadStore, LeadStore, MemoryLeadStore, RestLeadStore, StoreError};

pub use types::{
    slugify, Board, BoardLayout, Column, ColumnId, DragEnd, DragLocation, Lead, LeadId, LeadMove,
    Slot,
};
