//! InitBoard command

use crate::board::snapshot;
use crate::context::BoardContext;
use crate::defaults::{seed_board, seed_columns};
use crate::error::BoardError;
use crate::types::Board;
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Create the pipeline's columns, optionally with the sample leads
#[derive(Debug, Deserialize, Serialize)]
pub struct InitBoard {
    /// Also insert the sample leads into the store
    #[serde(default = "default_true")]
    pub sample_leads: bool,
}

fn default_true() -> bool {
    true
}

operation!(
    InitBoard,
    verb = "init",
    noun = "board",
    description = "Create the pipeline columns"
);

impl Default for InitBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl InitBoard {
    /// Columns and sample leads
    pub fn new() -> Self {
        Self { sample_leads: true }
    }

    /// Columns only
    pub fn empty() -> Self {
        Self {
            sample_leads: false,
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for InitBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = async {
            let existing = match ctx.root() {
                Some(_) => ctx.is_initialized(),
                None => !ctx.read_board().await.column_order.is_empty(),
            };
            if existing {
                return Err(BoardError::AlreadyExists {
                    path: ctx.root().map(|r| r.to_path_buf()).unwrap_or_default(),
                });
            }

            let board = if self.sample_leads {
                let board = seed_board();
                for lead in board.leads.values() {
                    ctx.retry_policy()
                        .retry("insert lead", move || ctx.store().insert_lead(lead))
                        .await?;
                }
                board
            } else {
                let columns = seed_columns()
                    .into_iter()
                    .map(|c| c.with_leads(Vec::new()))
                    .collect();
                Board::from_parts(columns, Vec::new())
            };

            ctx.replace_board(board.clone()).await?;
            info!(
                columns = board.column_order.len(),
                leads = board.lead_count(),
                "board initialized"
            );
            Ok(snapshot(&board))
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{LeadStore, MemoryLeadStore};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Arc<MemoryLeadStore>, BoardContext) {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(MemoryLeadStore::new());
        let ctx = BoardContext::new(store.clone()).with_root(temp.path().join(".leadboard"));
        (temp, store, ctx)
    }

    #[tokio::test]
    async fn test_init_board_with_sample_leads() {
        let (_temp, store, ctx) = setup();

        let result = InitBoard::new().execute(&ctx).await.into_result().unwrap();

        assert_eq!(result["columns"].as_array().unwrap().len(), 5);
        assert_eq!(result["leads"], 3);
        assert_eq!(store.list_leads().await.unwrap().len(), 3);
        assert!(ctx.is_initialized());
        ctx.read_board().await.validate().unwrap();
    }

    #[tokio::test]
    async fn test_init_board_empty() {
        let (_temp, store, ctx) = setup();

        let result = InitBoard::empty().execute(&ctx).await.into_result().unwrap();

        assert_eq!(result["columns"].as_array().unwrap().len(), 5);
        assert_eq!(result["leads"], 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_init_board_already_exists() {
        let (_temp, _store, ctx) = setup();

        InitBoard::empty().execute(&ctx).await.into_result().unwrap();

        let result = InitBoard::empty().execute(&ctx).await.into_result();
        assert!(matches!(result, Err(BoardError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_init_in_memory_twice_fails() {
        let ctx = BoardContext::new(Arc::new(MemoryLeadStore::new()));
        InitBoard::empty().execute(&ctx).await.into_result().unwrap();
        assert!(InitBoard::empty().execute(&ctx).await.into_result().is_err());
    }

    #[test]
    fn test_operation_metadata() {
        let op = InitBoard::new();
        assert_eq!(op.verb(), "init");
        assert_eq!(op.noun(), "board");
        assert_eq!(op.op_string(), "init board");
    }
}
