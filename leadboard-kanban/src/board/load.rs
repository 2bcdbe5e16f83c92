//! LoadBoard command

use crate::board::snapshot;
use crate::context::BoardContext;
use crate::error::BoardError;
use crate::types::Board;
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Refresh the board from the lead store.
///
/// The stored layout (or, for an in-memory context, the current board's
/// layout) is reconciled with whatever leads the store now holds: ids the
/// store no longer knows are dropped and new leads land in the first column.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoadBoard;

operation!(
    LoadBoard,
    verb = "load",
    noun = "board",
    description = "Reconcile the board with the lead store"
);

#[async_trait]
impl Execute<BoardContext, BoardError> for LoadBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        match async {
            let layout = match ctx.root() {
                Some(_) => ctx.read_layout().await?,
                None => ctx.read_board().await.layout(),
            };

            let leads = ctx
                .retry_policy()
                .retry("list leads", move || ctx.store().list_leads())
                .await?;
            debug!(leads = leads.len(), columns = layout.columns.len(), "loading board");

            let board = Board::from_layout(layout, leads);
            if board != ctx.read_board().await {
                ctx.replace_board(board.clone()).await?;
            }
            Ok(snapshot(&board))
        }
        .await
        {
            Ok(value) => ExecutionResult::Unlogged { value },
            Err(error) => ExecutionResult::Failed {
                error,
                log_entry: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::InitBoard;
    use crate::store::{LeadStore, MemoryLeadStore};
    use crate::types::Lead;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_requires_init_on_disk() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(Arc::new(MemoryLeadStore::new())).with_root(temp.path());
        let result = LoadBoard.execute(&ctx).await.into_result();
        assert!(matches!(result, Err(BoardError::NotInitialized { .. })));
    }

    #[tokio::test]
    async fn test_load_reconciles_store_changes() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(MemoryLeadStore::new());
        let ctx = BoardContext::new(store.clone()).with_root(temp.path());
        InitBoard::new().execute(&ctx).await.into_result().unwrap();

        // lead-2 vanished remotely, a new lead appeared
        store.delete_lead(&"lead-2".into()).await.unwrap();
        store
            .insert_lead(&Lead::new("Suporte").with_id("lead-9"))
            .await
            .unwrap();

        // a fresh process sees only what is on disk and in the store
        let fresh = BoardContext::new(store.clone()).with_root(temp.path());
        let value = LoadBoard.execute(&fresh).await.into_result().unwrap();

        assert_eq!(value["leads"], 3);
        let board = fresh.read_board().await;
        board.validate().unwrap();
        assert!(board.column(&"negociando".into()).unwrap().is_empty());
        assert_eq!(
            board.column(&"novo".into()).unwrap().lead_ids,
            vec!["lead-1".into(), "lead-9".into()]
        );
    }

    #[tokio::test]
    async fn test_load_in_memory_uses_current_layout() {
        let store = Arc::new(MemoryLeadStore::with_leads([Lead::new("ERP").with_id("l1")]));
        let ctx = BoardContext::new(store);
        InitBoard::empty().execute(&ctx).await.into_result().unwrap();

        LoadBoard.execute(&ctx).await.into_result().unwrap();
        let board = ctx.read_board().await;
        assert_eq!(board.column(&"novo".into()).unwrap().lead_ids, vec!["l1".into()]);
    }
}
