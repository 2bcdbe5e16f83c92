//! RenameColumn command

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::reducer::BoardOp;
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Change a column's title; its id and leads stay put
#[derive(Debug, Deserialize, Serialize)]
pub struct RenameColumn {
    /// Column id or slug
    pub id: String,
    pub title: String,
}

operation!(
    RenameColumn,
    verb = "rename",
    noun = "column",
    description = "Change a column's title"
);

impl RenameColumn {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for RenameColumn {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = async {
            let id = ctx.read_board().await.resolve_column(&self.id)?.id.clone();
            let board = ctx
                .transition(&BoardOp::RenameColumn {
                    id: id.clone(),
                    title: self.title.clone(),
                })
                .await?;
            let title = board.column(&id).map(|c| c.title.clone()).unwrap_or_default();
            Ok(serde_json::json!({ "id": id, "title": title }))
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::seed_board;
    use crate::store::MemoryLeadStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_rename_keeps_id_and_leads() {
        let ctx = BoardContext::new(Arc::new(MemoryLeadStore::new())).with_board(seed_board());

        let result = RenameColumn::new("novo-lead", "Entrada")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["id"], "novo");
        let board = ctx.read_board().await;
        let column = board.column(&"novo".into()).unwrap();
        assert_eq!(column.title, "Entrada");
        assert_eq!(column.lead_ids, vec!["lead-1".into()]);
    }

    #[tokio::test]
    async fn test_rename_to_blank_fails() {
        let ctx = BoardContext::new(Arc::new(MemoryLeadStore::new())).with_board(seed_board());
        let result = RenameColumn::new("novo", " ").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(BoardError::EmptyTitle)));
    }
}
