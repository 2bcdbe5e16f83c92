//! AddColumn command

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::reducer::BoardOp;
use crate::types::ColumnId;
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Append an empty column to the right of the board.
///
/// The id is generated; two columns may share a title.
#[derive(Debug, Deserialize, Serialize)]
pub struct AddColumn {
    pub title: String,
}

operation!(
    AddColumn,
    verb = "add",
    noun = "column",
    description = "Add an empty column at the end of the board"
);

impl AddColumn {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for AddColumn {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let id = ColumnId::new();
        let result = async {
            let board = ctx
                .transition(&BoardOp::AddColumn {
                    id: id.clone(),
                    title: self.title.clone(),
                })
                .await?;
            let column = board
                .column(&id)
                .ok_or_else(|| BoardError::invariant("added column missing"))?;
            info!(column = %id, title = %column.title, "column added");
            Ok(serde_json::json!({
                "id": column.id,
                "title": column.title,
                "slug": column.slug(),
                "position": board.column_order.len() - 1,
            }))
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, start, result)
    }
}
