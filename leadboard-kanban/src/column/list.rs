//! ListColumns command

use crate::board::column_view;
use crate::context::BoardContext;
use crate::error::BoardError;
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List columns left to right
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListColumns;

operation!(
    ListColumns,
    verb = "list",
    noun = "column",
    description = "List columns in board order"
);

#[async_trait]
impl Execute<BoardContext, BoardError> for ListColumns {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let board = ctx.read_board().await;
        let columns: Vec<Value> = board
            .ordered_columns()
            .into_iter()
            .map(|c| column_view(&board, c, false))
            .collect();

        ExecutionResult::Unlogged {
            value: serde_json::json!({
                "count": columns.len(),
                "columns": columns,
            }),
        }
    }
}
