//! GetBoard command

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::types::{Board, Column};
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read the whole board with per-column totals
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GetBoard;

operation!(
    GetBoard,
    verb = "get",
    noun = "board",
    description = "Show every column with its leads and totals"
);

#[async_trait]
impl Execute<BoardContext, BoardError> for GetBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let board = ctx.read_board().await;
        ExecutionResult::Unlogged {
            value: snapshot(&board),
        }
    }
}

/// JSON view of a column: ids, leads in order, count and total value
pub(crate) fn column_view(board: &Board, column: &Column, with_leads: bool) -> Value {
    let mut view = serde_json::json!({
        "id": column.id,
        "title": column.title,
        "slug": column.slug(),
        "count": column.len(),
        "total": board.column_value(&column.id),
    });
    if with_leads {
        view["leads"] = serde_json::json!(board.column_leads(&column.id));
    }
    view
}

/// JSON view of a board in display order
pub fn snapshot(board: &Board) -> Value {
    let columns: Vec<Value> = board
        .ordered_columns()
        .into_iter()
        .map(|c| column_view(board, c, true))
        .collect();
    let total: f64 = board.leads.values().map(|l| l.value).sum();
    serde_json::json!({
        "columns": columns,
        "leads": board.lead_count(),
        "total": total,
    })
}
