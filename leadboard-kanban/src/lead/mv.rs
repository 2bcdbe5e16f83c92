//! MoveLead command

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::reducer::BoardOp;
use crate::types::{LeadId, LeadMove, Slot};
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Move a lead to a column, at an index or at the bottom
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveLead {
    pub id: LeadId,
    /// Destination column id or slug
    pub to: String,
    /// Position in the destination; the end of the column when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

operation!(
    MoveLead,
    verb = "move",
    noun = "lead",
    description = "Move a lead within or across columns"
);

impl MoveLead {
    pub fn new(id: impl Into<LeadId>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            to: to.into(),
            index: None,
        }
    }

    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for MoveLead {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = async {
            let board = ctx.read_board().await;
            let source = board
                .column_of(&self.id)
                .ok_or_else(|| BoardError::LeadNotFound {
                    id: self.id.to_string(),
                })?;
            let from_index = source
                .position_of(&self.id)
                .ok_or_else(|| BoardError::invariant("placed lead has no position"))?;
            let dest = board.resolve_column(&self.to)?;

            let index = self.index.unwrap_or(if dest.id == source.id {
                dest.len() - 1
            } else {
                dest.len()
            });
            let mv = LeadMove::new(
                self.id.clone(),
                Slot::new(source.id.clone(), from_index),
                Slot::new(dest.id.clone(), index),
            );

            ctx.transition(&BoardOp::MoveLead(mv.clone())).await?;
            info!(
                lead = %self.id,
                from = %mv.from.column,
                to = %mv.to.column,
                index,
                "lead moved"
            );

            Ok(serde_json::json!({
                "id": self.id,
                "from": mv.from,
                "to": mv.to,
                "moved": !mv.is_noop(),
            }))
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, start, result)
    }
}
