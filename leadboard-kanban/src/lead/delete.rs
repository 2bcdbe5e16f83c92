//! DeleteLead command

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::reducer::BoardOp;
use crate::types::LeadId;
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Delete a lead from the store, then from the board.
///
/// The board is only pruned once the store confirms the delete; a store
/// failure leaves the lead where it was.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteLead {
    pub id: LeadId,
}

operation!(
    DeleteLead,
    verb = "delete",
    noun = "lead",
    description = "Delete a lead from the store and the board"
);

impl DeleteLead {
    pub fn new(id: impl Into<LeadId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteLead {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let board = ctx.read_board().await;
        if board.lead(&self.id).is_none() {
            debug!(lead = %self.id, "lead already absent");
            return ExecutionResult::Unlogged {
                value: serde_json::json!({ "deleted": false, "id": self.id }),
            };
        }
        let column = board.column_of(&self.id).map(|c| c.id.clone());

        let start = Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = async {
            let id = &self.id;
            if let Err(e) = ctx
                .retry_policy()
                .retry("delete lead", move || ctx.store().delete_lead(id))
                .await
            {
                warn!(lead = %self.id, error = %e, "remote delete failed, lead kept");
                return Err(BoardError::Store(e));
            }

            ctx.transition(&BoardOp::RemoveLead(self.id.clone())).await?;
            info!(lead = %self.id, "lead deleted");
            Ok(serde_json::json!({
                "deleted": true,
                "id": self.id,
                "column": column,
            }))
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, start, result)
    }
}
