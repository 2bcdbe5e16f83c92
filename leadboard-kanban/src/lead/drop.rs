//! DropLead command

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::reducer::BoardOp;
use crate::types::DragEnd;
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

/// Apply a drag-end event from the board UI.
///
/// A drag released outside every column, or on the slot it started from,
/// changes nothing and is not logged.
#[derive(Debug, Deserialize, Serialize)]
pub struct DropLead {
    #[serde(flatten)]
    pub event: DragEnd,
}

operation!(
    DropLead,
    verb = "drop",
    noun = "lead",
    description = "Apply a drag-end event"
);

impl DropLead {
    pub fn new(event: DragEnd) -> Self {
        Self { event }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DropLead {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let Some(mv) = self.event.to_move().filter(|mv| !mv.is_noop()) else {
            debug!(lead = %self.event.draggable_id, "drag ended without a move");
            return ExecutionResult::Unlogged {
                value: serde_json::json!({
                    "id": self.event.draggable_id,
                    "moved": false,
                }),
            };
        };

        let start = Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);
        let result = ctx
            .transition(&BoardOp::MoveLead(mv.clone()))
            .await
            .map(|_| {
                serde_json::json!({
                    "id": mv.lead_id,
                    "from": mv.from,
                    "to": mv.to,
                    "moved": true,
                })
            });

        ExecutionResult::logged(self.op_string(), input, start, result)
    }
}
