//! GetLead command

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::types::LeadId;
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Show one lead and the column holding it
#[derive(Debug, Deserialize, Serialize)]
pub struct GetLead {
    pub id: LeadId,
}

operation!(GetLead, verb = "get", noun = "lead", description = "Show a lead");

impl GetLead {
    pub fn new(id: impl Into<LeadId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for GetLead {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let board = ctx.read_board().await;
        match board.lead(&self.id) {
            Some(lead) => {
                let mut value = serde_json::to_value(lead).unwrap_or(Value::Null);
                value["column"] = serde_json::json!(board.column_of(&self.id).map(|c| &c.id));
                ExecutionResult::Unlogged { value }
            }
            None => ExecutionResult::Failed {
                error: BoardError::LeadNotFound {
                    id: self.id.to_string(),
                },
                log_entry: None,
            },
        }
    }
}
