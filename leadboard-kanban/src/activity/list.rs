//! ListActivity command

use crate::context::BoardContext;
use crate::error::BoardError;
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Recent activity, newest first
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListActivity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

operation!(
    ListActivity,
    verb = "list",
    noun = "activity",
    description = "Show recent board activity"
);

impl ListActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ListActivity {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        match async {
            let entries = ctx.read_activity(self.limit).await?;
            Ok(serde_json::json!({
                "count": entries.len(),
                "entries": entries,
            }))
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
