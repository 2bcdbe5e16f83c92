//! ListLeads command

use crate::context::BoardContext;
use crate::error::BoardError;
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List leads in board order, optionally for a single column
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListLeads {
    /// Column id or slug
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

operation!(
    ListLeads,
    verb = "list",
    noun = "lead",
    description = "List leads column by column"
);

impl ListLeads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_column(column: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ListLeads {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let board = ctx.read_board().await;
        let columns = match &self.column {
            Some(reference) => match board.resolve_column(reference) {
                Ok(column) => vec![column],
                Err(error) => {
                    return ExecutionResult::Failed {
                        error,
                        log_entry: None,
                    }
                }
            },
            None => board.ordered_columns(),
        };

        let mut leads = Vec::new();
        for column in columns {
            for lead in board.column_leads(&column.id) {
                let mut value = serde_json::to_value(lead).unwrap_or(Value::Null);
                value["column"] = serde_json::json!(column.id);
                leads.push(value);
            }
        }

        ExecutionResult::Unlogged {
            value: serde_json::json!({
                "count": leads.len(),
                "leads": leads,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::seed_board;
    use crate::store::MemoryLeadStore;
    use std::sync::Arc;

    fn setup() -> BoardContext {
        BoardContext::new(Arc::new(MemoryLeadStore::new())).with_board(seed_board())
    }

    #[tokio::test]
    async fn test_list_in_board_order() {
        let ctx = setup();
        let value = ListLeads::new().execute(&ctx).await.into_result().unwrap();
        let ids: Vec<&str> = value["leads"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["lead-1", "lead-2", "lead-3"]);
        assert_eq!(value["count"], 3);
    }

    #[tokio::test]
    async fn test_list_one_column() {
        let ctx = setup();
        let value = ListLeads::in_column("fechado")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["leads"][0]["column"], "fechado");
    }
}
