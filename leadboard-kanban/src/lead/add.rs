//! AddLead command

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::reducer::BoardOp;
use crate::types::Lead;
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Create a lead in the store and place it at the end of a column
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AddLead {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default)]
    pub value: f64,
    /// Column id or slug; the first column when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

operation!(
    AddLead,
    verb = "add",
    noun = "lead",
    description = "Create a lead and place it on the board"
);

impl AddLead {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_whatsapp(mut self, whatsapp: impl Into<String>) -> Self {
        self.whatsapp = Some(whatsapp.into());
        self
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn in_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    fn build_lead(&self) -> Lead {
        let mut lead = Lead::new(self.title.trim()).with_value(self.value);
        if let Some(contact) = &self.contact {
            lead = lead.with_contact(contact);
        }
        if let Some(whatsapp) = &self.whatsapp {
            lead = lead.with_whatsapp(whatsapp);
        }
        if let Some(full_name) = &self.full_name {
            lead = lead.with_full_name(full_name);
        }
        if let Some(company) = &self.company {
            lead = lead.with_company(company);
        }
        if let Some(email) = &self.email {
            lead = lead.with_email(email);
        }
        lead
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for AddLead {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = async {
            let board = ctx.read_board().await;
            let column = match &self.column {
                Some(reference) => board.resolve_column(reference)?,
                None => board.first_column().ok_or(BoardError::NoColumns)?,
            }
            .id
            .clone();

            let lead = self.build_lead();
            let pending = &lead;
            ctx.retry_policy()
                .retry("insert lead", move || ctx.store().insert_lead(pending))
                .await?;

            ctx.transition(&BoardOp::InsertLead {
                lead: lead.clone(),
                column: column.clone(),
            })
            .await?;
            info!(lead = %lead.id, column = %column, "lead added");

            let mut value = serde_json::to_value(&lead)?;
            value["column"] = serde_json::json!(column);
            Ok(value)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, start, result)
    }
}
