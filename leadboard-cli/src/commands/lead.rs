use crate::cli::LeadCommands;
use crate::context::CliContext;
use crate::error::CliResult;
use crate::output;
use leadboard_kanban::lead::{AddLead, DeleteLead, DropLead, GetLead, ListLeads, MoveLead};
use leadboard_kanban::DragEnd;
use serde_json::Value;

pub async fn run(ctx: &CliContext, action: LeadCommands) -> CliResult<()> {
    match action {
        LeadCommands::Add {
            title,
            full_name,
            company,
            email,
            whatsapp,
            contact,
            value,
            column,
        } => {
            let mut op = AddLead::new(title).with_value(value);
            if let Some(full_name) = full_name {
                op = op.with_full_name(full_name);
            }
            if let Some(company) = company {
                op = op.with_company(company);
            }
            if let Some(email) = email {
                op = op.with_email(email);
            }
            if let Some(whatsapp) = whatsapp {
                op = op.with_whatsapp(whatsapp);
            }
            if let Some(contact) = contact {
                op = op.with_contact(contact);
            }
            if let Some(column) = column {
                op = op.in_column(column);
            }
            let lead = ctx.execute(&op).await?;
            ctx.printer().emit(&lead, |lead| {
                format!(
                    "Added lead {} to {}",
                    field(lead, "id"),
                    field(lead, "column")
                )
            })
        }
        LeadCommands::List { column } => {
            let op = match column {
                Some(column) => ListLeads::in_column(column),
                None => ListLeads::new(),
            };
            let leads = ctx.execute(&op).await?;
            ctx.printer().emit(&leads, output::leads_table)
        }
        LeadCommands::Get { id } => {
            let lead = ctx.execute(&GetLead::new(id)).await?;
            ctx.printer().emit(&lead, output::lead_table)
        }
        LeadCommands::Move { id, to, index } => {
            let mut op = MoveLead::new(id, to);
            if let Some(index) = index {
                op = op.at(index);
            }
            let moved = ctx.execute(&op).await?;
            ctx.printer().emit(&moved, describe_move)
        }
        LeadCommands::Drop { event } => {
            let event: DragEnd = serde_json::from_str(&event)?;
            let moved = ctx.execute(&DropLead::new(event)).await?;
            ctx.printer().emit(&moved, describe_move)
        }
        LeadCommands::Delete { id } => {
            let deleted = ctx.execute(&DeleteLead::new(id)).await?;
            ctx.printer().emit(&deleted, |deleted| {
                if deleted["deleted"].as_bool().unwrap_or(false) {
                    format!(
                        "Deleted lead {} from {}",
                        field(deleted, "id"),
                        field(deleted, "column")
                    )
                } else {
                    format!("Lead {} is not on the board", field(deleted, "id"))
                }
            })
        }
    }
}

fn field(value: &Value, key: &str) -> String {
    match &value[key] {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

fn describe_move(moved: &Value) -> String {
    if !moved["moved"].as_bool().unwrap_or(false) {
        return format!("Lead {} stayed where it was", field(moved, "id"));
    }
    format!(
        "Moved lead {} from {}[{}] to {}[{}]",
        field(moved, "id"),
        field(&moved["from"], "column"),
        field(&moved["from"], "index"),
        field(&moved["to"], "column"),
        field(&moved["to"], "index"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe_move() {
        let moved = json!({
            "id": "lead-1",
            "from": {"column": "novo", "index": 0},
            "to": {"column": "fechado", "index": 2},
            "moved": true
        });
        assert_eq!(
            describe_move(&moved),
            "Moved lead lead-1 from novo[0] to fechado[2]"
        );
        assert_eq!(
            describe_move(&json!({"id": "lead-1", "moved": false})),
            "Lead lead-1 stayed where it was"
        );
    }
}
