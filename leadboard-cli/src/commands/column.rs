use crate::cli::ColumnCommands;
use crate::context::CliContext;
use crate::error::CliResult;
use crate::output;
use leadboard_kanban::column::{AddColumn, DeleteColumn, ListColumns, RenameColumn};

pub async fn run(ctx: &CliContext, action: ColumnCommands) -> CliResult<()> {
    match action {
        ColumnCommands::Add { title } => {
            let column = ctx.execute(&AddColumn::new(title)).await?;
            ctx.printer().emit(&column, |column| {
                format!(
                    "Added column '{}' ({}) at position {}",
                    column["title"].as_str().unwrap_or_default(),
                    column["id"].as_str().unwrap_or_default(),
                    column["position"]
                )
            })
        }
        ColumnCommands::Rename { id, title } => {
            let column = ctx.execute(&RenameColumn::new(id, title)).await?;
            ctx.printer().emit(&column, |column| {
                format!(
                    "Renamed column {} to '{}'",
                    column["id"].as_str().unwrap_or_default(),
                    column["title"].as_str().unwrap_or_default()
                )
            })
        }
        ColumnCommands::Delete { id } => {
            let deleted = ctx.execute(&DeleteColumn::new(id)).await?;
            ctx.printer().emit(&deleted, |deleted| {
                format!(
                    "Deleted column {} and {} lead(s)",
                    deleted["id"].as_str().unwrap_or_default(),
                    deleted["leads_deleted"]
                )
            })
        }
        ColumnCommands::List => {
            let columns = ctx.execute(&ListColumns).await?;
            ctx.printer().emit(&columns, output::columns_table)
        }
    }
}
