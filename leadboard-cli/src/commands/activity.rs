use crate::context::CliContext;
use crate::error::CliResult;
use crate::output;
use leadboard_kanban::activity::ListActivity;

pub async fn list(ctx: &CliContext, limit: Option<usize>) -> CliResult<()> {
    let mut op = ListActivity::new();
    if let Some(limit) = limit {
        op = op.with_limit(limit);
    }
    let entries = ctx.execute(&op).await?;
    ctx.printer().emit(&entries, output::activity_table)
}
