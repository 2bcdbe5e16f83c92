use crate::context::CliContext;
use crate::error::CliResult;
use crate::output;
use leadboard_kanban::board::{GetBoard, InitBoard};

pub async fn init(ctx: &CliContext, empty: bool) -> CliResult<()> {
    let op = if empty || !ctx.config.seed {
        InitBoard::empty()
    } else {
        InitBoard::new()
    };
    let board = ctx.execute(&op).await?;
    let root = ctx.config.data_dir.display().to_string();
    ctx.printer().emit(&board, |board| {
        format!(
            "Initialized board in {root}\n{}",
            output::board_table(board)
        )
    })
}

pub async fn show(ctx: &CliContext) -> CliResult<()> {
    let board = ctx.execute(&GetBoard).await?;
    ctx.printer().emit(&board, output::board_table)
}
