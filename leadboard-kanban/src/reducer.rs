//! The board reducer.
//!
//! [`apply`] is a pure transition from one board snapshot to the next. It never
//! mutates its input; on error the caller simply keeps the board it had. Every
//! `Ok` result satisfies [`Board::validate`].

use crate::error::{BoardError, Result};
use crate::types::{Board, Column, ColumnId, Lead, LeadId, LeadMove};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single local transition of the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum BoardOp {
    /// Reorder within a column or move across columns
    MoveLead(LeadMove),
    /// Add a lead to the set and append it to a column
    InsertLead { lead: Lead, column: ColumnId },
    /// Drop a lead from the set and from every column
    RemoveLead(LeadId),
    /// Append an empty column
    AddColumn { id: ColumnId, title: String },
    /// Drop a column and every lead it owned
    RemoveColumn(ColumnId),
    RenameColumn { id: ColumnId, title: String },
}

/// Apply one operation to a board, returning the next board.
pub fn apply(board: &Board, op: &BoardOp) -> Result<Board> {
    match op {
        BoardOp::MoveLead(mv) => move_lead(board, mv),
        BoardOp::InsertLead { lead, column } => insert_lead(board, lead, column),
        BoardOp::RemoveLead(id) => Ok(remove_lead(board, id)),
        BoardOp::AddColumn { id, title } => add_column(board, id, title),
        BoardOp::RemoveColumn(id) => remove_column(board, id),
        BoardOp::RenameColumn { id, title } => rename_column(board, id, title),
    }
}

/// Apply operations in order; all or nothing.
pub fn apply_all<'a>(board: &Board, ops: impl IntoIterator<Item = &'a BoardOp>) -> Result<Board> {
    let mut next = board.clone();
    for op in ops {
        next = apply(&next, op)?;
    }
    Ok(next)
}

fn column<'a>(board: &'a Board, id: &ColumnId) -> Result<&'a Column> {
    board
        .columns
        .get(id)
        .ok_or_else(|| BoardError::ColumnNotFound { id: id.to_string() })
}

fn move_lead(board: &Board, mv: &LeadMove) -> Result<Board> {
    let source = column(board, &mv.from.column)?;
    let dest = column(board, &mv.to.column)?;

    if source.lead_ids.get(mv.from.index) != Some(&mv.lead_id) {
        return Err(BoardError::LeadNotAtIndex {
            id: mv.lead_id.to_string(),
            column: mv.from.column.to_string(),
            index: mv.from.index,
        });
    }

    if mv.is_noop() {
        debug!(lead = %mv.lead_id, "drop on own slot, board unchanged");
        return Ok(board.clone());
    }

    let same_column = mv.from.column == mv.to.column;
    let dest_len = if same_column {
        source.len() - 1
    } else {
        dest.len()
    };
    if mv.to.index > dest_len {
        return Err(BoardError::IndexOutOfRange {
            column: mv.to.column.to_string(),
            index: mv.to.index,
            len: dest_len,
        });
    }

    let mut next = board.clone();
    if same_column {
        let mut lead_ids = source.lead_ids.clone();
        let moved = lead_ids.remove(mv.from.index);
        lead_ids.insert(mv.to.index, moved);
        next.columns.insert(
            source.id.clone(),
            Column {
                lead_ids,
                ..source.clone()
            },
        );
    } else {
        let mut start = source.lead_ids.clone();
        let moved = start.remove(mv.from.index);
        let mut finish = dest.lead_ids.clone();
        finish.insert(mv.to.index, moved);
        next.columns.insert(
            source.id.clone(),
            Column {
                lead_ids: start,
                ..source.clone()
            },
        );
        next.columns.insert(
            dest.id.clone(),
            Column {
                lead_ids: finish,
                ..dest.clone()
            },
        );
    }

    debug!(
        lead = %mv.lead_id,
        from = %mv.from.column,
        from_index = mv.from.index,
        to = %mv.to.column,
        to_index = mv.to.index,
        "moved lead"
    );
    Ok(next)
}

fn insert_lead(board: &Board, lead: &Lead, column_id: &ColumnId) -> Result<Board> {
    column(board, column_id)?;
    if board.leads.contains_key(&lead.id) {
        return Err(BoardError::duplicate_id("lead", lead.id.to_string()));
    }

    let mut next = board.clone();
    next.leads.insert(lead.id.clone(), lead.clone());
    if let Some(column) = next.columns.get_mut(column_id) {
        column.lead_ids.push(lead.id.clone());
    }
    Ok(next)
}

fn remove_lead(board: &Board, id: &LeadId) -> Board {
    let mut next = board.clone();
    next.leads.remove(id);
    for column in next.columns.values_mut() {
        column.lead_ids.retain(|l| l != id);
    }
    next
}

fn add_column(board: &Board, id: &ColumnId, title: &str) -> Result<Board> {
    let title = title.trim();
    if title.is_empty() {
        return Err(BoardError::EmptyTitle);
    }
    if board.columns.contains_key(id) {
        return Err(BoardError::duplicate_id("column", id.to_string()));
    }

    let mut next = board.clone();
    next.columns.insert(id.clone(), Column::new(id.clone(), title));
    next.column_order.push(id.clone());
    Ok(next)
}

fn remove_column(board: &Board, id: &ColumnId) -> Result<Board> {
    let owned = column(board, id)?.lead_ids.clone();

    let mut next = board.clone();
    next.columns.remove(id);
    next.column_order.retain(|c| c != id);
    for lead in &owned {
        next.leads.remove(lead);
    }
    Ok(next)
}

fn rename_column(board: &Board, id: &ColumnId, title: &str) -> Result<Board> {
    let title = title.trim();
    if title.is_empty() {
        return Err(BoardError::EmptyTitle);
    }
    column(board, id)?;

    let mut next = board.clone();
    if let Some(column) = next.columns.get_mut(id) {
        column.title = title.to_string();
    }
    Ok(next)
}
