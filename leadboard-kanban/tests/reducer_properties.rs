//! Property tests for the board reducer

use leadboard_kanban::{apply, Board, BoardError, BoardOp, Column, Lead, LeadId, LeadMove, Slot};
use proptest::prelude::*;
use std::collections::HashMap;

/// Board with `columns` columns and leads dealt round-robin by `placement`
fn build_board(columns: usize, placement: &[usize]) -> Board {
    let mut cols: Vec<Column> = (0..columns)
        .map(|i| Column::new(format!("c{i}"), format!("Column {i}")))
        .collect();
    let mut leads = Vec::new();
    for (n, target) in placement.iter().enumerate() {
        let id = format!("l{n}");
        cols[target % columns].lead_ids.push(id.as_str().into());
        leads.push(Lead::new(&id).with_id(id.as_str()));
    }
    Board::from_parts(cols, leads)
}

/// Turn raw numbers into a move the board accepts
fn valid_move(board: &Board, lead: usize, dest: usize, index: usize) -> Option<LeadMove> {
    let mut ids: Vec<&LeadId> = board.leads.keys().collect();
    if ids.is_empty() {
        return None;
    }
    ids.sort();
    let lead_id = ids[lead % ids.len()].clone();
    let source = board.column_of(&lead_id)?;
    let from = source.position_of(&lead_id)?;
    let dest_id = board.column_order[dest % board.column_order.len()].clone();
    let dest_len = if dest_id == source.id {
        source.len() - 1
    } else {
        board.column(&dest_id)?.len()
    };
    Some(LeadMove::new(
        lead_id,
        Slot::new(source.id.clone(), from),
        Slot::new(dest_id, index % (dest_len + 1)),
    ))
}

fn placement_counts(board: &Board) -> HashMap<LeadId, usize> {
    let mut counts = HashMap::new();
    for column in board.columns.values() {
        for id in &column.lead_ids {
            *counts.entry(id.clone()).or_insert(0) += 1;
        }
    }
    counts
}

proptest! {
    #[test]
    fn moves_preserve_every_lead(
        columns in 1usize..5,
        placement in prop::collection::vec(0usize..8, 0..10),
        moves in prop::collection::vec((0usize..20, 0usize..8, 0usize..12), 0..25),
    ) {
        let mut board = build_board(columns, &placement);
        let before = placement_counts(&board);

        for (lead, dest, index) in moves {
            let Some(mv) = valid_move(&board, lead, dest, index) else { continue };
            board = apply(&board, &BoardOp::MoveLead(mv)).unwrap();
            prop_assert!(board.validate().is_ok());
        }

        let after = placement_counts(&board);
        prop_assert_eq!(&before, &after);
        prop_assert!(after.values().all(|&n| n == 1));
    }

    #[test]
    fn own_slot_drop_is_identity(
        columns in 1usize..5,
        placement in prop::collection::vec(0usize..8, 1..10),
        pick in 0usize..20,
    ) {
        let board = build_board(columns, &placement);
        let mut ids: Vec<&LeadId> = board.leads.keys().collect();
        ids.sort();
        let id = ids[pick % ids.len()].clone();
        let column = board.column_of(&id).unwrap();
        let slot = Slot::new(column.id.clone(), column.position_of(&id).unwrap());

        let next = apply(&board, &BoardOp::MoveLead(LeadMove::new(id, slot.clone(), slot))).unwrap();
        prop_assert_eq!(next, board);
    }

    #[test]
    fn blank_column_titles_are_rejected(spaces in "[ \t]{0,6}") {
        let board = build_board(2, &[0, 1]);
        let result = apply(&board, &BoardOp::AddColumn { id: "new".into(), title: spaces });
        prop_assert!(matches!(result, Err(BoardError::EmptyTitle)));
    }

    #[test]
    fn removing_a_column_removes_exactly_its_leads(
        columns in 1usize..5,
        placement in prop::collection::vec(0usize..8, 0..10),
        victim in 0usize..8,
    ) {
        let board = build_board(columns, &placement);
        let victim = board.column_order[victim % board.column_order.len()].clone();
        let owned = board.column(&victim).unwrap().lead_ids.clone();

        let next = apply(&board, &BoardOp::RemoveColumn(victim.clone())).unwrap();

        prop_assert!(!next.column_order.contains(&victim));
        prop_assert!(owned.iter().all(|id| next.lead(id).is_none()));
        prop_assert_eq!(next.lead_count(), board.lead_count() - owned.len());
        prop_assert!(next.validate().is_ok());
    }
}
