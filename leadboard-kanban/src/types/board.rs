//! Board-level types: Board, Column, BoardLayout

use super::ids::{ColumnId, LeadId};
use super::lead::Lead;
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Normalize a title the way column slugs are written: lowercased, each run
/// of whitespace collapsed to a single `-`.
pub fn slugify(title: &str) -> String {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// A pipeline stage holding an ordered list of leads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Visual order, top to bottom
    #[serde(default)]
    pub lead_ids: Vec<LeadId>,
}

impl Column {
    /// Create an empty column
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            lead_ids: Vec::new(),
        }
    }

    pub fn with_leads(mut self, lead_ids: Vec<LeadId>) -> Self {
        self.lead_ids = lead_ids;
        self
    }

    /// Normalized title, usable as a human reference to the column
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }

    pub fn position_of(&self, lead: &LeadId) -> Option<usize> {
        self.lead_ids.iter().position(|id| id == lead)
    }

    pub fn len(&self) -> usize {
        self.lead_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lead_ids.is_empty()
    }
}

/// The persisted shape of a board: columns in display order, each with its
/// lead ids. Leads themselves live in the lead store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub columns: Vec<Column>,
}

/// The full Kanban state.
///
/// `columns` is keyed by id; `column_order` controls left-to-right layout and
/// is kept separate from each column's lead order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub leads: HashMap<LeadId, Lead>,
    pub columns: HashMap<ColumnId, Column>,
    pub column_order: Vec<ColumnId>,
}

impl Board {
    /// An empty board with no columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from columns in display order and a set of leads.
    ///
    /// Performs no reconciliation; see [`Board::from_layout`] for that.
    pub fn from_parts(columns: Vec<Column>, leads: impl IntoIterator<Item = Lead>) -> Self {
        let column_order = columns.iter().map(|c| c.id.clone()).collect();
        Self {
            leads: leads.into_iter().map(|l| (l.id.clone(), l)).collect(),
            columns: columns.into_iter().map(|c| (c.id.clone(), c)).collect(),
            column_order,
        }
    }

    /// Rebuild a board from a stored layout and the leads the store returned.
    ///
    /// Ids that reference no lead are dropped, a lead placed twice keeps its
    /// first placement, and leads the layout never mentions are appended to the
    /// first column oldest first. With no columns at all, unplaced leads are
    /// left out of the board.
    pub fn from_layout(layout: BoardLayout, leads: Vec<Lead>) -> Self {
        let mut by_id: HashMap<LeadId, Lead> =
            leads.into_iter().map(|l| (l.id.clone(), l)).collect();
        let mut placed: HashSet<LeadId> = HashSet::new();
        let mut columns = Vec::with_capacity(layout.columns.len());
        let mut seen_columns: HashSet<ColumnId> = HashSet::new();

        for mut column in layout.columns {
            if !seen_columns.insert(column.id.clone()) {
                tracing::warn!(column = %column.id, "dropping duplicate column from layout");
                continue;
            }
            let before = column.lead_ids.len();
            column
                .lead_ids
                .retain(|id| by_id.contains_key(id) && placed.insert(id.clone()));
            if column.lead_ids.len() != before {
                tracing::debug!(
                    column = %column.id,
                    dropped = before - column.lead_ids.len(),
                    "dropped dangling or duplicate lead ids"
                );
            }
            columns.push(column);
        }

        let mut unplaced: Vec<&Lead> = by_id.values().filter(|l| !placed.contains(&l.id)).collect();
        unplaced.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        let unplaced: Vec<LeadId> = unplaced.into_iter().map(|l| l.id.clone()).collect();

        match columns.first_mut() {
            Some(first) => first.lead_ids.extend(unplaced),
            None => {
                if !unplaced.is_empty() {
                    tracing::warn!(count = unplaced.len(), "no columns to place leads in");
                }
                for id in unplaced {
                    by_id.remove(&id);
                }
            }
        }

        Self::from_parts(columns, by_id.into_values())
    }

    /// Columns in display order, each with its lead ids
    pub fn layout(&self) -> BoardLayout {
        BoardLayout {
            columns: self.ordered_columns().into_iter().cloned().collect(),
        }
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.get(id)
    }

    pub fn lead(&self, id: &LeadId) -> Option<&Lead> {
        self.leads.get(id)
    }

    /// The column currently owning a lead
    pub fn column_of(&self, lead: &LeadId) -> Option<&Column> {
        self.ordered_columns()
            .into_iter()
            .find(|c| c.lead_ids.contains(lead))
    }

    /// Columns in `column_order`
    pub fn ordered_columns(&self) -> Vec<&Column> {
        self.column_order
            .iter()
            .filter_map(|id| self.columns.get(id))
            .collect()
    }

    pub fn first_column(&self) -> Option<&Column> {
        self.column_order.first().and_then(|id| self.columns.get(id))
    }

    /// Leads of a column in visual order
    pub fn column_leads(&self, id: &ColumnId) -> Vec<&Lead> {
        self.columns
            .get(id)
            .map(|c| c.lead_ids.iter().filter_map(|l| self.leads.get(l)).collect())
            .unwrap_or_default()
    }

    /// Sum of lead values in a column
    pub fn column_value(&self, id: &ColumnId) -> f64 {
        self.column_leads(id).iter().map(|l| l.value).sum()
    }

    pub fn lead_count(&self) -> usize {
        self.leads.len()
    }

    /// Resolve a user-supplied column reference: exact id first, then slug.
    pub fn resolve_column(&self, reference: &str) -> Result<&Column> {
        if let Some(column) = self.columns.get(&ColumnId::from_string(reference)) {
            return Ok(column);
        }
        let wanted = slugify(reference);
        let matches: Vec<&Column> = self
            .ordered_columns()
            .into_iter()
            .filter(|c| c.slug() == wanted)
            .collect();
        match matches.as_slice() {
            [] => Err(BoardError::ColumnNotFound {
                id: reference.to_string(),
            }),
            [one] => Ok(one),
            many => Err(BoardError::AmbiguousColumn {
                reference: reference.to_string(),
                candidates: many.iter().map(|c| c.id.to_string()).collect(),
            }),
        }
    }

    /// Check the structural rules every board snapshot must satisfy:
    /// `column_order` is a permutation of the column keys, every placed id
    /// names a known lead, no id is placed twice, and every lead is placed.
    pub fn validate(&self) -> Result<()> {
        let ordered: HashSet<&ColumnId> = self.column_order.iter().collect();
        if ordered.len() != self.column_order.len() {
            return Err(BoardError::invariant("column order repeats a column"));
        }
        if ordered.len() != self.columns.len() || !self.columns.keys().all(|k| ordered.contains(k))
        {
            return Err(BoardError::invariant(
                "column order is not a permutation of the columns",
            ));
        }

        let mut placed: HashSet<&LeadId> = HashSet::new();
        for column in self.ordered_columns() {
            for id in &column.lead_ids {
                if !self.leads.contains_key(id) {
                    return Err(BoardError::invariant(format!(
                        "column {} references unknown lead {}",
                        column.id, id
                    )));
                }
                if !placed.insert(id) {
                    return Err(BoardError::invariant(format!(
                        "lead {} is placed more than once",
                        id
                    )));
                }
            }
        }

        if let Some(orphan) = self.leads.keys().find(|id| !placed.contains(id)) {
            return Err(BoardError::invariant(format!(
                "lead {} is not placed on any column",
                orphan
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn lead(id: &str, day: u32, value: f64) -> Lead {
        Lead::new(id)
            .with_id(id)
            .with_value(value)
            .with_created_at(Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap())
    }

    fn board() -> Board {
        Board::from_parts(
            vec![
                Column::new("novo", "Novo Lead").with_leads(vec!["l1".into(), "l3".into()]),
                Column::new("negociando", "Negociando").with_leads(vec!["l2".into()]),
            ],
            vec![lead("l1", 15, 100.0), lead("l2", 14, 50.0), lead("l3", 13, 25.0)],
        )
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Novo Lead"), "novo-lead");
        assert_eq!(slugify("  Em   Negociação "), "em-negociação");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn test_valid_board() {
        board().validate().unwrap();
    }

    #[test]
    fn test_column_of_and_value() {
        let b = board();
        assert_eq!(b.column_of(&"l3".into()).unwrap().id.as_str(), "novo");
        assert_eq!(b.column_value(&"novo".into()), 125.0);
        assert_eq!(b.column_value(&"missing".into()), 0.0);
    }

    #[test]
    fn test_validate_rejects_duplicate_placement() {
        let mut b = board();
        b.columns
            .get_mut(&ColumnId::from("negociando"))
            .unwrap()
            .lead_ids
            .push("l1".into());
        assert!(matches!(b.validate(), Err(BoardError::Invariant { .. })));
    }

    #[test]
    fn test_validate_rejects_dangling_order() {
        let mut b = board();
        b.column_order.push("ghost".into());
        assert!(matches!(b.validate(), Err(BoardError::Invariant { .. })));
    }

    #[test]
    fn test_validate_rejects_unknown_lead() {
        let mut b = board();
        b.leads.remove(&LeadId::from("l2"));
        assert!(b.validate().is_err());
    }

    #[test]
    fn test_from_layout_reconciles() {
        let layout = BoardLayout {
            columns: vec![
                Column::new("novo", "Novo Lead").with_leads(vec!["gone".into(), "l1".into()]),
                Column::new("fechado", "Fechado").with_leads(vec!["l1".into()]),
            ],
        };
        let b = Board::from_layout(
            layout,
            vec![lead("l1", 15, 1.0), lead("l2", 14, 1.0), lead("l3", 13, 1.0)],
        );
        b.validate().unwrap();
        let novo: Vec<&str> = b.columns[&ColumnId::from("novo")]
            .lead_ids
            .iter()
            .map(|id| id.as_str())
            .collect();
        // dangling dropped, unplaced appended oldest first
        assert_eq!(novo, vec!["l1", "l3", "l2"]);
        assert!(b.columns[&ColumnId::from("fechado")].is_empty());
    }

    #[test]
    fn test_from_layout_without_columns_drops_leads() {
        let b = Board::from_layout(BoardLayout::default(), vec![lead("l1", 1, 1.0)]);
        assert_eq!(b.lead_count(), 0);
        b.validate().unwrap();
    }

    #[test]
    fn test_resolve_column_by_id_and_slug() {
        let b = board();
        assert_eq!(b.resolve_column("novo").unwrap().id.as_str(), "novo");
        assert_eq!(b.resolve_column("Novo Lead").unwrap().id.as_str(), "novo");
        assert!(matches!(
            b.resolve_column("fechado"),
            Err(BoardError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_column_ambiguous_slug() {
        let b = Board::from_parts(
            vec![Column::new("a", "Won"), Column::new("b", "won")],
            Vec::new(),
        );
        assert!(matches!(
            b.resolve_column("WON"),
            Err(BoardError::AmbiguousColumn { .. })
        ));
    }

    #[test]
    fn test_layout_follows_column_order() {
        let mut b = board();
        b.column_order.reverse();
        let ids: Vec<String> = b.layout().columns.iter().map(|c| c.id.to_string()).collect();
        assert_eq!(ids, vec!["negociando", "novo"]);
    }
}
