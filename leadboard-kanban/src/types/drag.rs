//! Drag-and-drop messages

use super::ids::{ColumnId, LeadId};
use serde::{Deserialize, Serialize};

/// Where a drag started or ended, as the drag library reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    pub droppable_id: String,
    pub index: usize,
}

/// The drag-end event emitted by the UI.
///
/// `destination` is absent when the card was released outside every column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEnd {
    pub draggable_id: String,
    pub source: DragLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<DragLocation>,
}

impl DragEnd {
    /// Convert to the reducer's move message; `None` for a cancelled drag
    pub fn to_move(&self) -> Option<LeadMove> {
        let destination = self.destination.as_ref()?;
        Some(LeadMove {
            lead_id: LeadId::from_string(&self.draggable_id),
            from: Slot::new(self.source.droppable_id.as_str(), self.source.index),
            to: Slot::new(destination.droppable_id.as_str(), destination.index),
        })
    }
}

/// A position on the board: column plus index within it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub column: ColumnId,
    pub index: usize,
}

impl Slot {
    pub fn new(column: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            column: column.into(),
            index,
        }
    }
}

/// A lead released at a new slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadMove {
    pub lead_id: LeadId,
    pub from: Slot,
    pub to: Slot,
}

impl LeadMove {
    pub fn new(lead_id: impl Into<LeadId>, from: Slot, to: Slot) -> Self {
        Self {
            lead_id: lead_id.into(),
            from,
            to,
        }
    }

    /// Dropped exactly where it was picked up
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}
