//! Core types for the board engine

mod board;
mod drag;
mod ids;
mod lead;

// Re-export all types
pub use board::{slugify, Board, BoardLayout, Column};
pub use drag::{DragEnd, DragLocation, LeadMove, Slot};
pub use ids::{ColumnId, LeadId};
pub use lead::Lead;
