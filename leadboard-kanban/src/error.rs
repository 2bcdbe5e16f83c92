//! Error types for the board engine

use crate::store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// A single lead that could not be removed remotely during a column cascade
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LeadFailure {
    pub lead_id: String,
    pub error: String,
}

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// No layout file at the given path
    #[error("board not initialized at {path}")]
    NotInitialized { path: PathBuf },

    /// Layout file already present
    #[error("board already exists at {path}")]
    AlreadyExists { path: PathBuf },

    #[error("lead not found: {id}")]
    LeadNotFound { id: String },

    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// A slug matched more than one column
    #[error("column reference '{reference}' is ambiguous: {candidates:?}")]
    AmbiguousColumn {
        reference: String,
        candidates: Vec<String>,
    },

    /// The board has no column to place a lead in
    #[error("board has no columns")]
    NoColumns,

    #[error("duplicate {item_type} ID: {id}")]
    DuplicateId { item_type: String, id: String },

    /// Column titles must contain something other than whitespace
    #[error("column title cannot be empty")]
    EmptyTitle,

    /// The drag source index does not hold the dragged lead
    #[error("lead {id} is not at index {index} of column {column}")]
    LeadNotAtIndex {
        id: String,
        column: String,
        index: usize,
    },

    #[error("index {index} out of range for column {column} (len {len})")]
    IndexOutOfRange {
        column: String,
        index: usize,
        len: usize,
    },

    /// A board snapshot broke one of its structural rules
    #[error("board invariant violated: {message}")]
    Invariant { message: String },

    /// The lead store refused or could not be reached
    #[error("lead store error: {0}")]
    Store(#[from] StoreError),

    /// Some leads of a column could not be deleted remotely; the column was kept
    #[error("column '{id}' kept: {} lead(s) failed to delete", .failures.len())]
    CascadeIncomplete {
        id: String,
        failures: Vec<LeadFailure>,
    },

    #[error("lock busy - another operation in progress")]
    LockBusy,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl BoardError {
    /// Create an invariant violation
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }

    /// Create a duplicate ID error
    pub fn duplicate_id(item_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            item_type: item_type.into(),
            id: id.into(),
        }
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::LockBusy => true,
            Self::Store(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Validation errors are rejected locally and never touch the store
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyTitle
                | Self::LeadNotAtIndex { .. }
                | Self::IndexOutOfRange { .. }
                | Self::DuplicateId { .. }
        )
    }
}
