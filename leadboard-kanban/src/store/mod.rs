//! Lead stores: where lead records live outside the board.
//!
//! The board only ever lists, inserts and deletes whole leads; column layout
//! is not the store's concern.

mod file;
mod memory;
mod rest;

pub use file::FileLeadStore;
pub use memory::MemoryLeadStore;
pub use rest::{RestLeadStore, DEFAULT_TABLE};

use crate::types::{Lead, LeadId};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for store calls
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures reported by a lead store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The id cannot name a record in this store
    #[error("invalid lead id: {id:?}")]
    InvalidId { id: String },

    /// The backend answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never got an answer
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend is temporarily refusing work
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Transient failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Unavailable(_) => true,
            Self::Http { status, .. } => *status >= 500 || *status == 408,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Serialization(error.to_string())
        } else if let Some(status) = error.status() {
            Self::Http {
                status: status.as_u16(),
                body: error.to_string(),
            }
        } else {
            Self::Transport(error.to_string())
        }
    }
}

impl From<serde_yaml_ng::Error> for StoreError {
    fn from(error: serde_yaml_ng::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Persistence for lead records, keyed by id
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Every lead the store holds, in no particular order
    async fn list_leads(&self) -> StoreResult<Vec<Lead>>;

    async fn insert_lead(&self, lead: &Lead) -> StoreResult<()>;

    /// Remove a lead. Deleting an id the store does not hold succeeds.
    async fn delete_lead(&self, id: &LeadId) -> StoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_classification() {
        assert!(StoreError::Transport("reset".into()).is_retryable());
        assert!(StoreError::Http {
            status: 503,
            body: String::new()
        }
        .is_retryable());
        assert!(!StoreError::Http {
            status: 404,
            body: String::new()
        }
        .is_retryable());
        assert!(!StoreError::InvalidId { id: "../x".into() }.is_retryable());
    }
}
