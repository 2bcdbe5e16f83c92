//! BoardOperationProcessor - runs board operations and records activity

use crate::context::BoardContext;
use crate::error::BoardError;
use leadboard_operations::{async_trait, Execute, OperationProcessor};
use serde_json::Value;
use tracing::{debug, warn};

/// Executes operations against a [`BoardContext`], attributing logged
/// entries to an actor and appending them to the activity log.
#[derive(Debug, Clone, Default)]
pub struct BoardOperationProcessor {
    actor: Option<String>,
}

impl BoardOperationProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute every logged entry to `actor`
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }
}

#[async_trait]
impl OperationProcessor<BoardContext, BoardError> for BoardOperationProcessor {
    async fn process<O>(&self, operation: &O, ctx: &BoardContext) -> Result<Value, BoardError>
    where
        O: Execute<BoardContext, BoardError> + 'static,
    {
        let _lock = ctx.lock().await?;

        let (result, log_entry) = operation.execute(ctx).await.split();

        if let Some(mut entry) = log_entry {
            if let Some(actor) = &self.actor {
                entry = entry.with_actor(actor.clone());
            }
            debug!(op = %entry.op, failed = entry.is_error(), "recording activity");
            if let Err(e) = ctx.append_activity(&entry).await {
                warn!(op = %entry.op, error = %e, "failed to append activity entry");
            }
        }

        result
    }
}
