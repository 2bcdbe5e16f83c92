//! Processor trait: run an operation and take care of its log entry

use crate::Execute;
use async_trait::async_trait;
use serde_json::Value;

/// Runs operations for a context type and records what they did.
///
/// Implementations decide where log entries go (a file, memory, nowhere) and
/// which actor they are attributed to. Callers only see the plain `Result`.
#[async_trait]
pub trait OperationProcessor<C, E>: Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    async fn process<O>(&self, operation: &O, ctx: &C) -> Result<Value, E>
    where
        O: Execute<C, E> + 'static;
}
