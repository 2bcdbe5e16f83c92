//! The operation traits

use crate::ExecutionResult;
use async_trait::async_trait;
use serde_json::Value;

/// Static metadata every operation carries.
///
/// Implement with the [`operation!`](crate::operation) macro rather than by hand.
pub trait Operation {
    /// Verb half of the op string, e.g. "move"
    fn verb(&self) -> &'static str;

    /// Noun half of the op string, e.g. "lead"
    fn noun(&self) -> &'static str;

    /// One-line human description
    fn description(&self) -> &'static str;

    /// Canonical op string used in logs ("move lead")
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Execute an operation against a context `C`, failing with `E`.
#[async_trait]
pub trait Execute<C, E>: Operation + Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;
}

/// Implement [`Operation`] for a struct.
///
/// ```ignore
/// operation!(DeleteLead, verb = "delete", noun = "lead", description = "Delete a lead");
/// ```
#[macro_export]
macro_rules! operation {
    ($ty:ty, verb = $verb:literal, noun = $noun:literal, description = $desc:literal) => {
        impl $crate::Operation for $ty {
            fn verb(&self) -> &'static str {
                $verb
            }

            fn noun(&self) -> &'static str {
                $noun
            }

            fn description(&self) -> &'static str {
                $desc
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping;

    crate::operation!(Ping, verb = "ping", noun = "board", description = "Check the board");

    #[async_trait]
    impl Execute<(), String> for Ping {
        async fn execute(&self, _ctx: &()) -> ExecutionResult<Value, String> {
            ExecutionResult::Unlogged {
                value: serde_json::json!({"pong": true}),
            }
        }
    }

    #[test]
    fn test_op_string() {
        assert_eq!(Ping.op_string(), "ping board");
        assert_eq!(Ping.description(), "Check the board");
    }

    #[tokio::test]
    async fn test_execute_unlogged() {
        let result = Ping.execute(&()).await;
        assert!(!result.should_log());
        assert_eq!(result.into_result().unwrap()["pong"], true);
    }
}
