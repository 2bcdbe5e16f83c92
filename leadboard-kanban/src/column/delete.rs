//! DeleteColumn command

use crate::context::BoardContext;
use crate::error::{BoardError, LeadFailure};
use crate::reducer::BoardOp;
use crate::types::LeadId;
use leadboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Delete a column together with every lead it holds.
///
/// Each lead is deleted from the store first, top to bottom, with retry.
/// Confirmed leads leave the board; if any lead could not be deleted the
/// column stays, holding only those leads, and the failures are reported.
/// Leads moved into the column mid-delete go through the store as well
/// before the column is removed.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteColumn {
    /// Column id or slug
    pub id: String,
}

operation!(
    DeleteColumn,
    verb = "delete",
    noun = "column",
    description = "Delete a column and its leads"
);

impl DeleteColumn {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteColumn {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = Instant::now();
        let input = serde_json::to_value(self).unwrap_or(Value::Null);

        let result = async {
            let (column, mut pending) = {
                let board = ctx.read_board().await;
                let found = board.resolve_column(&self.id)?;
                (found.id.clone(), found.lead_ids.clone())
            };

            let mut deleted = 0;
            let mut failures: Vec<LeadFailure> = Vec::new();
            loop {
                let mut confirmed = Vec::with_capacity(pending.len());
                for lead_id in &pending {
                    match ctx
                        .retry_policy()
                        .retry("delete lead", move || ctx.store().delete_lead(lead_id))
                        .await
                    {
                        Ok(()) => confirmed.push(lead_id.clone()),
                        Err(e) => {
                            warn!(column = %column, lead = %lead_id, error = %e, "lead kept");
                            failures.push(LeadFailure {
                                lead_id: lead_id.to_string(),
                                error: e.to_string(),
                            });
                        }
                    }
                }
                deleted += confirmed.len();

                // Leads moved in while the store calls were running have not
                // been deleted remotely yet; they keep the column alive.
                let failed = &failures;
                let (_, arrived) = ctx
                    .transition_with(|board| {
                        let remaining: Vec<LeadId> = board
                            .column(&column)
                            .map(|c| {
                                c.lead_ids
                                    .iter()
                                    .filter(|id| !confirmed.contains(id))
                                    .cloned()
                                    .collect()
                            })
                            .unwrap_or_default();
                        let arrived: Vec<LeadId> = remaining
                            .iter()
                            .filter(|id| !failed.iter().any(|f| f.lead_id == id.as_str()))
                            .cloned()
                            .collect();

                        let mut ops: Vec<BoardOp> =
                            confirmed.iter().cloned().map(BoardOp::RemoveLead).collect();
                        if remaining.is_empty() && board.column(&column).is_some() {
                            ops.push(BoardOp::RemoveColumn(column.clone()));
                        }
                        Ok((ops, arrived))
                    })
                    .await?;

                if arrived.is_empty() {
                    break;
                }
                debug!(column = %column, leads = arrived.len(), "leads arrived during delete");
                pending = arrived;
            }

            if !failures.is_empty() {
                return Err(BoardError::CascadeIncomplete {
                    id: column.to_string(),
                    failures,
                });
            }

            info!(column = %column, leads = deleted, "column deleted");
            Ok(serde_json::json!({
                "deleted": true,
                "id": column,
                "leads_deleted": deleted,
            }))
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::seed_board;
    use crate::retry::RetryPolicy;
    use crate::lead::MoveLead;
    use crate::store::{LeadStore, MemoryLeadStore, StoreError, StoreResult};
    use crate::types::{Board, Column, Lead};
    use std::sync::Arc;
    use tokio::sync::{Notify, Semaphore};

    /// Holds every delete until the test opens the gate
    struct GatedStore {
        inner: MemoryLeadStore,
        entered: Notify,
        gate: Semaphore,
    }

    #[async_trait]
    impl LeadStore for GatedStore {
        async fn list_leads(&self) -> StoreResult<Vec<Lead>> {
            self.inner.list_leads().await
        }

        async fn insert_lead(&self, lead: &Lead) -> StoreResult<()> {
            self.inner.insert_lead(lead).await
        }

        async fn delete_lead(&self, id: &LeadId) -> StoreResult<()> {
            self.entered.notify_one();
            let _permit = self
                .gate
                .acquire()
                .await
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
            self.inner.delete_lead(id).await
        }
    }

    fn setup() -> (Arc<MemoryLeadStore>, BoardContext) {
        let leads: Vec<Lead> = ["A", "B", "C", "D"]
            .into_iter()
            .map(|id| Lead::new(id).with_id(id))
            .collect();
        let store = Arc::new(MemoryLeadStore::with_leads(leads.clone()));
        let board = Board::from_parts(
            vec![
                Column::new("novo", "Novo Lead").with_leads(vec!["A".into()]),
                Column::new("inativo", "Inativo").with_leads(vec![
                    "B".into(),
                    "C".into(),
                    "D".into(),
                ]),
            ],
            leads,
        );
        let ctx = BoardContext::new(store.clone())
            .with_board(board)
            .with_retry_policy(RetryPolicy::immediate(1));
        (store, ctx)
    }

    #[tokio::test]
    async fn test_delete_column_cascades() {
        let (store, ctx) = setup();

        let result = DeleteColumn::new("inativo")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["leads_deleted"], 3);
        let board = ctx.read_board().await;
        assert_eq!(board.column_order, vec!["novo".into()]);
        assert_eq!(board.lead_count(), 1);
        assert_eq!(store.list_leads().await.unwrap().len(), 1);
        board.validate().unwrap();
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_column_with_failed_leads() {
        let (store, ctx) = setup();
        store.fail_deletes_for(["C".into()]).await;

        let result = DeleteColumn::new("inativo").execute(&ctx).await;
        let (value, entry) = result.split();

        match value {
            Err(BoardError::CascadeIncomplete { id, failures }) => {
                assert_eq!(id, "inativo");
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].lead_id, "C");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(entry.unwrap().is_error());

        let board = ctx.read_board().await;
        board.validate().unwrap();
        assert_eq!(
            board.column(&"inativo".into()).unwrap().lead_ids,
            vec!["C".into()]
        );
        assert!(board.lead(&"B".into()).is_none());
        assert!(board.lead(&"D".into()).is_none());
        assert!(store.contains(&"C".into()).await);
    }

    #[tokio::test]
    async fn test_retry_after_partial_failure_finishes_the_job() {
        let (store, ctx) = setup();
        store.fail_deletes_times("C", 2).await;

        assert!(DeleteColumn::new("inativo")
            .execute(&ctx)
            .await
            .into_result()
            .is_err());
        DeleteColumn::new("inativo")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert!(ctx.read_board().await.column(&"inativo".into()).is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_empty_column() {
        let ctx = BoardContext::new(Arc::new(MemoryLeadStore::new())).with_board(seed_board());

        DeleteColumn::new("correcao")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(ctx.read_board().await.column_order.len(), 4);
    }

    #[tokio::test]
    async fn test_delete_unknown_column() {
        let (store, ctx) = setup();
        let result = DeleteColumn::new("perdido").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(BoardError::ColumnNotFound { .. })));
        assert_eq!(store.delete_calls(), 0);
    }

    #[tokio::test]
    async fn test_lead_moved_in_mid_delete_reaches_the_store() {
        let leads = vec![Lead::new("A").with_id("A"), Lead::new("B").with_id("B")];
        let store = Arc::new(GatedStore {
            inner: MemoryLeadStore::with_leads(leads.clone()),
            entered: Notify::new(),
            gate: Semaphore::new(0),
        });
        let board = Board::from_parts(
            vec![
                Column::new("novo", "Novo Lead").with_leads(vec!["A".into()]),
                Column::new("inativo", "Inativo").with_leads(vec!["B".into()]),
            ],
            leads,
        );
        let ctx = BoardContext::new(store.clone())
            .with_board(board)
            .with_retry_policy(RetryPolicy::none());

        let delete = DeleteColumn::new("inativo");
        let (result, ()) = tokio::join!(delete.execute(&ctx), async {
            store.entered.notified().await;
            MoveLead::new("A", "inativo")
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
            store.gate.add_permits(1);
        });

        let result = result.into_result().unwrap();
        assert_eq!(result["leads_deleted"], 2);

        let board = ctx.read_board().await;
        board.validate().unwrap();
        assert!(board.column(&"inativo".into()).is_none());
        assert!(board.lead(&"A".into()).is_none());
        assert_eq!(store.inner.delete_calls(), 2);
        assert!(store.inner.is_empty().await);
    }

    #[tokio::test]
    async fn test_lead_moved_in_mid_delete_keeps_column_when_its_delete_fails() {
        let leads = vec![Lead::new("A").with_id("A"), Lead::new("B").with_id("B")];
        let store = Arc::new(GatedStore {
            inner: MemoryLeadStore::with_leads(leads.clone()),
            entered: Notify::new(),
            gate: Semaphore::new(0),
        });
        store.inner.fail_deletes_for(["A".into()]).await;
        let board = Board::from_parts(
            vec![
                Column::new("novo", "Novo Lead").with_leads(vec!["A".into()]),
                Column::new("inativo", "Inativo").with_leads(vec!["B".into()]),
            ],
            leads,
        );
        let ctx = BoardContext::new(store.clone())
            .with_board(board)
            .with_retry_policy(RetryPolicy::none());

        let delete = DeleteColumn::new("inativo");
        let (result, ()) = tokio::join!(delete.execute(&ctx), async {
            store.entered.notified().await;
            MoveLead::new("A", "inativo")
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
            store.gate.add_permits(1);
        });

        match result.into_result() {
            Err(BoardError::CascadeIncomplete { failures, .. }) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].lead_id, "A");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        let board = ctx.read_board().await;
        assert_eq!(
            board.column(&"inativo".into()).unwrap().lead_ids,
            vec!["A".into()]
        );
        assert!(store.inner.contains(&"A".into()).await);
    }
}
