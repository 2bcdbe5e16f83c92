//! In-memory lead store

use super::{LeadStore, StoreError, StoreResult};
use crate::types::{Lead, LeadId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Keeps leads in a map. Deletes can be made to fail for chosen ids, which is
/// how callers exercise remote-failure paths without a network.
#[derive(Debug, Default)]
pub struct MemoryLeadStore {
    leads: RwLock<HashMap<LeadId, Lead>>,
    /// id -> remaining failures (`None` = fail forever)
    failing: RwLock<HashMap<LeadId, Option<usize>>>,
    delete_calls: AtomicUsize,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given leads
    pub fn with_leads(leads: impl IntoIterator<Item = Lead>) -> Self {
        Self {
            leads: RwLock::new(leads.into_iter().map(|l| (l.id.clone(), l)).collect()),
            ..Self::default()
        }
    }

    /// Make every delete of these ids fail with `StoreError::Unavailable`
    pub async fn fail_deletes_for(&self, ids: impl IntoIterator<Item = LeadId>) {
        let mut failing = self.failing.write().await;
        for id in ids {
            failing.insert(id, None);
        }
    }

    /// Fail the next `times` deletes of `id`, then succeed
    pub async fn fail_deletes_times(&self, id: impl Into<LeadId>, times: usize) {
        self.failing.write().await.insert(id.into(), Some(times));
    }

    /// Number of `delete_lead` calls seen, successful or not
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub async fn contains(&self, id: &LeadId) -> bool {
        self.leads.read().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.leads.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.leads.read().await.is_empty()
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn list_leads(&self) -> StoreResult<Vec<Lead>> {
        Ok(self.leads.read().await.values().cloned().collect())
    }

    async fn insert_lead(&self, lead: &Lead) -> StoreResult<()> {
        self.leads.write().await.insert(lead.id.clone(), lead.clone());
        Ok(())
    }

    async fn delete_lead(&self, id: &LeadId) -> StoreResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);

        {
            let mut failing = self.failing.write().await;
            match failing.get_mut(id) {
                Some(None) => {
                    return Err(StoreError::Unavailable(format!("delete of {id} refused")))
                }
                Some(Some(remaining)) if *remaining > 0 => {
                    *remaining -= 1;
                    return Err(StoreError::Unavailable(format!("delete of {id} refused")));
                }
                Some(Some(_)) => {
                    failing.remove(id);
                }
                None => {}
            }
        }

        self.leads.write().await.remove(id);
        Ok(())
    }
}
