//! Lead store backed by one YAML file per lead

use super::{LeadStore, StoreError, StoreResult};
use crate::context::atomic_write;
use crate::types::{Lead, LeadId};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

/// Stores each lead as `{dir}/{id}.yaml`
#[derive(Debug, Clone)]
pub struct FileLeadStore {
    dir: PathBuf,
}

impl FileLeadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path to a lead's YAML file; ids that would leave `dir` are rejected
    pub fn lead_path(&self, id: &LeadId) -> StoreResult<PathBuf> {
        if !is_file_safe(id.as_str()) {
            return Err(StoreError::InvalidId { id: id.to_string() });
        }
        Ok(self.dir.join(format!("{}.yaml", id)))
    }
}

fn is_file_safe(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && !id.contains("..")
        && !id.contains(['/', '\\', '\0'])
}

#[async_trait]
impl LeadStore for FileLeadStore {
    async fn list_leads(&self) -> StoreResult<Vec<Lead>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut leads = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let content = fs::read_to_string(&path).await?;
            match serde_yaml_ng::from_str::<Lead>(&content) {
                Ok(lead) if !is_file_safe(lead.id.as_str()) => {
                    warn!(path = %path.display(), id = %lead.id, "skipping lead with unsafe id")
                }
                Ok(lead) => leads.push(lead),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable lead file"),
            }
        }
        Ok(leads)
    }

    async fn insert_lead(&self, lead: &Lead) -> StoreResult<()> {
        let content = serde_yaml_ng::to_string(lead)?;
        atomic_write(&self.lead_path(&lead.id)?, content.as_bytes()).await?;
        Ok(())
    }

    async fn delete_lead(&self, id: &LeadId) -> StoreResult<()> {
        match fs::remove_file(self.lead_path(id)?).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileLeadStore) {
        let temp = TempDir::new().unwrap();
        let store = FileLeadStore::new(temp.path().join("leads"));
        (temp, store)
    }

    #[tokio::test]
    async fn test_empty_dir_lists_nothing() {
        let (_temp, store) = setup();
        assert!(store.list_leads().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let (_temp, store) = setup();
        let lead = Lead::new("Consultoria Cloud")
            .with_id("lead-2")
            .with_company("Cloud Nine")
            .with_value(35000.0);
        store.insert_lead(&lead).await.unwrap();

        assert!(store.lead_path(&"lead-2".into()).unwrap().exists());
        let leads = store.list_leads().await.unwrap();
        assert_eq!(leads, vec![lead]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_temp, store) = setup();
        store
            .insert_lead(&Lead::new("ERP").with_id("lead-1"))
            .await
            .unwrap();
        store.delete_lead(&"lead-1".into()).await.unwrap();
        store.delete_lead(&"lead-1".into()).await.unwrap();
        assert!(store.list_leads().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_skips_foreign_and_broken_files() {
        let (_temp, store) = setup();
        store
            .insert_lead(&Lead::new("ERP").with_id("lead-1"))
            .await
            .unwrap();
        std::fs::write(store.dir().join("notes.txt"), "hello").unwrap();
        std::fs::write(store.dir().join("broken.yaml"), ": : :").unwrap();

        let leads = store.list_leads().await.unwrap();
        assert_eq!(leads.len(), 1);
    }

    #[tokio::test]
    async fn test_ids_cannot_escape_the_directory() {
        let (temp, store) = setup();
        let outside = temp.path().join("x.yaml");
        std::fs::write(&outside, "keep me").unwrap();

        let err = store.delete_lead(&"../x".into()).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidId { .. }));
        assert!(outside.exists());

        let escaping = Lead::new("ERP").with_id("../x");
        assert!(matches!(
            store.insert_lead(&escaping).await,
            Err(StoreError::InvalidId { .. })
        ));
        assert_eq!(std::fs::read_to_string(&outside).unwrap(), "keep me");
    }

    #[tokio::test]
    async fn test_list_skips_hand_edited_unsafe_ids() {
        let (_temp, store) = setup();
        store
            .insert_lead(&Lead::new("ERP").with_id("lead-1"))
            .await
            .unwrap();
        let edited = serde_yaml_ng::to_string(&Lead::new("Hijack").with_id("../x")).unwrap();
        std::fs::write(store.dir().join("edited.yaml"), edited).unwrap();

        let leads = store.list_leads().await.unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].id.as_str(), "lead-1");
    }
}
