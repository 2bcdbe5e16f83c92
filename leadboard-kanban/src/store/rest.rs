//! Lead store backed by a PostgREST-style HTTP API
//!
//! Requests look like:
//!
//! - `GET    {base}/rest/v1/{table}?select=*`
//! - `POST   {base}/rest/v1/{table}` with the lead as JSON
//! - `DELETE {base}/rest/v1/{table}?id=eq.{id}`
//!
//! Every request carries the `apikey` header and a bearer token.

use super::{LeadStore, StoreError, StoreResult};
use crate::types::{Lead, LeadId};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Table holding lead rows when none is configured
pub const DEFAULT_TABLE: &str = "leads";

#[derive(Debug, Clone)]
pub struct RestLeadStore {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl RestLeadStore {
    /// Build a store for `base_url`, timing out each request after `timeout`
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
        })
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Turn a non-success response into `StoreError::Http`
    async fn check(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Http {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl LeadStore for RestLeadStore {
    async fn list_leads(&self) -> StoreResult<Vec<Lead>> {
        let request = self
            .client
            .get(self.table_url())
            .query(&[("select", "*")]);
        let response = Self::check(self.authorize(request).send().await?).await?;
        let leads: Vec<Lead> = response.json().await?;
        debug!(count = leads.len(), table = %self.table, "listed leads");
        Ok(leads)
    }

    async fn insert_lead(&self, lead: &Lead) -> StoreResult<()> {
        let request = self
            .client
            .post(self.table_url())
            .header("Prefer", "return=minimal")
            .json(lead);
        Self::check(self.authorize(request).send().await?).await?;
        debug!(lead = %lead.id, "inserted lead");
        Ok(())
    }

    async fn delete_lead(&self, id: &LeadId) -> StoreResult<()> {
        let filter = format!("eq.{}", id);
        let request = self
            .client
            .delete(self.table_url())
            .query(&[("id", filter.as_str())]);
        let response = self.authorize(request).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::check(response).await?;
        debug!(lead = %id, "deleted lead");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(server: &MockServer) -> RestLeadStore {
        RestLeadStore::new(server.uri(), "anon-key", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_list_leads() {
        let mock_server = MockServer::start().await;
        let body = serde_json::json!([{
            "id": "lead-1",
            "title": "Implementação ERP",
            "company": "Tech Solutions",
            "value": 50000.0,
            "contact": "(11) 98765-4321",
            "createdAt": "2024-03-15T00:00:00Z"
        }]);

        Mock::given(method("GET"))
            .and(path("/rest/v1/leads"))
            .and(query_param("select", "*"))
            .and(header("apikey", "anon-key"))
            .and(header("Authorization", "Bearer anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock_server)
            .await;

        let leads = store(&mock_server).list_leads().await.unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].id.as_str(), "lead-1");
        assert_eq!(leads[0].company, "Tech Solutions");
    }

    #[tokio::test]
    async fn test_insert_lead_posts_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/crm_leads"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&mock_server)
            .await;

        store(&mock_server)
            .with_table("crm_leads")
            .insert_lead(&Lead::new("ERP"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_uses_id_filter() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/rest/v1/leads"))
            .and(query_param("id", "eq.lead-3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        store(&mock_server)
            .delete_lead(&"lead-3".into())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_server_error_is_retryable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&mock_server)
            .await;

        let err = store(&mock_server)
            .delete_lead(&"lead-3".into())
            .await
            .unwrap_err();
        match &err {
            StoreError::Http { status, body } => {
                assert_eq!(*status, 503);
                assert_eq!(body, "down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_client_error_is_not_retryable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let err = store(&mock_server)
            .insert_lead(&Lead::new("ERP"))
            .await
            .unwrap_err();
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let store = RestLeadStore::new("http://127.0.0.1:1", "k", Duration::from_millis(200))
            .unwrap();
        let err = store.list_leads().await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
        assert!(err.is_retryable());
    }
}
