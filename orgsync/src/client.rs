//! HTTP transport for the uniform collection protocol.
//!
//! [`Transport`] is the seam between the sync client and the wire: production
//! code uses [`HttpTransport`] (reqwest against the REST surface), tests
//! substitute an in-memory fake. Response statuses map straight back onto the
//! error taxonomy, so a 404 from the server and a missing route both surface
//! as [`SyncError::NotFound`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::SyncError;
use crate::model::{Document, EntityKind};
use crate::registry;

/// The four operations of the uniform protocol.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn list(&self, kind: EntityKind) -> Result<Vec<Document>, SyncError>;
    async fn create(&self, kind: EntityKind, record: &Document) -> Result<Document, SyncError>;
    async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        record: &Document,
    ) -> Result<Document, SyncError>;
    async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), SyncError>;
}

/// Error body shared by every failing endpoint.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// [`Transport`] over HTTP+JSON.
pub struct HttpTransport {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        HttpTransport {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn collection_url(&self, kind: EntityKind) -> String {
        format!("{}/api/{}", self.base_url, registry::find(kind).route)
    }

    fn record_url(&self, kind: EntityKind, id: &str) -> String {
        format!("{}/{}", self.collection_url(kind), id)
    }

    /// Map a non-success response onto the taxonomy, preferring the server's
    /// own message when the body decodes.
    async fn reject(response: reqwest::Response) -> SyncError {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status.to_string(),
        };
        match status {
            reqwest::StatusCode::BAD_REQUEST => SyncError::Validation(message),
            reqwest::StatusCode::NOT_FOUND => SyncError::NotFound(message),
            _ => SyncError::Store(message),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn list(&self, kind: EntityKind) -> Result<Vec<Document>, SyncError> {
        let response = self.http.get(self.collection_url(kind)).send().await?;
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }
        Ok(response.json::<Vec<Document>>().await?)
    }

    async fn create(&self, kind: EntityKind, record: &Document) -> Result<Document, SyncError> {
        let response = self
            .http
            .post(self.collection_url(kind))
            .json(record.as_value())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }
        Ok(response.json::<Document>().await?)
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        record: &Document,
    ) -> Result<Document, SyncError> {
        let response = self
            .http
            .put(self.record_url(kind, id))
            .json(record.as_value())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }
        Ok(response.json::<Document>().await?)
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), SyncError> {
        let response = self.http.delete(self.record_url(kind, id)).send().await?;
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }
        // Body is `{"message": "<Label> deleted"}`; nothing to return.
        let _ = response.json::<Value>().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_follow_the_registry_routes() {
        let transport = HttpTransport::new("http://localhost:3000/");
        assert_eq!(
            transport.collection_url(EntityKind::HeroSlide),
            "http://localhost:3000/api/hero-slides"
        );
        assert_eq!(
            transport.record_url(EntityKind::WeeklyFee, "w3"),
            "http://localhost:3000/api/weekly-fees/w3"
        );
    }
}
