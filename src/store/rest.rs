//! Client for the hosted document database's REST API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{Document, DocumentStore, ListQuery, SortDirection, StoreError};

/// Wire shape for a single document.
#[derive(Debug, Deserialize)]
struct WireDocument {
    id: String,
    fields: Value,
}

#[derive(Debug, Deserialize)]
struct WireDocumentList {
    documents: Vec<WireDocument>,
}

pub struct RestStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http,
            base_url,
            api_key: api_key.into(),
        }
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/v1/{}/{}", self.base_url, collection, id)
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/v1/{}", self.base_url, collection)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        request
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl DocumentStore for RestStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let url = self.document_url(collection, id);
        let response = self.send(self.http.get(&url)).await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::Request(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        let doc: WireDocument = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(Some(Document::new(doc.id, doc.fields)))
    }

    async fn list(&self, collection: &str, query: ListQuery) -> Result<Vec<Document>, StoreError> {
        let url = self.collection_url(collection);
        let mut request = self.http.get(&url);

        if let Some((field, value)) = &query.filter {
            // Filter values cross the wire as JSON so type information survives
            let encoded = serde_json::to_string(value)
                .map_err(|e| StoreError::Request(e.to_string()))?;
            request = request.query(&[("filter_field", field.as_str()), ("filter_value", &encoded)]);
        }
        if let Some((field, direction)) = &query.order_by {
            let direction = match direction {
                SortDirection::Ascending => "asc",
                SortDirection::Descending => "desc",
            };
            request = request.query(&[("order_by", field.as_str()), ("direction", direction)]);
        }

        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(StoreError::Request(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        let list: WireDocumentList = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(list
            .documents
            .into_iter()
            .map(|d| Document::new(d.id, d.fields))
            .collect())
    }

    async fn put(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError> {
        let url = self.document_url(collection, id);
        let response = self.send(self.http.put(&url).json(&fields)).await?;
        if !response.status().is_success() {
            return Err(StoreError::Request(format!(
                "PUT {} returned {}",
                url,
                response.status()
            )));
        }
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError> {
        let url = self.document_url(collection, id);
        let response = self.send(self.http.patch(&url).json(&fields)).await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::not_found(collection, id));
        }
        if !response.status().is_success() {
            return Err(StoreError::Request(format!(
                "PATCH {} returned {}",
                url,
                response.status()
            )));
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let url = self.document_url(collection, id);
        let response = self.send(self.http.delete(&url)).await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::not_found(collection, id));
        }
        if !response.status().is_success() {
            return Err(StoreError::Request(format!(
                "DELETE {} returned {}",
                url,
                response.status()
            )));
        }
        Ok(())
    }
}
