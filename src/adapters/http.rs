use crate::domain::model::{decode_catalog, FilterSpec, NewService, ServiceId, ServiceRecord};
use crate::domain::ports::CatalogStore;
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Confirmation body of `DELETE /services/:id`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

/// Catalog served by the `/services` collection resource. Filtering and
/// sorting are forwarded as query parameters.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    endpoint: Url,
    client: Client,
}

impl HttpCatalog {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| CatalogError::InvalidConfigValueError {
            field: "catalog.endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { endpoint, client })
    }

    fn item_url(&self, id: &ServiceId) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::ConfigError {
                message: format!("Catalog endpoint cannot take a path: {}", self.endpoint),
            })?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }

    /// `POST /services`; the server assigns the id.
    pub async fn create(&self, service: &NewService) -> Result<ServiceRecord> {
        tracing::debug!("Creating service '{}' at {}", service.title, self.endpoint);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(service)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let record: ServiceRecord = response.json().await?;
        tracing::info!("Created service {}", record.id);
        Ok(record)
    }

    /// `DELETE /services/:id`. A missing id comes back as an API error
    /// carrying the server's message.
    pub async fn delete(&self, id: &ServiceId) -> Result<DeleteConfirmation> {
        let url = self.item_url(id)?;
        tracing::debug!("Deleting service at {}", url);
        let response = self.client.delete(url).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl CatalogStore for HttpCatalog {
    async fn fetch(&self, spec: &FilterSpec) -> Result<Vec<ServiceRecord>> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&spec.to_query_pairs())
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());
        let response = ensure_success(response).await?;
        let json: serde_json::Value = response.json().await?;
        decode_catalog(json)
    }

    async fn get(&self, id: &ServiceId) -> Result<Option<ServiceRecord>> {
        let url = self.item_url(id)?;
        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(response).await?;
        Ok(Some(response.json().await?))
    }

    fn describe(&self) -> String {
        format!("endpoint {}", self.endpoint)
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.trim().to_string()
            }
        });

    tracing::warn!("Catalog API returned {}: {}", status, message);
    Err(CatalogError::ApiError {
        status: status.as_u16(),
        message,
    })
}
