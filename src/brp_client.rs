use crate::errors::AppError;
use crate::models::{Person, PersonCollection};
use crate::resources::Source;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Client for the HaalCentraal BRP `ingeschrevenpersonen` API.
///
/// Fetch failures for relatives must never abort the overall pipeline, so the
/// public fetchers log the failure and yield `None`; the strict `call` layer
/// stays internal.
#[derive(Debug, Clone)]
pub struct BrpClient {
    client: Client,
}

impl BrpClient {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::UpstreamError(format!("Failed to create BRP client: {}", e)))?;

        Ok(Self { client })
    }

    /// One outbound GET against the source; no retries at this layer.
    async fn call(
        &self,
        source: &Source,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Value, AppError> {
        let url = format!("{}{}", source.location, endpoint);

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(ref key) = source.api_key {
            request = request.header("X-API-KEY", key);
        }
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("BRP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::UpstreamError(format!(
                "BRP returned status {}: {}",
                status, error_text
            )));
        }

        let body = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamError(format!("Failed to parse BRP response: {}", e)))?;

        Ok(body)
    }

    /// Fetches one person record; `None` on any transport or decode failure.
    pub async fn fetch_person(
        &self,
        source: &Source,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Option<Person> {
        tracing::info!("Fetching ingeschrevenpersoon: {}{}", source.location, endpoint);

        let decoded = self.call(source, endpoint, query).await.and_then(|body| {
            serde_json::from_value::<Person>(body).map_err(|e| {
                AppError::UpstreamError(format!("Unexpected ingeschrevenpersoon shape: {}", e))
            })
        });

        match decoded {
            Ok(person) => Some(person),
            Err(e) => {
                tracing::error!("Error when fetching ingeschrevenpersoon: {}", e);
                None
            }
        }
    }

    /// Fetches a batched collection of person records from the source root;
    /// `None` on any transport or decode failure.
    pub async fn fetch_person_collection(
        &self,
        source: &Source,
        query: &[(&str, String)],
    ) -> Option<Vec<Person>> {
        tracing::info!("Fetching ingeschrevenpersonen collection from {}", source.location);

        let decoded = self.call(source, "", query).await.and_then(|body| {
            serde_json::from_value::<PersonCollection>(body).map_err(|e| {
                AppError::UpstreamError(format!("Unexpected collection shape: {}", e))
            })
        });

        match decoded {
            Ok(collection) => Some(collection.embedded.ingeschrevenpersonen),
            Err(e) => {
                tracing::error!("Error when fetching ingeschrevenpersonen: {}", e);
                None
            }
        }
    }
}
