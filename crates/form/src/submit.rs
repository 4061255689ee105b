//! Submission seam: how an assembled payload reaches the product endpoint.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use skuforge_products::{CreatedProduct, CreatedResponse, ProductSubmission};

use crate::config::SubmitterConfig;

pub const PRODUCT_PATH: &str = "api/product";

/// Sends a product payload to the backend and returns the created record.
#[async_trait]
pub trait ProductSubmitter: Send + Sync {
    async fn submit(&self, payload: &ProductSubmission) -> Result<CreatedProduct, SubmitError>;
}

#[async_trait]
impl<T> ProductSubmitter for Arc<T>
where
    T: ProductSubmitter + ?Sized,
{
    async fn submit(&self, payload: &ProductSubmission) -> Result<CreatedProduct, SubmitError> {
        (**self).submit(payload).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Network(String),
    #[error("endpoint rejected product ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("could not decode endpoint response: {0}")]
    Decode(String),
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// [`ProductSubmitter`] that POSTs JSON to `{api_url}/api/product`.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: Client,
    endpoint: Url,
}

impl HttpSubmitter {
    pub fn new(config: &SubmitterConfig) -> Result<Self, SubmitError> {
        Self::with_base_url(&config.api_url, config.timeout)
    }

    /// Point at an arbitrary base URL (tests use a mock server).
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, SubmitError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(PRODUCT_PATH))
            .map_err(|e| SubmitError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ProductSubmitter for HttpSubmitter {
    async fn submit(&self, payload: &ProductSubmission) -> Result<CreatedProduct, SubmitError> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status, &text),
            });
        }

        let body: CreatedResponse = resp
            .json()
            .await
            .map_err(|e| SubmitError::Decode(e.to_string()))?;

        tracing::debug!(product_id = %body.product.id, %status, "endpoint accepted product");
        Ok(body.product)
    }
}

fn rejection_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => err.message,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string(),
    }
}
