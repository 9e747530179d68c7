// Classification Service Client
// Thin reqwest wrapper over the remote classifier's two endpoints

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

use crate::models::{ApiErrorBody, ClassificationResult, ClassifyRequest};

/// Default request timeout; the wire contract specifies none, so we impose
/// a bounded one and let expiry surface as a transport failure.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const GENERIC_FAILURE: &str = "request failed";

#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("could not reach classification service: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx from the service; `message` is the server-supplied `detail`
    /// when present, otherwise a generic fallback.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// 2xx response whose body did not parse.
    #[error("malformed response from classification service: {0}")]
    Json(String),
}

/// The two operations the batch pipeline depends on. HTTP in production,
/// scripted in tests.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn health_check(&self) -> Result<serde_json::Value, ClientError>;
    async fn classify(&self, email: &str) -> Result<ClassificationResult, ClientError>;
}

/// HTTP client for the classification service.
///
/// The base endpoint is injected at construction (never read from ambient
/// environment at call time) with trailing slashes stripped. No retries:
/// retry policy, if any, belongs to the caller.
pub struct ClassifierClient {
    client: Client,
    base_url: String,
}

impl ClassifierClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Turn a non-2xx response into an `Api` error, preferring the server's
/// JSON `detail` field over the generic message.
async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.detail)
        .unwrap_or_else(|| GENERIC_FAILURE.to_string());

    ClientError::Api { status, message }
}

#[async_trait]
impl Classifier for ClassifierClient {
    async fn health_check(&self) -> Result<serde_json::Value, ClientError> {
        let start = Instant::now();
        let response = self.client.get(self.endpoint("healthz")).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::Json(e.to_string()))?;

        debug!(latency_ms = start.elapsed().as_millis() as i64, "healthz ok");
        Ok(payload)
    }

    async fn classify(&self, email: &str) -> Result<ClassificationResult, ClientError> {
        let request = ClassifyRequest {
            email: email.to_string(),
        };

        let start = Instant::now();
        let response = self
            .client
            .post(self.endpoint("classify"))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let result: ClassificationResult = response
            .json()
            .await
            .map_err(|e| ClientError::Json(e.to_string()))?;

        debug!(
            latency_ms = start.elapsed().as_millis() as i64,
            category = %result.category,
            "classify ok"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slashes_stripped() {
        let client = ClassifierClient::new("http://localhost:8000///");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.endpoint("classify"), "http://localhost:8000/classify");
    }

    #[test]
    fn test_bare_host_endpoint() {
        let client = ClassifierClient::new("http://127.0.0.1:9000");
        assert_eq!(client.endpoint("healthz"), "http://127.0.0.1:9000/healthz");
    }

    #[test]
    fn test_api_error_message_renders_detail_only() {
        let err = ClientError::Api {
            status: 422,
            message: "email must not be empty".to_string(),
        };
        assert_eq!(err.to_string(), "email must not be empty");
    }
}
