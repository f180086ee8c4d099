use crate::modules::provider::domain::ClientConfig;
use crate::modules::provider::traits::PayloadFetch;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// Jikan wraps every payload in a `data` envelope.
#[derive(Debug, Deserialize)]
struct Envelope {
    data: Value,
}

/// reqwest-backed transport. One GET per call, fixed timeout and user agent,
/// cancellation raced against both the response and the body read.
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Any non-2xx status is a failure; a handful get distinct variants so
    /// callers can react (404 lookups, rate-limit diagnostics).
    fn check_status(status: StatusCode) -> AppResult<()> {
        if status.is_success() {
            return Ok(());
        }
        match status {
            StatusCode::NOT_FOUND => Err(AppError::NotFound("Resource not found".to_string())),
            StatusCode::TOO_MANY_REQUESTS => Err(AppError::RateLimitError(
                "Jikan rate limit exceeded".to_string(),
            )),
            _ => Err(AppError::ApiError(format!(
                "Unexpected status code from Jikan: {}",
                status
            ))),
        }
    }
}

#[async_trait]
impl PayloadFetch for ReqwestFetcher {
    async fn fetch_payload(&self, url: &str, cancel: CancellationToken) -> AppResult<Value> {
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled(url.to_string()));
        }

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(AppError::Cancelled(url.to_string())),
            response = self.client.get(url).send() => response.map_err(AppError::from)?,
        };

        Self::check_status(response.status())?;

        let envelope = tokio::select! {
            _ = cancel.cancelled() => return Err(AppError::Cancelled(url.to_string())),
            body = response.json::<Envelope>() => body.map_err(|e| {
                AppError::SerializationError(format!("Failed to parse Jikan response: {}", e))
            })?,
        };

        Ok(envelope.data)
    }
}
