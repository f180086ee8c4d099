use crate::shared::errors::AppResult;
use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// Transport seam between the typed client and the network.
///
/// Implementations perform one HTTP GET against a fully-built URL, expect a
/// JSON body of shape `{ "data": <payload> }` and return the payload. A
/// request that observes its token cancelled mid-flight must resolve to
/// `AppError::Cancelled` without waiting for the transfer to finish.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PayloadFetch: Send + Sync {
    async fn fetch_payload(&self, url: &str, cancel: CancellationToken) -> AppResult<Value>;
}
