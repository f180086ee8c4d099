//! Shared helpers for the integration suites: a scripted transport that
//! serves canned Jikan-shaped payloads and records every URL it was asked
//! for.

#![allow(dead_code)]

use async_trait::async_trait;
use sagasu::{AppError, AppResult, AppStore, ClientConfig, JikanClient, PayloadFetch};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Transport double: first response whose needle is contained in the
/// requested URL wins; unmatched URLs yield an empty list payload, the way
/// an exhausted Jikan listing does. An optional delay makes in-flight
/// cancellation observable.
pub struct ScriptedFetcher {
    responses: Mutex<Vec<(String, Value)>>,
    failures: Mutex<Vec<(String, AppError)>>,
    calls: Mutex<Vec<String>>,
    delay: Duration,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            delay,
        }
    }

    pub fn respond(&self, url_needle: &str, payload: Value) {
        self.responses
            .lock()
            .unwrap()
            .push((url_needle.to_string(), payload));
    }

    pub fn fail(&self, url_needle: &str, error: AppError) {
        self.failures
            .lock()
            .unwrap()
            .push((url_needle.to_string(), error));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_matching(&self, url_needle: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|url| url.contains(url_needle))
            .count()
    }
}

#[async_trait]
impl PayloadFetch for ScriptedFetcher {
    async fn fetch_payload(&self, url: &str, cancel: CancellationToken) -> AppResult<Value> {
        self.calls.lock().unwrap().push(url.to_string());

        if self.delay > Duration::ZERO {
            tokio::select! {
                _ = cancel.cancelled() => return Err(AppError::Cancelled(url.to_string())),
                _ = tokio::time::sleep(self.delay) => {}
            }
        }
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled(url.to_string()));
        }

        if let Some((_, error)) = self
            .failures
            .lock()
            .unwrap()
            .iter()
            .find(|(needle, _)| url.contains(needle.as_str()))
        {
            return Err(error.clone());
        }

        let responses = self.responses.lock().unwrap();
        Ok(responses
            .iter()
            .find(|(needle, _)| url.contains(needle.as_str()))
            .map(|(_, payload)| payload.clone())
            .unwrap_or_else(|| json!([])))
    }
}

/// Store wired over a scripted transport with default configuration.
pub fn store_over(fetcher: Arc<ScriptedFetcher>) -> AppStore {
    AppStore::with_client(JikanClient::with_fetcher(ClientConfig::default(), fetcher))
}

/// List-entry fixture shaped like a real Jikan anime object.
pub fn anime_json(id: i64, title: &str, score: f64) -> Value {
    json!({
        "mal_id": id,
        "title": title,
        "score": score,
        "images": {
            "jpg": {
                "image_url": format!("https://cdn.myanimelist.net/images/anime/{}/main.jpg", id),
                "large_image_url": format!("https://cdn.myanimelist.net/images/anime/{}/mainl.jpg", id)
            }
        },
        "rank": 41,
        "popularity": 43
    })
}

/// Like [`anime_json`] but without artwork, so post-filters reject it.
pub fn anime_json_without_image(id: i64, title: &str, score: f64) -> Value {
    json!({"mal_id": id, "title": title, "score": score})
}
