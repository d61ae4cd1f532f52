use crate::error::ScrapeError;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::time::Duration;

/// Seam between the adapters and the network. The blocking reqwest
/// implementation lives in [`super::HttpFetcher`]; tests drive adapters
/// through scripted in-memory implementations.
///
/// No retries happen behind this trait; retrying (or skipping) a failed
/// request is the caller's per-item decision.
pub trait HttpFetch {
    fn get_json(
        &self,
        url: &str,
        headers: &HeaderMap,
        timeout: Duration,
    ) -> Result<Value, ScrapeError>;

    fn post_json(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: &Value,
        timeout: Duration,
    ) -> Result<Value, ScrapeError>;

    fn get_text(&self, url: &str, timeout: Duration) -> Result<String, ScrapeError>;
}
