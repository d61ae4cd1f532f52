use crate::error::ScrapeError;
use crate::fetch::HttpFetch;

use reqwest::blocking::{Client, Response};
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

/// Default timeout for JSON API calls (token, catalog, detail).
pub const JSON_TIMEOUT: Duration = Duration::from_secs(5);
/// Default timeout for sitemap and raw page fetches.
pub const HTML_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("reqwest client construction");

        Self { client }
    }

    /// Checks the status and surfaces non-2xx responses as transport
    /// failures carrying the reqwest cause.
    fn check_status(url: &str, response: Response) -> Result<Response, ScrapeError> {
        response
            .error_for_status()
            .map_err(|e| ScrapeError::transport(url, e))
    }

    fn decode_json(url: &str, response: Response) -> Result<Value, ScrapeError> {
        response
            .json::<Value>()
            .map_err(|e| ScrapeError::malformed(url, "JSON", e))
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetch for HttpFetcher {
    fn get_json(
        &self,
        url: &str,
        headers: &HeaderMap,
        timeout: Duration,
    ) -> Result<Value, ScrapeError> {
        info!(%url, "GET (json)");
        let response = self
            .client
            .get(url)
            .headers(headers.clone())
            .timeout(timeout)
            .send()
            .map_err(|e| ScrapeError::transport(url, e))?;
        let response = Self::check_status(url, response)?;
        info!(%url, status = %response.status(), "response received");
        Self::decode_json(url, response)
    }

    fn post_json(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: &Value,
        timeout: Duration,
    ) -> Result<Value, ScrapeError> {
        info!(%url, "POST (json)");
        let response = self
            .client
            .post(url)
            .headers(headers.clone())
            .json(body)
            .timeout(timeout)
            .send()
            .map_err(|e| ScrapeError::transport(url, e))?;
        let response = Self::check_status(url, response)?;
        info!(%url, status = %response.status(), "response received");
        Self::decode_json(url, response)
    }

    fn get_text(&self, url: &str, timeout: Duration) -> Result<String, ScrapeError> {
        info!(%url, "GET (text)");
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(|e| ScrapeError::transport(url, e))?;
        let response = Self::check_status(url, response)?;
        info!(%url, status = %response.status(), "response received");
        response
            .text()
            .map_err(|e| ScrapeError::transport(url, e))
    }
}
