use thiserror::Error;

/// Boxed cause for transport/parse failures. Kept as a trait object so the
/// in-memory test fetchers can produce the same variants as reqwest.
pub type Cause = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Connection error, timeout, or non-2xx HTTP status.
    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: Cause },

    /// Response body could not be parsed as the expected format.
    #[error("response from {url} could not be parsed as {expected}: {source}")]
    Malformed {
        url: String,
        expected: &'static str,
        source: Cause,
    },

    /// Token retrieval did not yield a usable credential. Fatal for the
    /// whole pipeline invocation of the affected source.
    #[error("auth failed: {reason}")]
    Auth {
        reason: String,
        #[source]
        source: Option<Box<ScrapeError>>,
    },

    /// The content anchor matched nothing in the fetched HTML.
    #[error("content anchor `{anchor}` not found")]
    Extraction { anchor: String },

    /// Expected listing (categories, pagination metadata) absent or empty.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// A synthesized or discovered promo URL is not a well-formed absolute URL.
    #[error("invalid promo url `{url}`")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ScrapeError {
    pub fn transport(url: impl Into<String>, source: impl Into<Cause>) -> Self {
        Self::Transport {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn malformed(
        url: impl Into<String>,
        expected: &'static str,
        source: impl Into<Cause>,
    ) -> Self {
        Self::Malformed {
            url: url.into(),
            expected,
            source: source.into(),
        }
    }
}
