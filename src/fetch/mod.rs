pub mod fetcher;
pub mod traits;

pub use fetcher::{HttpFetcher, HTML_TIMEOUT, JSON_TIMEOUT};
pub use traits::HttpFetch;
