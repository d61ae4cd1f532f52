pub mod adapters;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod normalizer;
pub mod pipeline;
pub mod sitemap;
pub mod throttle;

pub use error::ScrapeError;
pub use model::{Bank, BankPromo};
