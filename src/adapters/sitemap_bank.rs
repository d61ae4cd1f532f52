//! Sitemap-driven adapter shared by BPI and EastWest: filter the sitemap to
//! promo pages, fetch each, extract the bank's content anchor.

use crate::config::SitemapSource;
use crate::error::ScrapeError;
use crate::extract;
use crate::fetch::{HttpFetch, HTML_TIMEOUT};
use crate::model::{Bank, BankPromo};
use crate::normalizer;
use crate::sitemap;
use crate::throttle::Throttle;

use tracing::{info, warn};

pub fn scrape(
    fetcher: &dyn HttpFetch,
    src: &SitemapSource,
    bank: Bank,
    scrape_id: &str,
    throttle: &Throttle,
) -> Result<Vec<BankPromo>, ScrapeError> {
    // A sitemap failure is fatal: without it there is nothing to crawl.
    let urls = sitemap::fetch_urls(fetcher, &src.sitemap_url)?;

    let mut promo_urls: Vec<String> = urls
        .into_iter()
        .filter(|u| u.starts_with(&src.promo_prefix))
        .collect();
    if let Some(limit) = src.sample_limit {
        promo_urls.truncate(limit);
    }
    info!(count = promo_urls.len(), "filtered promo URLs from sitemap");

    let mut promos = Vec::new();
    for (idx, url) in promo_urls.iter().enumerate() {
        info!(n = idx + 1, total = promo_urls.len(), %url, "fetching promo page");
        if let Some(promo) = scrape_page(fetcher, src, bank, scrape_id, url) {
            promos.push(promo);
        }
        throttle.pause();
    }

    info!(count = promos.len(), "sitemap scrape complete");
    Ok(promos)
}

/// One record per successfully processed URL. A fetch or extraction failure
/// skips the page; an unextractable page never produces an empty record.
fn scrape_page(
    fetcher: &dyn HttpFetch,
    src: &SitemapSource,
    bank: Bank,
    scrape_id: &str,
    url: &str,
) -> Option<BankPromo> {
    let html = match fetcher.get_text(url, HTML_TIMEOUT) {
        Ok(html) => html,
        Err(e) => {
            warn!(%url, error = %e, "skipping promo page: fetch failed");
            return None;
        }
    };

    let content = match extract::anchor_text(&html, &src.content_anchor) {
        Ok(text) => text,
        Err(e) => {
            warn!(%url, error = %e, "skipping promo page: content anchor missing");
            return None;
        }
    };

    match normalizer::build_promo(bank, scrape_id, url, content) {
        Ok(promo) => Some(promo),
        Err(e) => {
            warn!(%url, error = %e, "skipping promo page: bad url");
            None
        }
    }
}
