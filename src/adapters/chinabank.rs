//! ChinaBank adapter: crawl a fixed list of category landing pages, follow
//! the promo links found in each gallery, extract the article body.

use crate::config::ChinaBankConfig;
use crate::error::ScrapeError;
use crate::extract;
use crate::fetch::{HttpFetch, HTML_TIMEOUT};
use crate::model::{Bank, BankPromo};
use crate::normalizer;
use crate::throttle::Throttle;

use tracing::{info, warn};
use url::Url;

pub fn scrape(
    fetcher: &dyn HttpFetch,
    cfg: &ChinaBankConfig,
    scrape_id: &str,
    throttle: &Throttle,
) -> Result<Vec<BankPromo>, ScrapeError> {
    let mut promos = Vec::new();

    for (idx, category_url) in cfg.category_urls.iter().enumerate() {
        info!(
            n = idx + 1,
            total = cfg.category_urls.len(),
            %category_url,
            "loading category page"
        );

        let html = match fetcher.get_text(category_url, HTML_TIMEOUT) {
            Ok(html) => html,
            Err(e) => {
                warn!(%category_url, error = %e, "skipping category: fetch failed");
                continue;
            }
        };
        let base = match Url::parse(category_url) {
            Ok(base) => base,
            Err(e) => {
                warn!(%category_url, error = %e, "skipping category: bad url");
                continue;
            }
        };
        let hrefs = match extract::anchor_hrefs(&html, &cfg.list_anchor, &base) {
            Ok(hrefs) => hrefs,
            Err(e) => {
                warn!(%category_url, error = %e, "skipping category: promo list not found");
                continue;
            }
        };
        info!(count = hrefs.len(), "found promo links in category");

        for promo_url in &hrefs {
            if let Some(promo) = scrape_detail(fetcher, cfg, scrape_id, promo_url) {
                promos.push(promo);
            }
            throttle.pause();
        }
    }

    info!(count = promos.len(), "chinabank scrape complete");
    Ok(promos)
}

fn scrape_detail(
    fetcher: &dyn HttpFetch,
    cfg: &ChinaBankConfig,
    scrape_id: &str,
    url: &str,
) -> Option<BankPromo> {
    info!(%url, "fetching promo page");
    let html = match fetcher.get_text(url, HTML_TIMEOUT) {
        Ok(html) => html,
        Err(e) => {
            warn!(%url, error = %e, "skipping promo link: fetch failed");
            return None;
        }
    };

    let content = match extract::anchor_text(&html, &cfg.detail_anchor) {
        Ok(text) => text,
        Err(e) => {
            warn!(%url, error = %e, "skipping promo link: detail anchor missing");
            return None;
        }
    };

    match normalizer::build_promo(Bank::ChinaBank, scrape_id, url, content) {
        Ok(promo) => Some(promo),
        Err(e) => {
            warn!(%url, error = %e, "skipping promo link: bad url");
            None
        }
    }
}
