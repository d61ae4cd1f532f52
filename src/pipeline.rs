//! Per-bank pipeline entry point: fresh run id, adapter dispatch,
//! aggregation. Each invocation is fully independent; callers may run
//! several banks from separate threads if they want to.

use crate::adapters::{bdo, chinabank, sitemap_bank};
use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::fetch::HttpFetch;
use crate::model::{Bank, BankPromo};
use crate::throttle::Throttle;

use tracing::{error, info, info_span};
use uuid::Uuid;

/// Runs one bank's discovery → detail fetch → normalize sequence. Every
/// record in the returned list shares the invocation's fresh scrape id.
/// Session-level failures (auth, empty catalog, unreachable sitemap)
/// propagate; per-item failures have already been logged and skipped, so an
/// empty `Ok` means the source currently yielded nothing.
pub fn run(
    fetcher: &dyn HttpFetch,
    bank: Bank,
    config: &ScrapeConfig,
    throttle: &Throttle,
) -> Result<Vec<BankPromo>, ScrapeError> {
    let scrape_id = Uuid::new_v4().to_string();
    let span = info_span!("scrape", bank = %bank, %scrape_id);
    let _guard = span.enter();
    info!("starting scrape session");

    let result = match bank {
        Bank::Bdo => bdo::scrape(fetcher, &config.bdo, &scrape_id, throttle),
        Bank::Bpi => sitemap_bank::scrape(fetcher, &config.bpi, Bank::Bpi, &scrape_id, throttle),
        Bank::EastWest => {
            sitemap_bank::scrape(fetcher, &config.eastwest, Bank::EastWest, &scrape_id, throttle)
        }
        Bank::ChinaBank => chinabank::scrape(fetcher, &config.chinabank, &scrape_id, throttle),
    };

    match &result {
        Ok(promos) => info!(count = promos.len(), "scrape session complete"),
        Err(e) => error!(error = %e, "scrape session failed"),
    }
    result
}
