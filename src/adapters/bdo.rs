//! BDO deals adapter: bearer-authenticated, category-partitioned paginated
//! catalog on the PerxTech API. Items come in two shapes (`Campaign` and
//! `Reward::Campaign`) with different detail endpoints and flattening rules.

use crate::config::BdoConfig;
use crate::error::ScrapeError;
use crate::fetch::{HttpFetch, JSON_TIMEOUT};
use crate::model::{BankPromo, ItemKind};
use crate::normalizer;
use crate::throttle::Throttle;

use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN, REFERER,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

#[derive(Debug, Default, Deserialize)]
struct CategoryList {
    #[serde(default)]
    data: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    id: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPage {
    #[serde(default)]
    data: Vec<CatalogEntry>,
    meta: Option<PageMeta>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    item_type: Option<String>,
    item_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PageMeta {
    total_pages: Option<u32>,
}

/// Detail payloads are wrapped in a `data` envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CampaignDetail {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub display_properties: Option<DisplayProperties>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DisplayProperties {
    pub landing_page: Option<LandingPage>,
    pub enrolment_page: Option<EnrolmentPage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LandingPage {
    pub headline: Option<String>,
    pub sub_headline: Option<String>,
    pub body_text: Option<String>,
    /// Variable-length; individual entries may be null.
    pub additional_sections: Option<Vec<Option<Section>>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Section {
    pub body_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EnrolmentPage {
    pub body_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RewardDetail {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Variable-length accordion sections; the API occasionally emits null
    /// entries in the middle of the list.
    pub accordions: Option<Vec<Option<Accordion>>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Accordion {
    pub title: Option<String>,
    pub body: Option<String>,
}

fn base_headers(cfg: &BdoConfig) -> Result<HeaderMap, ScrapeError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for name in [ORIGIN, REFERER] {
        let value = HeaderValue::from_str(&cfg.origin).map_err(|_| ScrapeError::Auth {
            reason: format!("origin `{}` is not a valid header value", cfg.origin),
            source: None,
        })?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// POSTs the fixed credential payload to the token endpoint and builds the
/// authorization header set. Any failure here is fatal for the whole BDO
/// run; no later call can succeed without the bearer token.
pub fn acquire_auth_headers(
    fetcher: &dyn HttpFetch,
    cfg: &BdoConfig,
) -> Result<HeaderMap, ScrapeError> {
    let mut headers = base_headers(cfg)?;
    let payload = json!({ "url": cfg.site_host, "identifier": cfg.identifier });

    let response = fetcher
        .post_json(&cfg.token_url, &headers, &payload, JSON_TIMEOUT)
        .map_err(|e| ScrapeError::Auth {
            reason: "token request failed".into(),
            source: Some(Box::new(e)),
        })?;

    let token = response
        .get("bearer_token")
        .and_then(Value::as_str)
        .ok_or_else(|| ScrapeError::Auth {
            reason: "token response carries no bearer_token".into(),
            source: None,
        })?;

    let value =
        HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| ScrapeError::Auth {
            reason: "bearer token is not a valid header value".into(),
            source: None,
        })?;
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// Fetches the category listing. Zero categories is fatal: there is nothing
/// to paginate and an empty listing means the source is misconfigured.
pub fn discover_categories(
    fetcher: &dyn HttpFetch,
    cfg: &BdoConfig,
    headers: &HeaderMap,
) -> Result<Vec<u64>, ScrapeError> {
    let response = fetcher.get_json(&cfg.categories_url, headers, JSON_TIMEOUT)?;
    let list: CategoryList = serde_json::from_value(response)
        .map_err(|e| ScrapeError::malformed(&cfg.categories_url, "category list", e))?;

    let ids: Vec<u64> = list.data.into_iter().filter_map(|c| c.id).collect();
    if ids.is_empty() {
        return Err(ScrapeError::Catalog(
            "category listing returned no ids".into(),
        ));
    }
    info!(count = ids.len(), "retrieved promo categories");
    Ok(ids)
}

fn fetch_catalog_page(
    fetcher: &dyn HttpFetch,
    headers: &HeaderMap,
    url: &str,
) -> Result<CatalogPage, ScrapeError> {
    let response = fetcher.get_json(url, headers, JSON_TIMEOUT)?;
    serde_json::from_value(response).map_err(|e| ScrapeError::malformed(url, "catalog page", e))
}

fn collect_entries(items: &mut Vec<(String, u64)>, entries: Vec<CatalogEntry>) {
    // Only pairs with both fields present survive.
    items.extend(
        entries
            .into_iter()
            .filter_map(|e| Some((e.item_type?, e.item_id?))),
    );
}

/// Walks every category's paginated item listing. The first page doubles as
/// the pagination probe, so a category with `total_pages = n` costs exactly
/// `n` requests, in ascending page order. A category whose pagination
/// metadata is missing (or whose first page cannot be fetched) is logged and
/// skipped; later page failures drop only that page.
pub fn discover_items(
    fetcher: &dyn HttpFetch,
    cfg: &BdoConfig,
    headers: &HeaderMap,
    categories: &[u64],
    throttle: &Throttle,
) -> Vec<(String, u64)> {
    let mut items = Vec::new();

    for &category_id in categories {
        let first_url = cfg.catalog_page_url(1, category_id);
        let first = match fetch_catalog_page(fetcher, headers, &first_url) {
            Ok(page) => page,
            Err(e) => {
                warn!(category_id, error = %e, "skipping category: first page fetch failed");
                continue;
            }
        };
        let Some(total_pages) = first.meta.as_ref().and_then(|m| m.total_pages) else {
            warn!(category_id, "skipping category: pagination metadata missing");
            continue;
        };

        info!(category_id, total_pages, count = first.data.len(), "paging catalog");
        collect_entries(&mut items, first.data);
        throttle.pause();

        for page in 2..=total_pages {
            let url = cfg.catalog_page_url(page, category_id);
            match fetch_catalog_page(fetcher, headers, &url) {
                Ok(p) => {
                    info!(category_id, page, count = p.data.len(), "retrieved catalog page");
                    collect_entries(&mut items, p.data);
                }
                Err(e) => warn!(category_id, page, error = %e, "skipping catalog page"),
            }
            throttle.pause();
        }
    }

    items
}

/// Splits discovered items into campaign and reward id lists; entries with
/// an unrecognized `item_type` are dropped.
pub fn partition_items(items: Vec<(String, u64)>) -> (Vec<u64>, Vec<u64>) {
    let mut campaigns = Vec::new();
    let mut rewards = Vec::new();
    for (item_type, id) in items {
        match ItemKind::from_item_type(&item_type) {
            Some(ItemKind::Campaign) => campaigns.push(id),
            Some(ItemKind::Reward) => rewards.push(id),
            None => {}
        }
    }
    (campaigns, rewards)
}

fn parse_envelope<T>(url: &str, value: Value) -> Result<T, ScrapeError>
where
    T: DeserializeOwned + Default,
{
    let envelope: Envelope<T> = serde_json::from_value(value)
        .map_err(|e| ScrapeError::malformed(url, "detail payload", e))?;
    Ok(envelope.data.unwrap_or_default())
}

/// Fetches campaign details one by one. A failed item is logged and
/// skipped; the batch keeps going. The record keeps the id it was fetched
/// under when the payload omits one, so a promo URL can always be built.
pub fn fetch_campaign_details(
    fetcher: &dyn HttpFetch,
    cfg: &BdoConfig,
    headers: &HeaderMap,
    ids: &[u64],
    throttle: &Throttle,
) -> Vec<CampaignDetail> {
    let mut details = Vec::new();
    for &id in ids {
        let url = cfg.campaign_detail_url(id);
        let response = match fetcher.get_json(&url, headers, JSON_TIMEOUT) {
            Ok(v) => v,
            Err(e) => {
                warn!(campaign_id = id, error = %e, "skipping campaign detail");
                continue;
            }
        };
        throttle.pause();
        match parse_envelope::<CampaignDetail>(&url, response) {
            Ok(mut detail) => {
                detail.id.get_or_insert(id);
                details.push(detail);
            }
            Err(e) => warn!(campaign_id = id, error = %e, "skipping campaign: malformed detail"),
        }
    }
    details
}

pub fn fetch_reward_details(
    fetcher: &dyn HttpFetch,
    cfg: &BdoConfig,
    headers: &HeaderMap,
    ids: &[u64],
    throttle: &Throttle,
) -> Vec<RewardDetail> {
    let mut details = Vec::new();
    for &id in ids {
        let url = cfg.reward_detail_url(id);
        let response = match fetcher.get_json(&url, headers, JSON_TIMEOUT) {
            Ok(v) => v,
            Err(e) => {
                warn!(reward_id = id, error = %e, "skipping reward detail");
                continue;
            }
        };
        throttle.pause();
        match parse_envelope::<RewardDetail>(&url, response) {
            Ok(mut detail) => {
                detail.id.get_or_insert(id);
                details.push(detail);
            }
            Err(e) => warn!(reward_id = id, error = %e, "skipping reward: malformed detail"),
        }
    }
    details
}

/// Full BDO pipeline: token, categories, pagination, partition, detail
/// fetch, normalization. Auth and category failures abort; everything past
/// that point degrades per item.
pub fn scrape(
    fetcher: &dyn HttpFetch,
    cfg: &BdoConfig,
    scrape_id: &str,
    throttle: &Throttle,
) -> Result<Vec<BankPromo>, ScrapeError> {
    let headers = acquire_auth_headers(fetcher, cfg)?;
    info!("acquired bearer token");

    let categories = discover_categories(fetcher, cfg, &headers)?;
    let items = discover_items(fetcher, cfg, &headers, &categories, throttle);
    let (campaigns, rewards) = partition_items(items);
    info!(
        campaigns = campaigns.len(),
        rewards = rewards.len(),
        "partitioned catalog items"
    );

    let campaign_details = fetch_campaign_details(fetcher, cfg, &headers, &campaigns, throttle);
    let reward_details = fetch_reward_details(fetcher, cfg, &headers, &rewards, throttle);

    let mut promos = Vec::new();
    for detail in &campaign_details {
        match normalizer::campaign_promo(cfg, scrape_id, detail) {
            Ok(promo) => promos.push(promo),
            Err(e) => warn!(error = %e, "skipping campaign: could not build record"),
        }
    }
    for detail in &reward_details {
        match normalizer::reward_promo(cfg, scrape_id, detail) {
            Ok(promo) => promos.push(promo),
            Err(e) => warn!(error = %e, "skipping reward: could not build record"),
        }
    }

    info!(count = promos.len(), "bdo scrape complete");
    Ok(promos)
}
