use serde::Deserialize;
use std::fs;

/// Endpoints and credentials for the BDO deals API (PerxTech backend).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BdoConfig {
    pub token_url: String,
    /// `url` field of the token payload.
    pub site_host: String,
    pub identifier: String,
    pub categories_url: String,
    pub catalog_url: String,
    pub page_size: u32,
    pub campaign_url: String,
    pub reward_url: String,
    /// Base for the synthetic per-item promo URL; the API has no canonical
    /// page URL in its detail payloads.
    pub promo_link_base: String,
    pub origin: String,
}

impl Default for BdoConfig {
    fn default() -> Self {
        Self {
            token_url: "https://www.deals.bdo.com.ph/v4/oauth/token".into(),
            site_host: "www.deals.bdo.com.ph".into(),
            identifier: "ac5d0ec8cf6a28ae2b72411d5c95307f".into(),
            categories_url: "https://api.perxtech.net/v4/categories".into(),
            catalog_url: "https://api.perxtech.net/v4/catalogs/1/items".into(),
            page_size: 50,
            campaign_url: "https://api.perxtech.net/v4/campaigns".into(),
            reward_url: "https://api.perxtech.net/v4/rewards".into(),
            promo_link_base: "https://www.deals.bdo.com.ph/rewards".into(),
            origin: "https://www.deals.bdo.com.ph".into(),
        }
    }
}

impl BdoConfig {
    pub fn catalog_page_url(&self, page: u32, category_id: u64) -> String {
        format!(
            "{}?page={}&size={}&category_ids={}",
            self.catalog_url, page, self.page_size, category_id
        )
    }

    pub fn campaign_detail_url(&self, id: u64) -> String {
        format!("{}/{}", self.campaign_url, id)
    }

    pub fn reward_detail_url(&self, id: u64) -> String {
        format!("{}/{}", self.reward_url, id)
    }

    pub fn promo_link(&self, id: u64) -> String {
        format!("{}/{}", self.promo_link_base, id)
    }
}

/// One sitemap-driven bank: fetch the sitemap, keep URLs under the promo
/// prefix, pull text from the content anchor of each surviving page.
#[derive(Debug, Clone, Deserialize)]
pub struct SitemapSource {
    pub sitemap_url: String,
    pub promo_prefix: String,
    /// Truncate the filtered URL list when set.
    pub sample_limit: Option<usize>,
    pub content_anchor: String,
}

/// ChinaBank exposes no machine-readable listing; promo pages are linked
/// from a hand-maintained set of category landing pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChinaBankConfig {
    pub category_urls: Vec<String>,
    pub list_anchor: String,
    pub detail_anchor: String,
}

impl Default for ChinaBankConfig {
    fn default() -> Self {
        Self {
            category_urls: [
                "https://www.chinabank.ph/credit-card-promos-more",
                "https://www.chinabank.ph/credit-card-promos-beauty-wellness",
                "https://www.chinabank.ph/credit-cards-promos-travel",
                "https://www.chinabank.ph/credit-cards-promos-stay",
                "https://www.chinabank.ph/credit-cards-promos-installment",
                "https://www.chinabank.ph/credit-cards-promos-ecom",
                "https://www.chinabank.ph/credit-cards-promos-shop",
                "https://www.chinabank.ph/credit-cards-promos-dine",
                "https://www.chinabank.ph/credit-cards-promos-premium",
                "https://www.chinabank.ph/credit-cards-promos-member-get-member",
            ]
            .map(String::from)
            .to_vec(),
            list_anchor: "div#gallery-list".into(),
            detail_anchor: "div#article-detail".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub bdo: BdoConfig,
    pub bpi: SitemapSource,
    pub eastwest: SitemapSource,
    pub chinabank: ChinaBankConfig,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            bdo: BdoConfig::default(),
            bpi: SitemapSource {
                sitemap_url: "https://www.bpi.com.ph/sitemap.xml".into(),
                promo_prefix: "https://www.bpi.com.ph/personal/rewards-and-promotions/".into(),
                sample_limit: None,
                content_anchor:
                    "main.container.responsivegrid.aem-GridColumn.aem-GridColumn--default--12"
                        .into(),
            },
            eastwest: SitemapSource {
                sitemap_url: "https://www.eastwestbanker.com/sitemap.xml".into(),
                promo_prefix: "https://www.eastwestbanker.com/promos/".into(),
                sample_limit: Some(3),
                content_anchor: ".block.block-system.block-system-main-block.block--ewb-theme-content.block--system-main".into(),
            },
            chinabank: ChinaBankConfig::default(),
        }
    }
}

pub fn load_config(path: &str) -> Result<ScrapeConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: ScrapeConfig = serde_json::from_str(&content)?;
    Ok(config)
}
