//! Flattens per-source raw record shapes into the unified `BankPromo`.

use crate::adapters::bdo::{CampaignDetail, RewardDetail};
use crate::config::BdoConfig;
use crate::error::ScrapeError;
use crate::extract::html_to_text;
use crate::model::{Bank, BankPromo};

use chrono::Local;
use url::Url;

/// Blank-line join of the non-empty, trimmed fragments, in input order.
pub fn join_fragments<I>(parts: I) -> String
where
    I: IntoIterator<Item = String>,
{
    parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Assembles a record, validating that the promo URL is absolute. Content
/// may legitimately be empty when every contributing field was empty.
pub fn build_promo(
    bank: Bank,
    scrape_id: &str,
    url: &str,
    content: String,
) -> Result<BankPromo, ScrapeError> {
    let promo_url = Url::parse(url).map_err(|source| ScrapeError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    Ok(BankPromo {
        scrape_id: scrape_id.to_string(),
        bank_name: bank,
        promo_url,
        promo_content: content,
        scrape_date: Local::now().date_naive(),
    })
}

/// Campaign field order: name, headline, sub-headline, landing body,
/// enrolment body, then each additional section's body. Body fields may
/// carry markup and go through HTML-to-text first.
pub fn campaign_content(detail: &CampaignDetail) -> String {
    let props = detail.display_properties.as_ref();
    let landing = props.and_then(|p| p.landing_page.as_ref());
    let enrolment = props.and_then(|p| p.enrolment_page.as_ref());

    let mut fields = vec![
        detail.name.clone().unwrap_or_default(),
        landing.and_then(|l| l.headline.clone()).unwrap_or_default(),
        landing
            .and_then(|l| l.sub_headline.clone())
            .unwrap_or_default(),
        html_to_text(landing.and_then(|l| l.body_text.as_deref()).unwrap_or_default()),
        html_to_text(
            enrolment
                .and_then(|e| e.body_text.as_deref())
                .unwrap_or_default(),
        ),
    ];

    if let Some(sections) = landing.and_then(|l| l.additional_sections.as_ref()) {
        for section in sections.iter().flatten() {
            fields.push(html_to_text(section.body_text.as_deref().unwrap_or_default()));
        }
    }

    join_fragments(fields)
}

/// Reward field order: name, description, then one `title\nbody` fragment
/// per accordion. Null accordion entries contribute empty title and body
/// instead of failing, which means they are dropped by the join.
pub fn reward_content(detail: &RewardDetail) -> String {
    let mut fields = vec![
        detail.name.clone().unwrap_or_default(),
        html_to_text(detail.description.as_deref().unwrap_or_default()),
    ];

    for accordion in detail.accordions.as_deref().unwrap_or_default() {
        let (title, body) = match accordion {
            Some(a) => (
                a.title.as_deref().unwrap_or_default(),
                html_to_text(a.body.as_deref().unwrap_or_default()),
            ),
            None => ("", String::new()),
        };
        if !title.is_empty() || !body.is_empty() {
            fields.push(format!("{title}\n{body}").trim().to_string());
        }
    }

    join_fragments(fields)
}

pub fn campaign_promo(
    cfg: &BdoConfig,
    scrape_id: &str,
    detail: &CampaignDetail,
) -> Result<BankPromo, ScrapeError> {
    let id = detail
        .id
        .ok_or_else(|| ScrapeError::Catalog("campaign detail carries no id".into()))?;
    build_promo(Bank::Bdo, scrape_id, &cfg.promo_link(id), campaign_content(detail))
}

pub fn reward_promo(
    cfg: &BdoConfig,
    scrape_id: &str,
    detail: &RewardDetail,
) -> Result<BankPromo, ScrapeError> {
    let id = detail
        .id
        .ok_or_else(|| ScrapeError::Catalog("reward detail carries no id".into()))?;
    build_promo(Bank::Bdo, scrape_id, &cfg.promo_link(id), reward_content(detail))
}
