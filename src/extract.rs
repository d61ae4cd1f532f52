// Bank pages embed promo copy in one known container per template; these
// helpers pull visible text (and hrefs) out of that container.
use crate::error::ScrapeError;
use scraper::{Html, Selector};
use url::Url;

/// Converts an HTML fragment (a field value that may contain markup) to
/// plain text: one line per text node, trimmed, empties dropped.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    collect_text(fragment.root_element())
}

/// Extracts the visible text of the first element matching `anchor` in a
/// full document. Fails with [`ScrapeError::Extraction`] when the anchor
/// matches nothing (or is not a valid selector).
pub fn anchor_text(html: &str, anchor: &str) -> Result<String, ScrapeError> {
    let document = Html::parse_document(html);
    let selector = parse_selector(anchor)?;
    let element = document
        .select(&selector)
        .next()
        .ok_or_else(|| ScrapeError::Extraction {
            anchor: anchor.to_string(),
        })?;
    Ok(collect_text(element))
}

/// Harvests every `a[href]` under the first element matching `anchor`,
/// resolving relative hrefs against `base`.
pub fn anchor_hrefs(html: &str, anchor: &str, base: &Url) -> Result<Vec<String>, ScrapeError> {
    let document = Html::parse_document(html);
    let selector = parse_selector(anchor)?;
    let container = document
        .select(&selector)
        .next()
        .ok_or_else(|| ScrapeError::Extraction {
            anchor: anchor.to_string(),
        })?;

    let link_selector = Selector::parse("a[href]").expect("static selector");
    let mut hrefs = Vec::new();
    for link in container.select(&link_selector) {
        if let Some(href) = link.value().attr("href") {
            if let Ok(resolved) = base.join(href) {
                hrefs.push(resolved.to_string());
            }
        }
    }
    Ok(hrefs)
}

fn parse_selector(anchor: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(anchor).map_err(|_| ScrapeError::Extraction {
        anchor: anchor.to_string(),
    })
}

fn collect_text(element: scraper::ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_to_text_flattens_markup() {
        let text = html_to_text("<p>Get <b>50%</b> off</p><p>until June</p>");
        assert_eq!(text, "Get\n50%\noff\nuntil June");
    }

    #[test]
    fn html_to_text_drops_whitespace_only_nodes() {
        assert_eq!(html_to_text("<div>  </div><p> hi </p>"), "hi");
        assert_eq!(html_to_text(""), "");
    }

    #[test]
    fn anchor_text_picks_first_match() {
        let html = r#"
            <html><body>
              <div id="article-detail"><h1>Promo</h1><p>Details here.</p></div>
              <div id="article-detail"><p>second</p></div>
            </body></html>"#;
        let text = anchor_text(html, "div#article-detail").unwrap();
        assert_eq!(text, "Promo\nDetails here.");
    }

    #[test]
    fn anchor_text_fails_when_missing() {
        let err = anchor_text("<html><body></body></html>", "div#nope").unwrap_err();
        assert!(matches!(err, ScrapeError::Extraction { .. }));
    }

    #[test]
    fn anchor_hrefs_resolves_relative_links() {
        let html = r#"
            <div id="gallery-list">
              <a href="/promo-a">A</a>
              <a href="https://other.example/promo-b">B</a>
              <span>no link</span>
            </div>"#;
        let base = Url::parse("https://www.chinabank.ph/credit-card-promos-more").unwrap();
        let hrefs = anchor_hrefs(html, "div#gallery-list", &base).unwrap();
        assert_eq!(
            hrefs,
            vec![
                "https://www.chinabank.ph/promo-a",
                "https://other.example/promo-b"
            ]
        );
    }
}
