//! Fetch a sitemap.xml and return the flat list of `<loc>` values.

use crate::error::ScrapeError;
use crate::fetch::{HttpFetch, HTML_TIMEOUT};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::info;

/// Fetches and parses a sitemap document. An empty urlset yields an empty
/// Vec; a fetch failure or unparseable XML is an error.
pub fn fetch_urls(fetcher: &dyn HttpFetch, sitemap_url: &str) -> Result<Vec<String>, ScrapeError> {
    let xml = fetcher.get_text(sitemap_url, HTML_TIMEOUT)?;
    let urls = parse_locs(sitemap_url, &xml)?;
    info!(count = urls.len(), %sitemap_url, "extracted sitemap URLs");
    Ok(urls)
}

/// Pulls every `<loc>` text value out of a `<urlset>` document, in order.
/// Matches on local names, so the sitemap namespace prefix is irrelevant.
pub fn parse_locs(sitemap_url: &str, xml: &str) -> Result<Vec<String>, ScrapeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut urls = Vec::new();
    let mut in_loc = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                in_loc = e.local_name().as_ref() == b"loc";
            }
            Ok(Event::End(_)) => {
                in_loc = false;
            }
            Ok(Event::Text(e)) if in_loc => {
                let text = e
                    .unescape()
                    .map_err(|err| ScrapeError::malformed(sitemap_url, "XML", err))?;
                push_loc(&mut urls, &text);
            }
            // Some generators wrap <loc> values in CDATA.
            Ok(Event::CData(e)) if in_loc => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                push_loc(&mut urls, &text);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ScrapeError::malformed(sitemap_url, "XML", e)),
        }
        buf.clear();
    }

    Ok(urls)
}

fn push_loc(urls: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        urls.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITEMAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://www.example.com/promos/a</loc><lastmod>2025-06-01</lastmod></url>
  <url><loc>https://www.example.com/promos/b</loc></url>
  <url><loc>https://www.example.com/about</loc></url>
</urlset>"#;

    #[test]
    fn extracts_locs_in_order() {
        let urls = parse_locs("https://www.example.com/sitemap.xml", SITEMAP).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://www.example.com/promos/a",
                "https://www.example.com/promos/b",
                "https://www.example.com/about",
            ]
        );
    }

    #[test]
    fn cdata_wrapped_locs_are_extracted() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc><![CDATA[https://www.example.com/promos/a]]></loc></url>
  <url><loc>https://www.example.com/promos/b</loc></url>
</urlset>"#;
        let urls = parse_locs("https://x/sitemap.xml", xml).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://www.example.com/promos/a",
                "https://www.example.com/promos/b",
            ]
        );
    }

    #[test]
    fn empty_urlset_is_ok() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"></urlset>"#;
        let urls = parse_locs("https://x/sitemap.xml", xml).unwrap();
        assert!(urls.is_empty());
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let err = parse_locs("https://x/sitemap.xml", "<urlset><url><loc>a</url>").unwrap_err();
        assert!(matches!(err, ScrapeError::Malformed { expected: "XML", .. }));
    }
}
