//! DuckDuckGo search backend: most scraper-friendly.
//!
//! Uses the HTML-only version at `https://html.duckduckgo.com/html/`
//! which requires no JavaScript and is tolerant of automated requests.

use crate::engine::SearchBackendTrait;
use crate::engines::{anchor_hrefs, endpoint_with_query};
use crate::error::LookupError;
use crate::types::SearchBackend;
use url::Url;

const ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// DuckDuckGo HTML results scraper.
pub struct DuckDuckGoBackend;

impl DuckDuckGoBackend {
    /// Extract the actual URL from DuckDuckGo's redirect wrapper.
    ///
    /// DDG wraps URLs like: `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`
    /// We parse out the `uddg` query parameter and URL-decode it.
    fn extract_url(href: &str) -> Option<String> {
        // Handle protocol-relative URLs
        let full_href = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_string()
        };

        let parsed = Url::parse(&full_href).ok()?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return None;
        }

        // Check if this is a DDG redirect
        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        } else {
            Some(full_href)
        }
    }
}

impl SearchBackendTrait for DuckDuckGoBackend {
    fn backend_type(&self) -> SearchBackend {
        SearchBackend::DuckDuckGo
    }

    fn query_templates(&self) -> &'static [&'static str] {
        &["{name} official site", "\"{name}\" company profile"]
    }

    fn search_url(&self, query: &str) -> Result<String, LookupError> {
        endpoint_with_query(ENDPOINT, &[("q", query), ("kl", "jp-jp")])
    }

    fn extract_links(&self, html: &str) -> Result<Vec<String>, LookupError> {
        let links: Vec<String> = anchor_hrefs(html)?
            .iter()
            .filter_map(|href| Self::extract_url(href))
            .collect();
        tracing::debug!(count = links.len(), "DuckDuckGo links extracted");
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_DDG_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="result results_links results_links_deep web-result">
    <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.acme.com%2F&amp;rut=abc123">
        Acme Corporation
    </a>
    <a class="result__url" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.acme.com%2F&amp;rut=abc123">www.acme.com</a>
</div>
<div class="result results_links results_links_deep web-result">
    <a class="result__a" href="https://en.wikipedia.org/wiki/Acme_Corporation">
        Acme Corporation - Wikipedia
    </a>
</div>
<a href="/html/?q=acme&amp;s=30">Next</a>
</body>
</html>"#;

    #[test]
    fn extract_url_from_ddg_redirect() {
        let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fpage&rut=abc";
        let result = DuckDuckGoBackend::extract_url(href);
        assert_eq!(result, Some("https://example.com/page".to_string()));
    }

    #[test]
    fn extract_url_direct_link() {
        let href = "https://example.com/direct";
        let result = DuckDuckGoBackend::extract_url(href);
        assert_eq!(result, Some("https://example.com/direct".to_string()));
    }

    #[test]
    fn extract_url_invalid() {
        assert!(DuckDuckGoBackend::extract_url("not-a-url").is_none());
        assert!(DuckDuckGoBackend::extract_url("/html/?q=acme").is_none());
    }

    #[test]
    fn parse_mock_html_returns_links() {
        let links = DuckDuckGoBackend
            .extract_links(MOCK_DDG_HTML)
            .expect("should parse");
        assert_eq!(
            links,
            vec![
                "https://www.acme.com/",
                "https://www.acme.com/",
                "https://en.wikipedia.org/wiki/Acme_Corporation",
            ]
        );
    }

    #[test]
    fn parse_empty_html_returns_empty() {
        let links = DuckDuckGoBackend
            .extract_links("<html><body></body></html>")
            .expect("should parse");
        assert!(links.is_empty());
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DuckDuckGoBackend>();
    }
}
