//! Yahoo! JAPAN search backend: regional engine with good coverage of
//! Japanese corporate sites.
//!
//! Most result links are direct, but tracked clicks look like
//! `https://ord.yahoo.co.jp/o/search/_ylt=…/RV=2/RE=…/RU=<pct-encoded>/RK=2/RS=…`.

use crate::engine::SearchBackendTrait;
use crate::engines::{absolute_http_url, anchor_hrefs, endpoint_with_query};
use crate::error::LookupError;
use crate::types::SearchBackend;
use url::form_urlencoded;

const ENDPOINT: &str = "https://search.yahoo.co.jp/search";

/// Yahoo! JAPAN HTML results scraper.
pub struct YahooJapanBackend;

impl YahooJapanBackend {
    /// Extract the real target from a Yahoo! JAPAN result link.
    fn extract_url(href: &str) -> Option<String> {
        if let Some(start) = href.find("/RU=") {
            let rest = &href[start + "/RU=".len()..];
            let end = ["/RK=", "/RS="]
                .iter()
                .filter_map(|marker| rest.find(marker))
                .min()
                .unwrap_or(rest.len());
            let target = percent_decode(&rest[..end]);
            return absolute_http_url(ENDPOINT, &target)
                .filter(|_| target.starts_with("http://") || target.starts_with("https://"))
                .map(String::from);
        }
        absolute_http_url(ENDPOINT, href).map(String::from)
    }
}

fn percent_decode(encoded: &str) -> String {
    form_urlencoded::parse(format!("v={encoded}").as_bytes())
        .next()
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

impl SearchBackendTrait for YahooJapanBackend {
    fn backend_type(&self) -> SearchBackend {
        SearchBackend::YahooJapan
    }

    fn query_templates(&self) -> &'static [&'static str] {
        &["{name} 公式サイト", "{name} 企業情報"]
    }

    fn search_url(&self, query: &str) -> Result<String, LookupError> {
        endpoint_with_query(ENDPOINT, &[("p", query), ("ei", "UTF-8")])
    }

    fn extract_links(&self, html: &str) -> Result<Vec<String>, LookupError> {
        let links: Vec<String> = anchor_hrefs(html)?
            .iter()
            .filter_map(|href| Self::extract_url(href))
            .collect();
        tracing::debug!(count = links.len(), "Yahoo! JAPAN links extracted");
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_url_unwraps_ru_parameter() {
        let href = "https://ord.yahoo.co.jp/o/search/_ylt=A2R/RV=2/RU=https%3a%2f%2fwww.sample.co.jp%2fcompany%2f/RK=2/RS=abc-";
        assert_eq!(
            YahooJapanBackend::extract_url(href),
            Some("https://www.sample.co.jp/company/".to_string())
        );
    }

    #[test]
    fn extract_url_drops_non_url_target() {
        let href = "https://ord.yahoo.co.jp/o/search/RV=2/RU=garbage/RK=2/RS=abc-";
        assert_eq!(YahooJapanBackend::extract_url(href), None);
    }

    #[test]
    fn extract_url_keeps_direct_link() {
        assert_eq!(
            YahooJapanBackend::extract_url("https://www.sample.co.jp/"),
            Some("https://www.sample.co.jp/".to_string())
        );
    }

    #[test]
    fn relative_links_resolve_against_yahoo() {
        assert_eq!(
            YahooJapanBackend::extract_url("/search?p=next"),
            Some("https://search.yahoo.co.jp/search?p=next".to_string())
        );
    }

    #[test]
    fn parse_mock_html_returns_links() {
        let html = r#"<html><body>
<div class="sw-Card"><a href="https://www.sample.co.jp/">株式会社サンプル</a></div>
<div class="sw-Card"><a href="https://ord.yahoo.co.jp/o/search/RV=2/RU=https%3a%2f%2fsample-corp.com%2f/RK=2/RS=x">Sample Corp</a></div>
</body></html>"#;
        let links = YahooJapanBackend
            .extract_links(html)
            .expect("should parse");
        assert_eq!(
            links,
            vec!["https://www.sample.co.jp/", "https://sample-corp.com/"]
        );
    }

    #[test]
    fn search_url_uses_p_parameter() {
        let url = YahooJapanBackend
            .search_url("サンプル 公式サイト")
            .expect("should build");
        assert!(url.starts_with("https://search.yahoo.co.jp/search?p="));
    }
}
