//! Google search backend: primary general web search.
//!
//! The no-JavaScript results page wraps outbound links as
//! `/url?q=<target>&sa=U&…`; the target is pulled out of the `q`
//! (or occasionally `url`) parameter.

use crate::engine::SearchBackendTrait;
use crate::engines::{absolute_http_url, anchor_hrefs, endpoint_with_query};
use crate::error::LookupError;
use crate::types::SearchBackend;

const ENDPOINT: &str = "https://www.google.com/search";

/// Google HTML results scraper.
pub struct GoogleBackend;

impl GoogleBackend {
    /// Extract the real target from a Google result link.
    fn extract_url(href: &str) -> Option<String> {
        let parsed = absolute_http_url(ENDPOINT, href)?;
        let is_google = parsed
            .host_str()
            .is_some_and(|host| host == "google.com" || host.ends_with(".google.com"));

        if is_google && parsed.path() == "/url" {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "q" || key == "url")
                .map(|(_, value)| value.into_owned())
                .filter(|target| target.starts_with("http://") || target.starts_with("https://"))
        } else {
            Some(parsed.to_string())
        }
    }
}

impl SearchBackendTrait for GoogleBackend {
    fn backend_type(&self) -> SearchBackend {
        SearchBackend::Google
    }

    fn query_templates(&self) -> &'static [&'static str] {
        &[
            "\"{name}\" site:co.jp OR site:jp OR site:com",
            "{name} 公式サイト",
            "{name} 会社概要",
        ]
    }

    fn search_url(&self, query: &str) -> Result<String, LookupError> {
        endpoint_with_query(ENDPOINT, &[("q", query), ("hl", "ja"), ("num", "20")])
    }

    fn extract_links(&self, html: &str) -> Result<Vec<String>, LookupError> {
        let links: Vec<String> = anchor_hrefs(html)?
            .iter()
            .filter_map(|href| Self::extract_url(href))
            .collect();
        tracing::debug!(count = links.len(), "Google links extracted");
        Ok(links)
    }
}
