//! Bing search backend: alternate general index.
//!
//! Bing frequently routes result clicks through
//! `https://www.bing.com/ck/a?…&u=a1<base64url>&ntb=1`, where the target
//! URL is base64url-encoded behind an `a1` prefix.

use crate::engine::SearchBackendTrait;
use crate::engines::{absolute_http_url, anchor_hrefs, endpoint_with_query};
use crate::error::LookupError;
use crate::types::SearchBackend;
use base64::Engine as _;

const ENDPOINT: &str = "https://www.bing.com/search";

/// Bing HTML results scraper.
pub struct BingBackend;

impl BingBackend {
    /// Extract the real target from a Bing result link.
    fn extract_url(href: &str) -> Option<String> {
        let parsed = absolute_http_url(ENDPOINT, href)?;
        let is_bing = parsed
            .host_str()
            .is_some_and(|host| host == "bing.com" || host.ends_with(".bing.com"));

        if is_bing && parsed.path().starts_with("/ck/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "u")
                .and_then(|(_, value)| decode_target(&value))
        } else {
            Some(parsed.to_string())
        }
    }
}

/// Decode Bing's `a1<base64url>` target encoding.
fn decode_target(encoded: &str) -> Option<String> {
    let payload = encoded.strip_prefix("a1")?.trim_end_matches('=');
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .ok()?;
    let target = String::from_utf8(bytes).ok()?;
    (target.starts_with("http://") || target.starts_with("https://")).then_some(target)
}

impl SearchBackendTrait for BingBackend {
    fn backend_type(&self) -> SearchBackend {
        SearchBackend::Bing
    }

    fn query_templates(&self) -> &'static [&'static str] {
        &["{name} official website", "{name} 公式サイト"]
    }

    fn search_url(&self, query: &str) -> Result<String, LookupError> {
        endpoint_with_query(ENDPOINT, &[("q", query), ("setlang", "ja")])
    }

    fn extract_links(&self, html: &str) -> Result<Vec<String>, LookupError> {
        let links: Vec<String> = anchor_hrefs(html)?
            .iter()
            .filter_map(|href| Self::extract_url(href))
            .collect();
        tracing::debug!(count = links.len(), "Bing links extracted");
        Ok(links)
    }
}
