//! Search backend implementations.
//!
//! Each module provides a struct implementing
//! [`crate::engine::SearchBackendTrait`] for one engine's results page.

pub mod bing;
pub mod duckduckgo;
pub mod google;
pub mod yahoo_japan;

pub use bing::BingBackend;
pub use duckduckgo::DuckDuckGoBackend;
pub use google::GoogleBackend;
pub use yahoo_japan::YahooJapanBackend;

use crate::error::LookupError;
use scraper::{Html, Selector};
use url::Url;

/// Collect the raw `href` of every anchor in `html`, in document order.
pub(crate) fn anchor_hrefs(html: &str) -> Result<Vec<String>, LookupError> {
    let document = Html::parse_document(html);
    let anchor_sel = Selector::parse("a[href]")
        .map_err(|e| LookupError::Parse(format!("invalid anchor selector: {e:?}")))?;

    Ok(document
        .select(&anchor_sel)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
        .collect())
}

/// Build `endpoint?<params>` with proper query encoding.
pub(crate) fn endpoint_with_query(
    endpoint: &str,
    params: &[(&str, &str)],
) -> Result<String, LookupError> {
    Url::parse_with_params(endpoint, params)
        .map(String::from)
        .map_err(|e| LookupError::Parse(format!("invalid search endpoint {endpoint}: {e}")))
}

/// Resolve `href` against `base` and keep it only if it is http(s).
pub(crate) fn absolute_http_url(base: &str, href: &str) -> Option<Url> {
    let base = Url::parse(base).ok()?;
    let url = base.join(href).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}
