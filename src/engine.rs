//! Trait definition for pluggable search backends.
//!
//! Each backend (Google, Bing, Yahoo! JAPAN, DuckDuckGo) implements
//! [`SearchBackendTrait`] to provide a uniform interface for building
//! query URLs and pulling candidate links out of a results page. The
//! network round trip itself is owned by the fallback resolver so that
//! every request goes through the shared [`crate::http::Transport`].

use crate::engines::{BingBackend, DuckDuckGoBackend, GoogleBackend, YahooJapanBackend};
use crate::error::LookupError;
use crate::types::SearchBackend;

/// A pluggable search backend.
///
/// Implementors know one engine's endpoint, its query phrasing, and how it
/// wraps outbound result links. All implementations must be `Send + Sync`.
pub trait SearchBackendTrait: Send + Sync {
    /// Returns which [`SearchBackend`] variant this implementation represents.
    fn backend_type(&self) -> SearchBackend;

    /// Query patterns for this backend, tried in order. `{name}` is
    /// replaced with the company name.
    fn query_templates(&self) -> &'static [&'static str];

    /// Build the full results-page URL for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Parse`] if the endpoint cannot be combined
    /// with the query.
    fn search_url(&self, query: &str) -> Result<String, LookupError>;

    /// Extract every outbound link from a results page, unwrapping the
    /// engine's redirect wrapper where present, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Parse`] if the page cannot be parsed.
    fn extract_links(&self, html: &str) -> Result<Vec<String>, LookupError>;

    /// Expand the query templates for `name`.
    fn queries(&self, name: &str) -> Vec<String> {
        self.query_templates()
            .iter()
            .map(|template| template.replace("{name}", name))
            .collect()
    }
}

/// Returns the implementation for `backend`.
pub fn backend_impl(backend: SearchBackend) -> &'static dyn SearchBackendTrait {
    match backend {
        SearchBackend::Google => &GoogleBackend,
        SearchBackend::Bing => &BingBackend,
        SearchBackend::YahooJapan => &YahooJapanBackend,
        SearchBackend::DuckDuckGo => &DuckDuckGoBackend,
    }
}
