//! Lookup configuration with sensible defaults.
//!
//! [`LookupConfig`] controls which search backends are scraped, the timeouts
//! for each kind of request, and the logo/favicon service bases. The
//! defaults are tuned for polite, best-effort lookups.

use crate::error::LookupError;
use crate::types::SearchBackend;
use std::time::Duration;
use url::Url;

/// Configuration for company URL and logo resolution.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Search backends for the fallback stage, tried strictly in order.
    /// An empty list skips the search stage.
    pub backends: Vec<SearchBackend>,
    /// Timeout in seconds for the strict direct-probe fast path.
    pub probe_timeout_seconds: u64,
    /// Timeout in seconds for quick existence checks in the fallback stages
    /// and for alternate logo suffixes.
    pub quick_timeout_seconds: u64,
    /// Timeout in seconds for a search results page request.
    pub search_timeout_seconds: u64,
    /// Timeout in seconds for the primary logo CDN probe.
    pub logo_timeout_seconds: u64,
    /// Maximum number of plausible links ranked from one search results
    /// page. Counted after filtering, so engine navigation links never use
    /// up the budget.
    pub max_links_per_query: usize,
    /// `Accept-Language` header sent with search requests.
    pub accept_language: String,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Base URL of the logo CDN; the domain is appended as a path segment.
    pub logo_cdn_base: String,
    /// Base URL of the favicon service; the domain is passed as a query.
    pub favicon_base: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            backends: SearchBackend::all().to_vec(),
            probe_timeout_seconds: 5,
            quick_timeout_seconds: 3,
            search_timeout_seconds: 8,
            logo_timeout_seconds: 5,
            max_links_per_query: 20,
            accept_language: "ja,en-US;q=0.9,en;q=0.8".into(),
            user_agent: None,
            logo_cdn_base: "https://logo.clearbit.com".into(),
            favicon_base: "https://www.google.com/s2/favicons".into(),
        }
    }
}

impl LookupConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - every timeout must be greater than 0
    /// - `max_links_per_query` must be greater than 0
    /// - `logo_cdn_base` and `favicon_base` must be absolute http(s) URLs
    pub fn validate(&self) -> Result<(), LookupError> {
        let timeouts = [
            ("probe_timeout_seconds", self.probe_timeout_seconds),
            ("quick_timeout_seconds", self.quick_timeout_seconds),
            ("search_timeout_seconds", self.search_timeout_seconds),
            ("logo_timeout_seconds", self.logo_timeout_seconds),
        ];
        for (field, value) in timeouts {
            if value == 0 {
                return Err(LookupError::Config(format!(
                    "{field} must be greater than 0"
                )));
            }
        }
        if self.max_links_per_query == 0 {
            return Err(LookupError::Config(
                "max_links_per_query must be greater than 0".into(),
            ));
        }
        for (field, value) in [
            ("logo_cdn_base", &self.logo_cdn_base),
            ("favicon_base", &self.favicon_base),
        ] {
            let parsed = Url::parse(value)
                .map_err(|e| LookupError::Config(format!("{field} is not a valid URL: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(LookupError::Config(format!(
                    "{field} must use http or https"
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_seconds)
    }

    pub(crate) fn quick_timeout(&self) -> Duration {
        Duration::from_secs(self.quick_timeout_seconds)
    }

    pub(crate) fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_seconds)
    }

    pub(crate) fn logo_timeout(&self) -> Duration {
        Duration::from_secs(self.logo_timeout_seconds)
    }
}
