//! Core types for resolution outcomes, probe outcomes, and search backends.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal outcome of a resolution attempt.
///
/// Either a concrete absolute URL, or an explicit absence of one. Never
/// partially filled. `Unresolved` is a normal outcome, not an error:
/// callers should treat it as "no enrichment available".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "url", rename_all = "snake_case")]
pub enum Resolution {
    /// A URL was accepted by one of the cascade stages.
    Resolved(String),
    /// Every stage was exhausted, or the input was blank.
    Unresolved,
}

impl Resolution {
    /// Returns `true` if a URL was found.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Borrow the resolved URL, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Resolved(url) => Some(url),
            Self::Unresolved => None,
        }
    }

    /// Convert into the URL, if any.
    pub fn into_option(self) -> Option<String> {
        match self {
            Self::Resolved(url) => Some(url),
            Self::Unresolved => None,
        }
    }
}

impl From<Option<String>> for Resolution {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(url) => Self::Resolved(url),
            None => Self::Unresolved,
        }
    }
}

/// Which HTTP status codes count as "the site exists".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptPolicy {
    /// Only `200 OK`. Used for the initial domain-pattern fast path and
    /// logo CDN probes.
    Strict,
    /// `200`, `301` or `302`. Used by the later fallback stages.
    Permissive,
}

impl AcceptPolicy {
    /// Returns `true` if `status` is accepted under this policy.
    pub fn accepts(&self, status: u16) -> bool {
        match self {
            Self::Strict => status == 200,
            Self::Permissive => matches!(status, 200 | 301 | 302),
        }
    }
}

/// Outcome of a single existence probe against one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The status was accepted; carries the final URL after redirects.
    Accepted { final_url: String },
    /// The server answered with a status outside the accepted set.
    Rejected { status: u16 },
    /// The request never produced a status (timeout, DNS, TLS, refused).
    TransportError(String),
}

impl ProbeOutcome {
    /// The accepted final URL, if any.
    pub fn accepted_url(self) -> Option<String> {
        match self {
            Self::Accepted { final_url } => Some(final_url),
            Self::Rejected { .. } | Self::TransportError(_) => None,
        }
    }
}

/// Search engines the fallback stage can scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchBackend {
    /// Google: primary general web search.
    Google,
    /// Bing: alternate general index.
    Bing,
    /// Yahoo! JAPAN: regional engine, strong for `.co.jp` companies.
    YahooJapan,
    /// DuckDuckGo HTML endpoint: most tolerant of automated requests.
    DuckDuckGo,
}

impl SearchBackend {
    /// Returns the human-readable name of this backend.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Bing => "Bing",
            Self::YahooJapan => "Yahoo! JAPAN",
            Self::DuckDuckGo => "DuckDuckGo",
        }
    }

    /// Returns all backends in their default priority order.
    pub fn all() -> &'static [SearchBackend] {
        &[Self::Google, Self::Bing, Self::YahooJapan, Self::DuckDuckGo]
    }
}

impl fmt::Display for SearchBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
