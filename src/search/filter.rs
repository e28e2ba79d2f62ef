//! Plausibility filters for scraped links.
//!
//! A link survives only if its host is not one of the well-known
//! non-company sites and it ends in a recognised business suffix.

use crate::domains::DOMAIN_SUFFIXES;
use url::Url;

/// Host terms that mark a link as a portal rather than a company site:
/// search engines, social networks, video platforms, encyclopedias,
/// e-commerce, and job boards.
pub const EXCLUDED_HOST_TERMS: &[&str] = &[
    // search engines
    "google",
    "yahoo",
    "duckduckgo",
    "microsoft",
    // social networks and video
    "facebook",
    "twitter",
    "instagram",
    "linkedin",
    "youtube",
    "tiktok",
    "pinterest",
    // encyclopedias
    "wikipedia",
    "wikiwand",
    "weblio",
    // e-commerce
    "amazon",
    "rakuten",
    "mercari",
    // job portals and company databases
    "indeed",
    "glassdoor",
    "wantedly",
    "mynavi",
    "rikunabi",
    "crunchbase",
    "prtimes",
];

/// Excluded hosts too short to match as substrings safely.
pub const EXCLUDED_HOSTS: &[&str] = &[
    "bing.com",
    "msn.com",
    "x.com",
    "t.co",
    "note.com",
    "doda.jp",
];

/// Extra suffixes accepted for scraped links on top of [`DOMAIN_SUFFIXES`].
pub const EXTRA_BUSINESS_SUFFIXES: &[&str] =
    &[".co", ".io", ".ai", ".inc", ".tech", ".ne.jp", ".or.jp"];

/// Returns `true` if `host` belongs to an excluded site.
pub fn is_excluded_host(host: &str) -> bool {
    let host = host.to_lowercase();
    EXCLUDED_HOST_TERMS.iter().any(|term| host.contains(term))
        || EXCLUDED_HOSTS
            .iter()
            .any(|excluded| host == *excluded || host.ends_with(&format!(".{excluded}")))
}

/// Returns `true` if `host` ends with a recognised business suffix.
pub fn has_business_suffix(host: &str) -> bool {
    let host = host.to_lowercase();
    DOMAIN_SUFFIXES
        .iter()
        .chain(EXTRA_BUSINESS_SUFFIXES)
        .any(|suffix| host.ends_with(suffix))
}

/// Returns the parsed URL if `link` is a plausible company page.
pub fn plausible_company_url(link: &str) -> Option<Url> {
    let url = Url::parse(link).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?;
    if is_excluded_host(host) || !has_business_suffix(host) {
        return None;
    }
    Some(url)
}
