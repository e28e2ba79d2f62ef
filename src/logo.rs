//! Logo lookup: logo CDN probes with a constructed favicon fallback.

use crate::config::LookupConfig;
use crate::http::{probe_url, Transport};
use crate::normalize::{apply_rules, normalize, NameRule, SEPARATOR_CHARS};
use crate::resolver::ResolveStrategy;
use crate::types::AcceptPolicy;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Suffix of the primary logo domain guess.
pub const PRIMARY_LOGO_SUFFIX: &str = ".com";

/// Suffixes tried against the logo CDN after the primary guess fails.
pub const ALTERNATE_LOGO_SUFFIXES: &[&str] = &[".co.jp", ".jp", ".net", ".org"];

/// Domain stem used for logo lookups: legal-entity markers, whitespace and
/// separators removed, lower-cased.
///
/// Falls back to the most aggressive normalised form when nothing
/// alphanumeric survives, so any non-blank name yields a stem.
pub fn logo_stem(name: &str) -> Option<String> {
    let stem: String = apply_rules(
        name,
        &[
            NameRule::StripCorporateTokens,
            NameRule::Lowercase,
            NameRule::RemoveSeparators(SEPARATOR_CHARS),
        ],
    )
    .chars()
    .filter(|c| c.is_alphanumeric())
    .collect();
    if !stem.is_empty() {
        return Some(stem);
    }
    normalize(name).pop().filter(|most_aggressive| !most_aggressive.is_empty())
}

/// Probe `<cdn>/<stem><suffix>` for each suffix; 200 only.
pub struct LogoCdnProbe {
    /// Logo CDN base URL; the domain is appended as a path segment.
    pub cdn_base: String,
    /// Domain suffixes tried after the stem, in order.
    pub suffixes: &'static [&'static str],
    /// Per-probe timeout.
    pub timeout: Duration,
    /// Stage name used in logs.
    pub label: &'static str,
}

impl LogoCdnProbe {
    fn logo_url(&self, domain: &str) -> String {
        format!("{}/{domain}", self.cdn_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl ResolveStrategy for LogoCdnProbe {
    fn name(&self) -> &'static str {
        self.label
    }

    async fn attempt(&self, name: &str, transport: &dyn Transport) -> Option<String> {
        let stem = logo_stem(name)?;
        for suffix in self.suffixes {
            let logo_url = self.logo_url(&format!("{stem}{suffix}"));
            if probe_url(transport, &logo_url, AcceptPolicy::Strict, self.timeout)
                .await
                .accepted_url()
                .is_some()
            {
                return Some(logo_url);
            }
        }
        None
    }
}

/// Favicon-service URL for the primary domain guess. Constructed, never
/// probed.
pub struct FaviconFallback {
    /// Favicon service base URL; the domain is passed as a query.
    pub favicon_base: String,
}

impl FaviconFallback {
    /// The favicon URL for `domain`.
    pub fn favicon_url(&self, domain: &str) -> Option<String> {
        Url::parse_with_params(&self.favicon_base, &[("sz", "64"), ("domain", domain)])
            .map(String::from)
            .ok()
    }
}

#[async_trait]
impl ResolveStrategy for FaviconFallback {
    fn name(&self) -> &'static str {
        "favicon_fallback"
    }

    async fn attempt(&self, name: &str, _transport: &dyn Transport) -> Option<String> {
        let stem = logo_stem(name)?;
        self.favicon_url(&format!("{stem}{PRIMARY_LOGO_SUFFIX}"))
    }
}

/// The logo cascade, in order.
pub fn logo_strategies(config: &LookupConfig) -> Vec<Box<dyn ResolveStrategy>> {
    vec![
        Box::new(LogoCdnProbe {
            cdn_base: config.logo_cdn_base.clone(),
            suffixes: &[PRIMARY_LOGO_SUFFIX],
            timeout: config.logo_timeout(),
            label: "logo_cdn",
        }),
        Box::new(LogoCdnProbe {
            cdn_base: config.logo_cdn_base.clone(),
            suffixes: ALTERNATE_LOGO_SUFFIXES,
            timeout: config.quick_timeout(),
            label: "logo_cdn_alternate",
        }),
        Box::new(FaviconFallback {
            favicon_base: config.favicon_base.clone(),
        }),
    ]
}
