//! Direct existence probes over domain candidates.
//!
//! Each domain is tried as `https://www.<domain>`, then `https://<domain>`,
//! then `http://<domain>`, strictly in order, and the first accepted
//! response wins. Hosts that already start with `www.` skip the first form.
//! Failures never escape: a domain that times out, refuses, or answers with
//! the wrong status simply loses its turn.

use crate::http::{probe_url, Transport};
use crate::types::{AcceptPolicy, ProbeOutcome};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Transport schemes in probe order.
pub const SCHEMES: &[&str] = &["https", "http"];

/// Host prefix tried first over `https` for bare domains.
pub const WWW_PREFIX: &str = "www.";

/// The URLs probed for one domain, in order.
pub fn probe_urls(domain: &str) -> Vec<String> {
    let mut urls = Vec::with_capacity(3);
    if !domain.starts_with(WWW_PREFIX) {
        urls.push(format!("https://{WWW_PREFIX}{domain}"));
    }
    urls.extend(SCHEMES.iter().map(|scheme| format!("{scheme}://{domain}")));
    urls
}

/// Probe `domains` in order and return the first accepted final URL.
///
/// Repeats (compared case-insensitively) are probed once, and so is any
/// URL already issued for an earlier domain (`www.acme.com` after
/// `acme.com`). Domains that cannot form a valid URL host are skipped
/// without touching the transport.
pub async fn probe_domains(
    transport: &dyn Transport,
    domains: &[String],
    policy: AcceptPolicy,
    timeout: Duration,
) -> Option<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut issued: HashSet<String> = HashSet::new();
    for domain in domains {
        // Hosts are case-insensitive; "Acme.com" and "acme.com" are one probe.
        let domain = domain.to_lowercase();
        if !seen.insert(domain.clone()) {
            continue;
        }
        if !is_probeable_host(&domain) {
            tracing::trace!(domain = %domain, "skipping malformed domain candidate");
            continue;
        }
        for url in probe_urls(&domain) {
            if !issued.insert(url.clone()) {
                continue;
            }
            match probe_url(transport, &url, policy, timeout).await {
                ProbeOutcome::Accepted { final_url } => {
                    tracing::debug!(candidate = %url, final_url = %final_url, "probe accepted");
                    return Some(final_url);
                }
                ProbeOutcome::Rejected { .. } | ProbeOutcome::TransportError(_) => {}
            }
        }
    }
    None
}

/// Returns `true` if `domain` is usable as a bare URL host.
fn is_probeable_host(domain: &str) -> bool {
    if domain.is_empty() || domain.chars().any(|c| c.is_whitespace() || "/?#@:".contains(c)) {
        return false;
    }
    Url::parse(&format!("https://{domain}"))
        .ok()
        .and_then(|url| url.host_str().map(|host| !host.is_empty()))
        .unwrap_or(false)
}
