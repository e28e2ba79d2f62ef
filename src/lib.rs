//! # company-lookup
//!
//! Best-effort official website and logo lookup for company names.
//!
//! Given nothing but a free-text company name, this crate guesses the
//! company's official site and a logo image URL. There is no authoritative
//! directory behind it and no API keys: it probes guessed domains, scrapes
//! public search engines, and degrades to "unresolved" when every
//! heuristic fails.
//!
//! ## Design
//!
//! - Name normalisation by declarative rules (legal-entity markers in both
//!   Latin and Japanese script)
//! - Domain-pattern guessing with HEAD probes, `https` before `http`
//! - Google, Bing, Yahoo! JAPAN and DuckDuckGo scraped in a fixed order,
//!   links filtered against portal/social hosts and ranked by score
//! - Name-part and truncated-name guesses as the last resort
//! - Logo CDN probes with a constructed favicon fallback
//! - Strictly sequential requests: the first acceptance in priority order
//!   wins, and the request order is reproducible
//!
//! Resolution never fails. Network errors are contained at the candidate
//! that hit them; exhausting every stage yields [`Resolution::Unresolved`].

pub mod config;
pub mod domains;
pub mod engine;
pub mod engines;
pub mod error;
pub mod http;
pub mod logo;
pub mod normalize;
pub mod probe;
pub mod record;
pub mod resolver;
pub mod search;
pub mod types;

pub use config::LookupConfig;
pub use engine::SearchBackendTrait;
pub use error::{LookupError, Result};
pub use http::{HttpResponse, ReqwestTransport, Transport};
pub use record::{ActivityEntry, CompanyRecord, PipelineStatus};
pub use resolver::{ResolveStrategy, Resolver};
pub use types::{AcceptPolicy, ProbeOutcome, Resolution, SearchBackend};

/// Guess the official website for a company name.
///
/// Runs the full cascade (direct probes, search fallback, name-part and
/// truncated guesses) over a real HTTP client. Blank names resolve to
/// [`Resolution::Unresolved`] without any request.
///
/// # Errors
///
/// Returns [`LookupError::Config`] if `config` is invalid, or
/// [`LookupError::Http`] if the HTTP client cannot be built. Resolution
/// itself never errors.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> company_lookup::Result<()> {
/// let config = company_lookup::LookupConfig::default();
/// let site = company_lookup::resolve_company_url("Acme Robotics Inc.", &config).await?;
/// if let Some(url) = site.url() {
///     println!("official site: {url}");
/// }
/// # Ok(())
/// # }
/// ```
pub async fn resolve_company_url(name: &str, config: &LookupConfig) -> Result<Resolution> {
    let resolver = Resolver::from_config(config)?;
    Ok(resolver.resolve_company_url(name).await)
}

/// Guess a logo image URL for a company name.
///
/// For any non-blank name this is always [`Resolution::Resolved`]: if the
/// logo CDN has nothing, a favicon-service URL is constructed instead.
///
/// # Errors
///
/// Same as [`resolve_company_url`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> company_lookup::Result<()> {
/// let config = company_lookup::LookupConfig::default();
/// let logo = company_lookup::resolve_logo("Acme", &config).await?;
/// println!("{:?}", logo.url());
/// # Ok(())
/// # }
/// ```
pub async fn resolve_logo(name: &str, config: &LookupConfig) -> Result<Resolution> {
    let resolver = Resolver::from_config(config)?;
    Ok(resolver.resolve_logo(name).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolve_validates_config_zero_timeout() {
        let config = LookupConfig {
            probe_timeout_seconds: 0,
            ..Default::default()
        };
        let result = resolve_company_url("Acme", &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[tokio::test]
    async fn resolve_logo_validates_config() {
        let config = LookupConfig {
            favicon_base: String::new(),
            ..Default::default()
        };
        let result = resolve_logo("Acme", &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("favicon_base"));
    }

    #[tokio::test]
    async fn blank_name_resolves_without_network() {
        let config = LookupConfig::default();
        let site = resolve_company_url("   ", &config).await.expect("valid config");
        assert_eq!(site, Resolution::Unresolved);
        let logo = resolve_logo("", &config).await.expect("valid config");
        assert_eq!(logo, Resolution::Unresolved);
    }

    #[tokio::test]
    #[ignore] // Live test, run with `cargo test -- --ignored`
    async fn live_resolve_known_company() {
        let config = LookupConfig::default();
        let site = resolve_company_url("Toyota Motor Corporation", &config)
            .await
            .expect("valid config");
        assert!(site.is_resolved());
    }
}
