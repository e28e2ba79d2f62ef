//! Resolution cascade: an ordered list of strategies tried until one
//! accepts.
//!
//! # State Machine
//!
//! ```text
//! START ─► DIRECT_PROBE ─► SEARCH_FALLBACK ─► HEURISTIC_GUESS ─► TRUNCATED_GUESS ─► UNRESOLVED
//!               │                 │                  │                  │
//!               └─────────────────┴──── accepted ────┴──────────────────┴─► RESOLVED
//! ```
//!
//! Every strategy shares the [`ResolveStrategy`] contract, so the URL and
//! logo pipelines are both just a `Vec` of strategies fed to
//! [`run_cascade`].

use crate::config::LookupConfig;
use crate::domains::{generate, name_part_domains, truncated_domains};
use crate::error::LookupError;
use crate::http::{ReqwestTransport, Transport};
use crate::logo::logo_strategies;
use crate::normalize::normalize;
use crate::probe::probe_domains;
use crate::search::search_fallback;
use crate::types::{AcceptPolicy, Resolution};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

/// One stage of a resolution cascade.
#[async_trait]
pub trait ResolveStrategy: Send + Sync {
    /// Stage name used in logs.
    fn name(&self) -> &'static str;

    /// Try to resolve `name`. `None` hands over to the next stage.
    async fn attempt(&self, name: &str, transport: &dyn Transport) -> Option<String>;
}

/// Run `strategies` in order and return the first acceptance.
///
/// Blank names short-circuit to [`Resolution::Unresolved`] before any
/// strategy runs, so no request is issued for them.
pub async fn run_cascade(
    strategies: &[Box<dyn ResolveStrategy>],
    name: &str,
    transport: &dyn Transport,
) -> Resolution {
    if name.trim().is_empty() {
        tracing::debug!("blank company name, skipping resolution");
        return Resolution::Unresolved;
    }
    for strategy in strategies {
        tracing::debug!(stage = strategy.name(), "entering stage");
        if let Some(url) = strategy.attempt(name, transport).await {
            tracing::debug!(stage = strategy.name(), url = %url, "resolved");
            return Resolution::Resolved(url);
        }
    }
    tracing::debug!("all stages exhausted");
    Resolution::Unresolved
}

/// Domain-pattern guessing over every normalised form, 200 only.
pub struct DirectProbe {
    /// Per-probe timeout.
    pub timeout: Duration,
}

#[async_trait]
impl ResolveStrategy for DirectProbe {
    fn name(&self) -> &'static str {
        "direct_probe"
    }

    async fn attempt(&self, name: &str, transport: &dyn Transport) -> Option<String> {
        let domains = generate(&normalize(name));
        probe_domains(transport, &domains, AcceptPolicy::Strict, self.timeout).await
    }
}

/// Scrape the configured search backends.
pub struct SearchFallback {
    /// Backends, link budget and timeouts for the search stage.
    pub config: LookupConfig,
}

#[async_trait]
impl ResolveStrategy for SearchFallback {
    fn name(&self) -> &'static str {
        "search_fallback"
    }

    async fn attempt(&self, name: &str, transport: &dyn Transport) -> Option<String> {
        search_fallback(transport, name, &self.config).await
    }
}

/// Guesses from combinations of the name's words.
pub struct NamePartGuess {
    /// Per-probe timeout.
    pub timeout: Duration,
}

#[async_trait]
impl ResolveStrategy for NamePartGuess {
    fn name(&self) -> &'static str {
        "heuristic_guess"
    }

    async fn attempt(&self, name: &str, transport: &dyn Transport) -> Option<String> {
        let domains = name_part_domains(name);
        probe_domains(transport, &domains, AcceptPolicy::Permissive, self.timeout).await
    }
}

/// Guesses from the truncated, fully stripped name.
pub struct TruncatedGuess {
    /// Per-probe timeout.
    pub timeout: Duration,
}

#[async_trait]
impl ResolveStrategy for TruncatedGuess {
    fn name(&self) -> &'static str {
        "truncated_guess"
    }

    async fn attempt(&self, name: &str, transport: &dyn Transport) -> Option<String> {
        let domains = truncated_domains(name);
        probe_domains(transport, &domains, AcceptPolicy::Permissive, self.timeout).await
    }
}

/// The official-site cascade, in order.
pub fn url_strategies(config: &LookupConfig) -> Vec<Box<dyn ResolveStrategy>> {
    vec![
        Box::new(DirectProbe {
            timeout: config.probe_timeout(),
        }),
        Box::new(SearchFallback {
            config: config.clone(),
        }),
        Box::new(NamePartGuess {
            timeout: config.quick_timeout(),
        }),
        Box::new(TruncatedGuess {
            timeout: config.quick_timeout(),
        }),
    ]
}

/// Resolves company names to official sites and logos over a transport.
pub struct Resolver<T: Transport> {
    transport: T,
    url_strategies: Vec<Box<dyn ResolveStrategy>>,
    logo_strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl Resolver<ReqwestTransport> {
    /// Build a resolver over a real HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Config`] for an invalid configuration, or
    /// [`LookupError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &LookupConfig) -> Result<Self, LookupError> {
        Self::new(ReqwestTransport::new(config)?, config)
    }
}

impl<T: Transport> Resolver<T> {
    /// Build a resolver over an arbitrary transport.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Config`] if `config` fails validation.
    pub fn new(transport: T, config: &LookupConfig) -> Result<Self, LookupError> {
        config.validate()?;
        Ok(Self {
            transport,
            url_strategies: url_strategies(config),
            logo_strategies: logo_strategies(config),
        })
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Guess the official website of `name`.
    pub async fn resolve_company_url(&self, name: &str) -> Resolution {
        tracing::debug!(name, "resolving company url");
        run_cascade(&self.url_strategies, name, &self.transport).await
    }

    /// Guess a logo image URL for `name`.
    ///
    /// Never `Unresolved` for a non-blank name: the last stage constructs a
    /// favicon-service URL without probing it.
    pub async fn resolve_logo(&self, name: &str) -> Resolution {
        tracing::debug!(name, "resolving company logo");
        run_cascade(&self.logo_strategies, name, &self.transport).await
    }

    /// [`Self::resolve_company_url`] under an overall time budget.
    ///
    /// Running out of budget is [`Resolution::Unresolved`], like exhausting
    /// every stage.
    pub async fn resolve_company_url_within(&self, name: &str, budget: Duration) -> Resolution {
        within("company_url", budget, self.resolve_company_url(name)).await
    }

    /// [`Self::resolve_logo`] under an overall time budget.
    pub async fn resolve_logo_within(&self, name: &str, budget: Duration) -> Resolution {
        within("logo", budget, self.resolve_logo(name)).await
    }
}

async fn within(
    lookup: &'static str,
    budget: Duration,
    cascade: impl Future<Output = Resolution>,
) -> Resolution {
    match tokio::time::timeout(budget, cascade).await {
        Ok(resolution) => resolution,
        Err(_) => {
            tracing::warn!(lookup, ?budget, "lookup budget exhausted");
            Resolution::Unresolved
        }
    }
}
