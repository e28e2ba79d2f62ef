//! HTTP transport for existence probes and search page fetches.
//!
//! Everything the resolver does on the network goes through the
//! [`Transport`] trait so that the cascade can be driven by a scripted
//! transport in tests. [`ReqwestTransport`] is the production
//! implementation: a [`reqwest::Client`] with browser-like headers,
//! cookie support, redirect following, and a rotating User-Agent.

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::types::{AcceptPolicy, ProbeOutcome};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::time::Duration;

/// Realistic browser User-Agent strings, one picked per transport.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Maximum redirect hops followed by a probe.
const MAX_REDIRECTS: usize = 10;

/// A completed HTTP exchange, after redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Final status code.
    pub status: u16,
    /// URL of the final response after following redirects.
    pub final_url: String,
    /// Response body. Always empty for HEAD requests.
    pub body: String,
}

/// The HTTP capability the resolver depends on.
///
/// Implementations must follow redirects and honour the per-request
/// timeout. Errors are reported, never panicked; the resolver turns every
/// error into a rejected candidate.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a HEAD request and report the final status and URL.
    async fn head(&self, url: &str, timeout: Duration) -> Result<HttpResponse, LookupError>;

    /// Issue a GET request for an HTML page.
    async fn get(
        &self,
        url: &str,
        accept_language: &str,
        timeout: Duration,
    ) -> Result<HttpResponse, LookupError>;
}

/// Production [`Transport`] backed by [`reqwest`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the client cannot be constructed.
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        Ok(Self {
            client: build_client(config)?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn head(&self, url: &str, timeout: Duration) -> Result<HttpResponse, LookupError> {
        let response = self
            .client
            .head(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        Ok(HttpResponse {
            status: response.status().as_u16(),
            final_url: response.url().to_string(),
            body: String::new(),
        })
    }

    async fn get(
        &self,
        url: &str,
        accept_language: &str,
        timeout: Duration,
    ) -> Result<HttpResponse, LookupError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", accept_language)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Http(format!("response read failed for {url}: {e}")))?;

        Ok(HttpResponse {
            status,
            final_url,
            body,
        })
    }
}

/// Build a [`reqwest::Client`] configured for probing and scraping.
///
/// The client has:
/// - Cookie store enabled (for consent pages on search engines)
/// - Random User-Agent from built-in rotation list (or custom if configured)
/// - Redirects followed up to [`MAX_REDIRECTS`] hops
/// - Brotli and gzip decompression
///
/// Timeouts are set per request, not on the client.
///
/// # Errors
///
/// Returns [`LookupError::Http`] if the client cannot be constructed.
pub fn build_client(config: &LookupConfig) -> Result<reqwest::Client, LookupError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    reqwest::Client::builder()
        .cookie_store(true)
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| LookupError::Http(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}

/// Probe `url` with a HEAD request and classify the result under `policy`.
///
/// Never fails: transport errors come back as
/// [`ProbeOutcome::TransportError`].
pub async fn probe_url(
    transport: &dyn Transport,
    url: &str,
    policy: AcceptPolicy,
    timeout: Duration,
) -> ProbeOutcome {
    tracing::trace!(url, ?policy, "probe");
    match transport.head(url, timeout).await {
        Ok(response) if policy.accepts(response.status) => ProbeOutcome::Accepted {
            final_url: response.final_url,
        },
        Ok(response) => {
            tracing::trace!(url, status = response.status, "probe rejected");
            ProbeOutcome::Rejected {
                status: response.status,
            }
        }
        Err(err) => {
            tracing::trace!(url, error = %err, "probe transport error");
            ProbeOutcome::TransportError(err.to_string())
        }
    }
}

fn map_reqwest_error(url: &str, err: reqwest::Error) -> LookupError {
    if err.is_timeout() {
        LookupError::Timeout(format!("{url}: {err}"))
    } else {
        LookupError::Http(format!("request to {url} failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport() -> ReqwestTransport {
        let config = LookupConfig {
            user_agent: Some("TestBot/1.0".into()),
            ..Default::default()
        };
        ReqwestTransport::new(&config).expect("client should build")
    }

    #[test]
    fn random_user_agent_returns_valid_ua() {
        let ua = random_user_agent();
        assert!(USER_AGENTS.contains(&ua));
        assert!(ua.contains("Mozilla/5.0"));
    }

    #[test]
    fn build_client_with_default_config() {
        assert!(build_client(&LookupConfig::default()).is_ok());
    }

    #[test]
    fn build_client_with_custom_ua() {
        let config = LookupConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }

    #[tokio::test]
    async fn head_reports_status_and_url() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/", server.uri());
        let response = transport()
            .head(&url, Duration::from_secs(2))
            .await
            .expect("head should succeed");
        assert_eq!(response.status, 200);
        assert_eq!(response.final_url, url);
        assert!(response.body.is_empty());
    }

    #[tokio::test]
    async fn head_follows_redirects_to_final_url() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("Location", format!("{}/new", server.uri())),
            )
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let outcome = probe_url(
            &transport(),
            &format!("{}/old", server.uri()),
            AcceptPolicy::Strict,
            Duration::from_secs(2),
        )
        .await;
        assert_eq!(
            outcome,
            ProbeOutcome::Accepted {
                final_url: format!("{}/new", server.uri())
            }
        );
    }

    #[tokio::test]
    async fn probe_rejects_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let outcome = probe_url(
            &transport(),
            &server.uri(),
            AcceptPolicy::Permissive,
            Duration::from_secs(2),
        )
        .await;
        assert_eq!(outcome, ProbeOutcome::Rejected { status: 404 });
    }

    #[tokio::test]
    async fn probe_contains_connection_failure() {
        // Port 1 is reserved (tcpmux) and refused on any sane test host.
        let outcome = probe_url(
            &transport(),
            "http://127.0.0.1:1/",
            AcceptPolicy::Permissive,
            Duration::from_secs(2),
        )
        .await;
        assert!(matches!(outcome, ProbeOutcome::TransportError(_)));
    }

    #[tokio::test]
    async fn get_returns_body_and_sends_language() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(wiremock::matchers::header("Accept-Language", "ja"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let response = transport()
            .get(
                &format!("{}/search?q=acme", server.uri()),
                "ja",
                Duration::from_secs(2),
            )
            .await
            .expect("get should succeed");
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "<html>ok</html>");
    }
}
