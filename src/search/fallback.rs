//! Search-engine fallback resolver.
//!
//! Walks the configured backends strictly in order. For each backend, each
//! query template is fetched and its links are unwrapped, filtered,
//! capped at `max_links_per_query` and ranked. The ranked links get a
//! quick existence check and the first one that passes wins. A backend
//! that errors or returns a non-200 page is abandoned and the next one is
//! tried; nothing here ever fails.

use super::filter::{is_excluded_host, plausible_company_url};
use super::scoring::{name_forms, rank};
use super::url_normalize::normalize_url;
use crate::config::LookupConfig;
use crate::engine::{backend_impl, SearchBackendTrait};
use crate::error::LookupError;
use crate::http::{probe_url, Transport};
use crate::types::AcceptPolicy;
use std::collections::HashSet;
use url::Url;

/// Resolve `name` through the search backends in `config.backends`.
pub async fn search_fallback(
    transport: &dyn Transport,
    name: &str,
    config: &LookupConfig,
) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let forms = name_forms(name);

    for backend in &config.backends {
        let found =
            search_backend(transport, backend_impl(*backend), name, &forms, config).await;
        if let Some(url) = found {
            tracing::debug!(backend = %backend, url = %url, "search fallback accepted");
            return Some(url);
        }
        tracing::debug!(backend = %backend, "search backend yielded nothing");
    }
    None
}

/// Run every query of one backend until a ranked link passes its check.
async fn search_backend(
    transport: &dyn Transport,
    backend: &dyn SearchBackendTrait,
    name: &str,
    forms: &[String],
    config: &LookupConfig,
) -> Option<String> {
    let engine = backend.backend_type();
    let mut seen: HashSet<String> = HashSet::new();

    for query in backend.queries(name) {
        let links = match fetch_links(transport, backend, &query, config).await {
            Ok(links) => links,
            Err(err) => {
                tracing::warn!(backend = %engine, error = %err, "search backend failed");
                return None;
            }
        };

        let fresh: Vec<Url> = links
            .iter()
            .filter(|link| seen.insert(normalize_url(link)))
            .filter_map(|link| plausible_company_url(link))
            .take(config.max_links_per_query)
            .collect();
        tracing::debug!(
            backend = %engine,
            links = links.len(),
            plausible = fresh.len(),
            "links filtered"
        );

        for candidate in rank(fresh, forms) {
            tracing::trace!(url = %candidate.url, score = candidate.score, "verifying candidate");
            let Some(final_url) = probe_url(
                transport,
                &candidate.url,
                AcceptPolicy::Permissive,
                config.quick_timeout(),
            )
            .await
            .accepted_url() else {
                continue;
            };
            if redirects_to_excluded(&final_url) {
                tracing::trace!(
                    url = %candidate.url,
                    final_url = %final_url,
                    "redirected to excluded host"
                );
                continue;
            }
            return Some(final_url);
        }
    }
    None
}

/// Fetch one results page and extract its outbound links.
async fn fetch_links(
    transport: &dyn Transport,
    backend: &dyn SearchBackendTrait,
    query: &str,
    config: &LookupConfig,
) -> Result<Vec<String>, LookupError> {
    tracing::trace!(backend = %backend.backend_type(), query, "search query");
    let url = backend.search_url(query)?;
    let response = transport
        .get(&url, &config.accept_language, config.search_timeout())
        .await?;
    if response.status != 200 {
        return Err(LookupError::Http(format!(
            "{} returned HTTP {}",
            backend.backend_type(),
            response.status
        )));
    }
    tracing::trace!(bytes = response.body.len(), "search response received");
    backend.extract_links(&response.body)
}

fn redirects_to_excluded(final_url: &str) -> bool {
    Url::parse(final_url)
        .ok()
        .and_then(|url| url.host_str().map(is_excluded_host))
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use crate::types::SearchBackend;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Serves GETs by URL prefix and HEADs by exact URL.
    #[derive(Default)]
    struct PageTransport {
        pages: Vec<(String, u16, String)>,
        heads: HashMap<String, (u16, String)>,
        calls: Mutex<Vec<String>>,
    }

    impl PageTransport {
        fn page(mut self, prefix: &str, status: u16, body: &str) -> Self {
            self.pages.push((prefix.into(), status, body.into()));
            self
        }

        fn head(mut self, url: &str, status: u16, final_url: &str) -> Self {
            self.heads.insert(url.into(), (status, final_url.into()));
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }

        fn record(&self, entry: String) {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(entry);
            }
        }
    }

    #[async_trait]
    impl Transport for PageTransport {
        async fn head(&self, url: &str, _timeout: Duration) -> Result<HttpResponse, LookupError> {
            self.record(format!("HEAD {url}"));
            self.heads
                .get(url)
                .map(|(status, final_url)| HttpResponse {
                    status: *status,
                    final_url: final_url.clone(),
                    body: String::new(),
                })
                .ok_or_else(|| LookupError::Http("refused".into()))
        }

        async fn get(
            &self,
            url: &str,
            _accept_language: &str,
            _timeout: Duration,
        ) -> Result<HttpResponse, LookupError> {
            self.record(format!("GET {url}"));
            self.pages
                .iter()
                .find(|(prefix, _, _)| url.starts_with(prefix.as_str()))
                .map(|(_, status, body)| HttpResponse {
                    status: *status,
                    final_url: url.to_string(),
                    body: body.clone(),
                })
                .ok_or_else(|| LookupError::Timeout(url.to_string()))
        }
    }

    fn config(backends: Vec<SearchBackend>) -> LookupConfig {
        LookupConfig {
            backends,
            ..Default::default()
        }
    }

    const DDG_PAGE: &str = r#"<html><body>
<a href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fja.wikipedia.org%2Fwiki%2FAcme">Wikipedia</a>
<a href="https://www.news-site.com/article">News</a>
<a href="https://www.acme.co.jp/company/">Acme</a>
</body></html>"#;

    #[tokio::test]
    async fn highest_scoring_link_verified_first() {
        let transport = PageTransport::default()
            .page("https://html.duckduckgo.com/", 200, DDG_PAGE)
            .head("https://www.acme.co.jp/company/", 200, "https://www.acme.co.jp/company/")
            .head("https://www.news-site.com/article", 200, "https://www.news-site.com/article");

        let result =
            search_fallback(&transport, "Acme", &config(vec![SearchBackend::DuckDuckGo])).await;
        assert_eq!(result.as_deref(), Some("https://www.acme.co.jp/company/"));

        let heads: Vec<String> = transport
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("HEAD"))
            .collect();
        assert_eq!(heads, vec!["HEAD https://www.acme.co.jp/company/"]);
    }

    #[tokio::test]
    async fn excluded_links_never_returned() {
        let page = r#"<a href="https://ja.wikipedia.org/wiki/Acme">w</a>
<a href="https://www.facebook.com/acme">f</a>"#;
        let transport = PageTransport::default()
            .page("https://html.duckduckgo.com/", 200, page)
            .head("https://ja.wikipedia.org/wiki/Acme", 200, "https://ja.wikipedia.org/wiki/Acme")
            .head("https://www.facebook.com/acme", 200, "https://www.facebook.com/acme");

        let result =
            search_fallback(&transport, "Acme", &config(vec![SearchBackend::DuckDuckGo])).await;
        assert!(result.is_none());
        assert!(transport.calls().iter().all(|c| !c.starts_with("HEAD")));
    }

    #[tokio::test]
    async fn redirect_into_excluded_host_rejected() {
        let page = r#"<a href="https://acme-shop.com/">shop</a>"#;
        let transport = PageTransport::default()
            .page("https://html.duckduckgo.com/", 200, page)
            .head("https://acme-shop.com/", 301, "https://www.amazon.co.jp/acme");

        let result =
            search_fallback(&transport, "Acme", &config(vec![SearchBackend::DuckDuckGo])).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn failing_backend_falls_through_to_next() {
        let bing_page = r#"<li class="b_algo"><h2><a href="https://acme.com/">Acme</a></h2></li>"#;
        let transport = PageTransport::default()
            .page("https://www.google.com/", 429, "rate limited")
            .page("https://www.bing.com/", 200, bing_page)
            .head("https://acme.com/", 200, "https://acme.com/");

        let result = search_fallback(
            &transport,
            "Acme",
            &config(vec![SearchBackend::Google, SearchBackend::Bing]),
        )
        .await;
        assert_eq!(result.as_deref(), Some("https://acme.com/"));

        let gets: Vec<String> = transport
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("GET"))
            .collect();
        // Google is abandoned after its first failed query.
        assert_eq!(gets.len(), 2);
        assert!(gets[0].starts_with("GET https://www.google.com/search"));
        assert!(gets[1].starts_with("GET https://www.bing.com/search"));
    }

    #[tokio::test]
    async fn navigation_links_do_not_use_up_link_budget() {
        let mut page = String::from("<html><body>");
        for start in (10..=250).step_by(10) {
            page.push_str(&format!(r#"<a href="/search?q=acme&amp;start={start}">{start}</a>"#));
        }
        page.push_str(r#"<a href="/url?q=https://www.acme.co.jp/&amp;sa=U">Acme</a></body></html>"#);
        let transport = PageTransport::default()
            .page("https://www.google.com/", 200, &page)
            .head("https://www.acme.co.jp/", 200, "https://www.acme.co.jp/");

        let result =
            search_fallback(&transport, "Acme", &config(vec![SearchBackend::Google])).await;
        assert_eq!(result.as_deref(), Some("https://www.acme.co.jp/"));
    }

    #[tokio::test]
    async fn link_budget_counts_plausible_links_in_page_order() {
        let page = r#"<a href="https://ja.wikipedia.org/wiki/Acme">w</a>
<a href="https://first-result.com/">1</a>
<a href="https://www.acme.co.jp/">2</a>"#;
        let transport = PageTransport::default()
            .page("https://html.duckduckgo.com/", 200, page)
            .head("https://www.acme.co.jp/", 200, "https://www.acme.co.jp/");
        let config = LookupConfig {
            backends: vec![SearchBackend::DuckDuckGo],
            max_links_per_query: 1,
            ..Default::default()
        };

        let result = search_fallback(&transport, "Acme", &config).await;
        assert_eq!(result.as_deref(), Some("https://www.acme.co.jp/"));

        // First query: only the first plausible link fits the budget. The
        // second query serves the same page; the seen link is skipped.
        let calls = transport.calls();
        assert_eq!(calls.len(), 4);
        assert!(calls[0].starts_with("GET https://html.duckduckgo.com/"));
        assert_eq!(calls[1], "HEAD https://first-result.com/");
        assert!(calls[2].starts_with("GET https://html.duckduckgo.com/"));
        assert_eq!(calls[3], "HEAD https://www.acme.co.jp/");
    }

    #[tokio::test]
    async fn repeated_links_verified_once_per_backend() {
        let page = r#"<a href="https://acme.net/">a</a><a href="https://acme.net">b</a>"#;
        let transport = PageTransport::default().page("https://html.duckduckgo.com/", 200, page);

        let result =
            search_fallback(&transport, "Acme", &config(vec![SearchBackend::DuckDuckGo])).await;
        assert!(result.is_none());

        let heads = transport
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("HEAD"))
            .count();
        assert_eq!(heads, 1);
    }

    #[tokio::test]
    async fn all_backends_exhausted_returns_none() {
        let transport = PageTransport::default();
        let result = search_fallback(&transport, "Nonexistent Co", &LookupConfig::default()).await;
        assert!(result.is_none());
        assert_eq!(transport.calls().len(), SearchBackend::all().len());
    }

    #[tokio::test]
    async fn blank_name_issues_no_requests() {
        let transport = PageTransport::default();
        assert!(search_fallback(&transport, "  ", &LookupConfig::default())
            .await
            .is_none());
        assert!(transport.calls().is_empty());
    }
}
