//! URL canonicalisation for scraped result links.
//!
//! Search pages repeat the same site many times (title link, display URL,
//! sitelinks, tracked variants). Canonicalising lets the fallback stage
//! verify each distinct page once.

use url::Url;

/// Tracking query parameters that are stripped during normalisation.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "yclid",
    "msclkid",
    "ref",
];

/// Normalise a URL for duplicate detection.
///
/// 1. Lowercase scheme and host (path is preserved as-is).
/// 2. Remove default ports.
/// 3. Strip tracking parameters and sort the rest by key.
/// 4. Remove the trailing slash (unless the path is exactly `"/"`).
/// 5. Remove the fragment.
///
/// If the input cannot be parsed as a valid URL, it is returned unchanged.
///
/// # Examples
///
/// ```
/// use company_lookup::search::url_normalize::normalize_url;
///
/// let a = normalize_url("https://WWW.Acme.co.jp/company/?utm_source=x#top");
/// let b = normalize_url("https://www.acme.co.jp/company");
/// assert_eq!(a, b);
/// ```
pub fn normalize_url(raw: &str) -> String {
    let Ok(mut parsed) = Url::parse(raw) else {
        return raw.to_string();
    };

    parsed.set_fragment(None);

    if matches!(
        (parsed.scheme(), parsed.port()),
        ("http", Some(80)) | ("https", Some(443))
    ) {
        let _ = parsed.set_port(None);
    }

    let mut params: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !TRACKING_PARAMS.contains(&key.to_lowercase().as_str()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    params.sort();

    if params.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(params);
    }

    let path = parsed.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        parsed.set_path(&path[..path.len() - 1]);
    }

    // Url::parse already lowercases scheme and host.
    parsed.to_string()
}
