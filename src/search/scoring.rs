//! Plausibility scoring for candidate company URLs.
//!
//! Integer score, higher is more likely the official site:
//!
//! | signal | points |
//! |---|---|
//! | a normalised company name is a substring of the URL | +10 |
//! | host ends in `.co.jp` | +5 |
//! | host ends in another `.jp` | +3 |
//! | host ends in `.com` | +1 |
//! | path has an about/company/corporate-style segment | +2 |
//! | URL contains an exclusion term | −10 |

use super::filter::EXCLUDED_HOST_TERMS;
use crate::normalize::normalize;
use url::Url;

/// Points for the company name appearing in the URL.
pub const NAME_MATCH_POINTS: i32 = 10;

/// Path segments typical of a company's own "about us" pages.
const CORPORATE_PATH_TERMS: &[&str] = &[
    "about",
    "company",
    "corporate",
    "profile",
    "overview",
    "outline",
    "gaiyo",
];

/// A candidate URL with its plausibility score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredUrl {
    /// The candidate URL.
    pub url: String,
    /// Plausibility score (higher is better).
    pub score: i32,
}

/// Name forms matched against URLs: the normalised candidates with
/// whitespace removed, excluding the raw (untouched) form.
pub fn name_forms(name: &str) -> Vec<String> {
    let mut forms: Vec<String> = Vec::new();
    for candidate in normalize(name).into_iter().skip(1) {
        let compact: String = candidate.split_whitespace().collect();
        if !compact.is_empty() && !forms.contains(&compact) {
            forms.push(compact);
        }
    }
    forms
}

/// Score a single URL against the company's name forms.
pub fn score_url(url: &Url, name_forms: &[String]) -> i32 {
    let full = url.as_str().to_lowercase();
    let host = url.host_str().unwrap_or_default().to_lowercase();
    let path = url.path().to_lowercase();

    let mut score = 0;
    if name_forms.iter().any(|form| full.contains(form.as_str())) {
        score += NAME_MATCH_POINTS;
    }
    if host.ends_with(".co.jp") {
        score += 5;
    } else if host.ends_with(".jp") {
        score += 3;
    } else if host.ends_with(".com") {
        score += 1;
    }
    if CORPORATE_PATH_TERMS.iter().any(|term| path.contains(term)) {
        score += 2;
    }
    if EXCLUDED_HOST_TERMS.iter().any(|term| full.contains(term)) {
        score -= 10;
    }
    score
}

/// Score `urls` and sort them by descending score.
///
/// The sort is stable: equal scores keep their page order.
pub fn rank(urls: Vec<Url>, name_forms: &[String]) -> Vec<ScoredUrl> {
    let mut scored: Vec<ScoredUrl> = urls
        .into_iter()
        .map(|url| ScoredUrl {
            score: score_url(&url, name_forms),
            url: url.into(),
        })
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}
