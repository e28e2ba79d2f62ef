//! Domain candidate generation.
//!
//! Expands normalised company names into ordered host guesses. The order
//! is the probe order: plain suffixes in declaration order first, then
//! decorated forms, for each name candidate in turn.

use crate::normalize::{self, is_corporate_word};

/// Top-level suffixes tried for every name candidate, in priority order.
pub const DOMAIN_SUFFIXES: &[&str] = &[".com", ".co.jp", ".jp", ".net", ".org", ".info", ".biz"];

/// Suffixes used for the name-part combinations.
const NAME_PART_SUFFIXES: &[&str] = &[".com", ".co.jp", ".jp"];

/// Decorated forms tried after the plain suffixes.
fn decorated(name: &str) -> [String; 3] {
    [
        format!("{name}-corp.com"),
        format!("{name}corp.com"),
        format!("www.{name}.com"),
    ]
}

/// Expand name candidates into ordered domain candidates.
///
/// Outer order follows `candidates`; inner order is [`DOMAIN_SUFFIXES`]
/// followed by the decorated forms. Empty candidates contribute nothing.
///
/// # Examples
///
/// ```
/// use company_lookup::domains::generate;
///
/// let domains = generate(&["acme".to_string()]);
/// assert_eq!(&domains[..3], &["acme.com", "acme.co.jp", "acme.jp"]);
/// ```
pub fn generate(candidates: &[String]) -> Vec<String> {
    let mut domains = Vec::with_capacity(candidates.len() * (DOMAIN_SUFFIXES.len() + 3));
    for candidate in candidates.iter().filter(|c| !c.is_empty()) {
        domains.extend(
            DOMAIN_SUFFIXES
                .iter()
                .map(|suffix| format!("{candidate}{suffix}")),
        );
        domains.extend(decorated(candidate));
    }
    domains
}

/// Lower-cased alphanumeric tokens of `raw`, legal-entity markers dropped.
fn name_tokens(raw: &str) -> Vec<String> {
    let stripped = normalize::apply_rules(raw, &[normalize::NameRule::StripCorporateTokens]);
    stripped
        .split_whitespace()
        .filter(|word| !is_corporate_word(word))
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

/// Extra guesses built from whitespace-delimited name parts.
///
/// With at least two tokens, `first+second` and `first+last` are each
/// combined with `.com`, `.co.jp` and `.jp`. Fewer tokens yield nothing.
pub fn name_part_domains(raw: &str) -> Vec<String> {
    let tokens = name_tokens(raw);
    let (Some(first), Some(second), Some(last)) = (tokens.first(), tokens.get(1), tokens.last())
    else {
        return Vec::new();
    };

    let mut combos = vec![format!("{first}{second}")];
    let first_last = format!("{first}{last}");
    if !combos.contains(&first_last) {
        combos.push(first_last);
    }

    combos
        .iter()
        .flat_map(|combo| {
            NAME_PART_SUFFIXES
                .iter()
                .map(move |suffix| format!("{combo}{suffix}"))
        })
        .collect()
}

/// Last-resort guesses from the fully stripped name.
///
/// First 10 characters for `.com`, first 5 for `.co.jp`, and the whole
/// stripped name for `.net` and `.org`.
pub fn truncated_domains(raw: &str) -> Vec<String> {
    let stripped: String = normalize::normalize(raw)
        .last()
        .map(|most_aggressive| {
            most_aggressive
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect()
        })
        .unwrap_or_default();
    if stripped.is_empty() {
        return Vec::new();
    }

    let first_ten: String = stripped.chars().take(10).collect();
    let first_five: String = stripped.chars().take(5).collect();
    vec![
        format!("{first_ten}.com"),
        format!("{first_five}.co.jp"),
        format!("{stripped}.net"),
        format!("{stripped}.org"),
    ]
}
