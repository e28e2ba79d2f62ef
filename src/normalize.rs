//! Company name normalisation.
//!
//! A raw company name is turned into an ordered list of candidate forms,
//! each produced by running a fixed pipeline of declarative [`NameRule`]s
//! over the raw input. The candidate order runs from least to most
//! aggressive cleaning, which in turn fixes the probe order downstream.

/// Latin-script legal-entity markers, matched as whole words
/// case-insensitively (surrounding `.` and `,` are ignored).
pub const CORPORATE_WORDS: &[&str] = &[
    "inc",
    "incorporated",
    "ltd",
    "limited",
    "llc",
    "corp",
    "corporation",
    "co",
    "kk",
    "k.k",
    "gmbh",
    "plc",
];

/// Native-script legal-entity markers, removed wherever they occur.
pub const CORPORATE_MARKERS: &[&str] = &[
    "株式会社",
    "有限会社",
    "合同会社",
    "合資会社",
    "合名会社",
    "(株)",
    "（株）",
    "㈱",
];

/// Characters dropped entirely by the most aggressive candidate, in
/// addition to whitespace.
pub const SEPARATOR_CHARS: &[char] = &['.', ',', '-', '_'];

/// One step of a normalisation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    /// Trim leading and trailing whitespace.
    Trim,
    /// Fold to lower case.
    Lowercase,
    /// Collapse runs of whitespace into a single space.
    CollapseWhitespace,
    /// Keep only alphanumeric and whitespace characters.
    KeepAlphanumeric,
    /// Remove [`CORPORATE_WORDS`] and [`CORPORATE_MARKERS`].
    StripCorporateTokens,
    /// Remove whitespace and every character in the given set.
    RemoveSeparators(&'static [char]),
}

impl NameRule {
    /// Apply this rule to `input`.
    pub fn apply(&self, input: &str) -> String {
        match self {
            Self::Trim => input.trim().to_string(),
            Self::Lowercase => input.to_lowercase(),
            Self::CollapseWhitespace => input.split_whitespace().collect::<Vec<_>>().join(" "),
            Self::KeepAlphanumeric => input
                .chars()
                .filter(|c| c.is_alphanumeric() || c.is_whitespace())
                .collect(),
            Self::StripCorporateTokens => strip_corporate_tokens(input),
            Self::RemoveSeparators(chars) => input
                .chars()
                .filter(|c| !c.is_whitespace() && !chars.contains(c))
                .collect(),
        }
    }
}

/// The rule pipelines, one per candidate, in output order.
pub const CANDIDATE_PIPELINES: &[&[NameRule]] = &[
    &[NameRule::Trim],
    &[
        NameRule::KeepAlphanumeric,
        NameRule::Lowercase,
        NameRule::CollapseWhitespace,
    ],
    &[
        NameRule::StripCorporateTokens,
        NameRule::Lowercase,
        NameRule::CollapseWhitespace,
    ],
    &[
        NameRule::RemoveSeparators(SEPARATOR_CHARS),
        NameRule::Lowercase,
    ],
];

/// Run a single pipeline over `raw`.
pub fn apply_rules(raw: &str, rules: &[NameRule]) -> String {
    rules
        .iter()
        .fold(raw.to_string(), |acc, rule| rule.apply(&acc))
}

/// Normalise a raw company name into ordered candidate forms.
///
/// Total: never panics and never returns an empty vector. Blank input
/// yields a single empty candidate. Candidates are not deduplicated.
///
/// # Examples
///
/// ```
/// use company_lookup::normalize::normalize;
///
/// let candidates = normalize("Acme Robotics, Inc.");
/// assert_eq!(candidates[0], "Acme Robotics, Inc.");
/// assert_eq!(candidates[1], "acme robotics inc");
/// assert_eq!(candidates[2], "acme robotics");
/// assert_eq!(candidates[3], "acmeroboticsinc");
/// ```
pub fn normalize(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return vec![String::new()];
    }
    CANDIDATE_PIPELINES
        .iter()
        .map(|rules| apply_rules(raw, rules))
        .collect()
}

/// Returns `true` if `word` is a Latin-script legal-entity marker.
pub fn is_corporate_word(word: &str) -> bool {
    let bare = word.trim_matches(|c: char| c == '.' || c == ',');
    let lower = bare.to_lowercase();
    CORPORATE_WORDS.contains(&lower.as_str())
}

fn strip_corporate_tokens(input: &str) -> String {
    let mut text = input.to_string();
    for marker in CORPORATE_MARKERS {
        text = text.replace(marker, " ");
    }
    // "Co.,Ltd." arrives as one whitespace token; split on commas too.
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|word| !word.is_empty() && !is_corporate_word(word))
        .collect::<Vec<_>>()
        .join(" ")
}
