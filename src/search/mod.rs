//! Search-engine fallback: link filtering, scoring, and the backend cascade.
//!
//! Used when no guessed domain answers directly. Results pages from the
//! configured backends are scraped for outbound links, which are
//! canonicalised, filtered for company-site plausibility, ranked by score,
//! and verified one at a time.

pub mod fallback;
pub mod filter;
pub mod scoring;
pub mod url_normalize;

pub use fallback::search_fallback;
