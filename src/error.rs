//! Error types for the company-lookup crate.
//!
//! Resolution itself never fails: every network problem is contained at the
//! probe or search backend that hit it. These errors surface only from the
//! transport layer (where they are immediately turned into a rejected
//! candidate) and from configuration validation.

/// Errors that can occur while looking up a company's site or logo.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// An HTTP request failed (DNS, connection, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(String),

    /// An HTTP request did not complete within its timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// A search results page could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid lookup configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for company-lookup results.
pub type Result<T> = std::result::Result<T, LookupError>;
