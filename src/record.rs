//! Company records and activity entries exchanged with the host
//! application's record store.
//!
//! The store itself (and how it persists) belongs to the host. This module
//! only defines the shapes it stores and fills a record from a
//! [`Resolver`].

use crate::http::Transport;
use crate::resolver::Resolver;
use crate::types::Resolution;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a company sits in the contact pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    /// Identified, not yet approached.
    #[default]
    Lead,
    /// First contact made.
    Contacted,
    /// A meeting is scheduled or has taken place.
    Meeting,
    /// Terms under discussion.
    Negotiating,
    /// Agreement reached.
    Partnered,
    /// Turned down, by either side.
    Declined,
}

impl PipelineStatus {
    /// Stable lower-case label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Contacted => "contacted",
            Self::Meeting => "meeting",
            Self::Negotiating => "negotiating",
            Self::Partnered => "partnered",
            Self::Declined => "declined",
        }
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One tracked company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Company name as entered by the user.
    pub name: String,
    /// Official website, if known.
    #[serde(default)]
    pub url: Option<String>,
    /// Contact address, if known.
    #[serde(default)]
    pub email: Option<String>,
    /// Position in the contact pipeline.
    #[serde(default)]
    pub status: PipelineStatus,
    /// Free-text overview and notes.
    #[serde(default)]
    pub overview: String,
    /// Logo image URL, if known.
    #[serde(default)]
    pub logo_url: Option<String>,
    /// When the record was first created.
    pub created_at: DateTime<Utc>,
    /// When any field last changed.
    pub updated_at: DateTime<Utc>,
}

impl CompanyRecord {
    /// A fresh lead with nothing but a name.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            url: None,
            email: None,
            status: PipelineStatus::default(),
            overview: String::new(),
            logo_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// An append-only activity log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
    /// Short action name, e.g. `"enrich"`.
    pub action: String,
    /// Action-specific details.
    pub payload: serde_json::Value,
}

impl ActivityEntry {
    /// An entry for `action` stamped with the current time.
    pub fn new(action: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            timestamp: Utc::now(),
            action: action.into(),
            payload,
        }
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().is_none_or(|value| value.trim().is_empty())
}

impl<T: Transport> Resolver<T> {
    /// Fill in a record's missing website and logo.
    ///
    /// Fields that already hold a value are left alone and not looked up.
    /// `updated_at` moves only when a field changes. The returned
    /// `"enrich"` entry records what was filled, for the host's activity
    /// log.
    pub async fn enrich_record(&self, record: &mut CompanyRecord) -> ActivityEntry {
        let mut filled_url: Option<String> = None;
        let mut filled_logo: Option<String> = None;

        if is_blank(&record.url) {
            if let Resolution::Resolved(url) = self.resolve_company_url(&record.name).await {
                record.url = Some(url.clone());
                filled_url = Some(url);
            }
        }
        if is_blank(&record.logo_url) {
            if let Resolution::Resolved(logo) = self.resolve_logo(&record.name).await {
                record.logo_url = Some(logo.clone());
                filled_logo = Some(logo);
            }
        }

        if filled_url.is_some() || filled_logo.is_some() {
            record.updated_at = Utc::now();
        }
        tracing::debug!(
            name = %record.name,
            url_filled = filled_url.is_some(),
            logo_filled = filled_logo.is_some(),
            "record enriched"
        );

        ActivityEntry::new(
            "enrich",
            serde_json::json!({
                "name": record.name,
                "url": filled_url,
                "logo_url": filled_logo,
            }),
        )
    }
}
