use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Referrer recorded when a click carries no referrer.
pub const DIRECT_REFERRER: &str = "direct";
/// Source address recorded when the caller's address is not known.
pub const UNKNOWN_SOURCE_IP: &str = "unknown";
/// Location recorded for every click; no geo resolution is performed.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Opaque identifier of a stored short link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkId(Uuid);

impl LinkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LinkId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// One observed redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickRecord {
    pub timestamp: Timestamp,
    pub referrer: String,
    pub source_ip: String,
    pub location: String,
}

impl ClickRecord {
    /// Builds a click, substituting the sentinels for a missing or empty
    /// referrer and source address.
    pub fn new(timestamp: Timestamp, referrer: Option<&str>, source_ip: Option<&str>) -> Self {
        Self {
            timestamp,
            referrer: non_empty_or(referrer, DIRECT_REFERRER),
            source_ip: non_empty_or(source_ip, UNKNOWN_SOURCE_IP),
            location: UNKNOWN_LOCATION.to_string(),
        }
    }

    pub fn view(&self) -> ClickView {
        ClickView {
            timestamp: self.timestamp,
            source: self.referrer.clone(),
            location: self.location.clone(),
        }
    }
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// A point-in-time copy of a stored short link and its click history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLinkEntry {
    pub id: LinkId,
    pub original_url: String,
    pub shortcode: ShortCode,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub clicks: Vec<ClickRecord>,
    pub total_clicks: u64,
}

/// Click projection exposed through statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickView {
    pub timestamp: Timestamp,
    pub source: String,
    pub location: String,
}

/// Statistics for a single short link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStatistics {
    pub short_link: String,
    pub shortcode: ShortCode,
    pub original_url: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub total_clicks: u64,
    pub clicks: Vec<ClickView>,
}

/// Parameters for creating a short link.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateShortUrl {
    /// The URL to shorten.
    pub original_url: String,
    /// Validity in minutes; the store default applies when `None`.
    pub validity_minutes: Option<f64>,
    /// Caller-chosen short code; one is generated when `None`.
    pub custom_shortcode: Option<String>,
}

impl CreateShortUrl {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            ..Self::default()
        }
    }

    pub fn with_validity_minutes(mut self, minutes: f64) -> Self {
        self.validity_minutes = Some(minutes);
        self
    }

    pub fn with_custom_shortcode(mut self, code: impl Into<String>) -> Self {
        self.custom_shortcode = Some(code.into());
        self
    }
}

/// The outcome of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedLink {
    pub short_link: String,
    pub shortcode: ShortCode,
    pub expires_at: Timestamp,
}
