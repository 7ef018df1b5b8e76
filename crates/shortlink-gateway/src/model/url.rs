use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shortlink_core::{ClickView, CreateShortUrl, CreatedLink, LinkStatistics};

#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    #[serde(default)]
    pub url: String,
    /// Validity in minutes. Kept as raw JSON so a non-numeric value can be
    /// reported as an invalid validity rather than a malformed body.
    #[serde(default)]
    pub validity: Option<Value>,
    #[serde(default)]
    pub shortcode: Option<String>,
}

impl CreateUrlRequest {
    pub fn into_params(self) -> CreateShortUrl {
        // NaN is rejected by the store as an invalid validity, after the URL
        // has been checked.
        let validity_minutes = match self.validity {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.as_f64().unwrap_or(f64::NAN)),
        };

        CreateShortUrl {
            original_url: self.url,
            validity_minutes,
            custom_shortcode: self.shortcode,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlResponse {
    pub short_link: String,
    pub expiry: Timestamp,
}

impl From<CreatedLink> for CreateUrlResponse {
    fn from(created: CreatedLink) -> Self {
        Self {
            short_link: created.short_link,
            expiry: created.expires_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub short_link: String,
    #[serde(rename = "originalURL")]
    pub original_url: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub total_clicks: u64,
    pub clicks: Vec<ClickResponse>,
}

impl From<LinkStatistics> for StatisticsResponse {
    fn from(stats: LinkStatistics) -> Self {
        Self {
            short_link: stats.short_link,
            original_url: stats.original_url,
            created_at: stats.created_at,
            expires_at: stats.expires_at,
            total_clicks: stats.total_clicks,
            clicks: stats.clicks.into_iter().map(ClickResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClickResponse {
    pub timestamp: Timestamp,
    pub source: String,
    pub location: String,
}

impl From<ClickView> for ClickResponse {
    fn from(click: ClickView) -> Self {
        Self {
            timestamp: click.timestamp,
            source: click.source,
            location: click.location,
        }
    }
}
