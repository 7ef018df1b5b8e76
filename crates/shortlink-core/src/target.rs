use crate::error::StoreError;
use url::Url;

const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// Parses `candidate` as an absolute URL and checks that its scheme is
/// `http` or `https`.
///
/// No network resolution is performed.
pub fn parse_target_url(candidate: &str) -> Result<Url, StoreError> {
    if candidate.is_empty() {
        return Err(StoreError::InvalidUrl("URL cannot be empty".to_string()));
    }

    let url = Url::parse(candidate)
        .map_err(|e| StoreError::InvalidUrl(format!("{}: {}", e, candidate)))?;

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(StoreError::InvalidUrl(format!(
            "URL scheme must be http or https: {}",
            url.scheme()
        )));
    }

    Ok(url)
}

/// Returns `true` if `candidate` is an absolute http(s) URL.
pub fn is_valid_target_url(candidate: &str) -> bool {
    parse_target_url(candidate).is_ok()
}
