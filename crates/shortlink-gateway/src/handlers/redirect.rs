use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::extract::{ConnectInfo, Path, Request, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use shortlink_core::{parse_target_url, StoreError};
use std::net::SocketAddr;
use tracing::debug;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Redirects to the original URL and records the click.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(shortcode): Path<String>,
    request: Request,
) -> Result<Response> {
    let referrer = header_str(request.headers(), header::REFERER.as_str());
    let source_ip = client_ip(&request);

    let target = state
        .store()
        .resolve_click(&shortcode, referrer, source_ip.as_deref())
        .ok_or_else(|| StoreError::NotFound(shortcode.clone()))?;
    debug!(code = %shortcode, "redirecting");

    let location = location_header(&target)?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}

fn location_header(original_url: &str) -> Result<HeaderValue> {
    if original_url.is_ascii() {
        if let Ok(value) = HeaderValue::from_str(original_url) {
            return Ok(value);
        }
    }

    // Non-ASCII input: fall back to the percent-encoded form.
    let url = parse_target_url(original_url).map_err(|e| AppError::Internal(e.to_string()))?;
    HeaderValue::from_str(url.as_str()).map_err(|e| AppError::Internal(e.to_string()))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// The first `X-Forwarded-For` hop, else the peer address.
fn client_ip(request: &Request) -> Option<String> {
    if let Some(forwarded) = header_str(request.headers(), X_FORWARDED_FOR) {
        if let Some(first) = forwarded.split(',').map(str::trim).find(|s| !s.is_empty()) {
            return Some(first.to_string());
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
}
