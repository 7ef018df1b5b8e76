use crate::error::Result;
use crate::model::{CreateUrlRequest, CreateUrlResponse, StatisticsResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let Json(request) = payload?;
    let created = state.store().create_short_url(request.into_params())?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn get_statistics_handler(
    State(state): State<AppState>,
    Path(shortcode): Path<String>,
) -> Result<Json<StatisticsResponse>> {
    let stats = state.store().get_statistics(&shortcode)?;
    debug!(code = %shortcode, total_clicks = stats.total_clicks, "served statistics");

    Ok(Json(stats.into()))
}

pub async fn list_urls_handler(State(state): State<AppState>) -> Json<Vec<StatisticsResponse>> {
    let all = state
        .store()
        .list_all()
        .into_iter()
        .map(StatisticsResponse::from)
        .collect();

    Json(all)
}
