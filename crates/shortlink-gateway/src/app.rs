use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_url_handler, get_statistics_handler, health_handler, list_urls_handler,
    redirect_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/shorturls", post(create_url_handler))
            .route("/shorturls/{shortcode}", get(get_statistics_handler))
            .route("/api/urls", get(list_urls_handler))
            .route("/{shortcode}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
