//! HTTP gateway for the shortlink store.
//!
//! Translates REST requests into [`shortlink_store::ShortLinkStore`] calls
//! and store errors into HTTP status codes.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::AppError;
pub use state::AppState;
