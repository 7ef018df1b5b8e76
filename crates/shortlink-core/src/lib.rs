//! Core types for the shortlink URL shortener.
//!
//! This crate provides the domain model, validation rules, clock
//! abstraction and error taxonomy shared by the store and the HTTP gateway.

pub mod clock;
pub mod error;
pub mod model;
pub mod shortcode;
pub mod target;
pub mod validity;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, StoreError};
pub use model::{
    ClickRecord, ClickView, CreateShortUrl, CreatedLink, LinkId, LinkStatistics, ShortLinkEntry,
};
pub use shortcode::ShortCode;
pub use target::{is_valid_target_url, parse_target_url};
pub use validity::{is_expired, Validity};
