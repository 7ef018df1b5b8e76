//! In-memory short link store.
//!
//! This crate provides [`ShortLinkStore`], which owns every short link and
//! its click log, generates collision-free codes, and enforces expiry. Core
//! types are re-exported from `shortlink_core`.

mod settings;
mod slot;
mod store;

pub use settings::{StoreSettings, DEFAULT_MAX_GENERATION_ATTEMPTS};
pub use store::ShortLinkStore;

pub use shortlink_core::{
    ClickRecord, ClickView, CreateShortUrl, CreatedLink, LinkStatistics, ShortCode,
    ShortLinkEntry, StoreError,
};
