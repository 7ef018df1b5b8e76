use jiff::Timestamp;
use parking_lot::Mutex;
use shortlink_core::{is_expired, ClickRecord, LinkId, LinkStatistics, ShortCode, ShortLinkEntry};
use std::sync::Arc;

/// Stored state for one short link.
///
/// Everything except the click log is fixed at creation and readable
/// without locking. The log and its counter live behind a single mutex so
/// they are always updated and read together.
#[derive(Debug)]
pub(crate) struct LinkSlot {
    pub(crate) id: LinkId,
    pub(crate) original_url: Arc<str>,
    pub(crate) shortcode: ShortCode,
    pub(crate) created_at: Timestamp,
    pub(crate) expires_at: Timestamp,
    log: Mutex<ClickLog>,
}

#[derive(Debug, Default)]
struct ClickLog {
    records: Vec<ClickRecord>,
    total: u64,
}

impl LinkSlot {
    pub(crate) fn new(
        original_url: String,
        shortcode: ShortCode,
        created_at: Timestamp,
        expires_at: Timestamp,
    ) -> Self {
        Self {
            id: LinkId::new(),
            original_url: Arc::from(original_url),
            shortcode,
            created_at,
            expires_at,
            log: Mutex::new(ClickLog::default()),
        }
    }

    pub(crate) fn is_expired_at(&self, now: Timestamp) -> bool {
        is_expired(self.expires_at, now)
    }

    /// The redirect target. Does not touch the click log.
    pub(crate) fn target(&self) -> Arc<str> {
        Arc::clone(&self.original_url)
    }

    pub(crate) fn record(&self, click: ClickRecord) {
        let mut log = self.log.lock();
        log.records.push(click);
        log.total += 1;
        debug_assert_eq!(log.total, log.records.len() as u64);
    }

    pub(crate) fn snapshot(&self) -> ShortLinkEntry {
        let log = self.log.lock();
        ShortLinkEntry {
            id: self.id,
            original_url: self.original_url.to_string(),
            shortcode: self.shortcode.clone(),
            created_at: self.created_at,
            expires_at: self.expires_at,
            clicks: log.records.clone(),
            total_clicks: log.total,
        }
    }

    pub(crate) fn statistics(&self, base_url: &str) -> LinkStatistics {
        let log = self.log.lock();
        LinkStatistics {
            short_link: self.shortcode.to_url(base_url),
            shortcode: self.shortcode.clone(),
            original_url: self.original_url.to_string(),
            created_at: self.created_at,
            expires_at: self.expires_at,
            total_clicks: log.total,
            clicks: log.records.iter().map(ClickRecord::view).collect(),
        }
    }
}
