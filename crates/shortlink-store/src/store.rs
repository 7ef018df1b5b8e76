use crate::settings::StoreSettings;
use crate::slot::LinkSlot;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::Timestamp;
use shortlink_core::{
    is_valid_target_url, parse_target_url, Clock, ClickRecord, CreateShortUrl, CreatedLink,
    LinkId, LinkStatistics, Result, ShortCode, ShortLinkEntry, StoreError, SystemClock, Validity,
};
use shortlink_generator::{Generator, RandomGenerator};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// In-memory registry of short links and their click logs.
///
/// Two indexes are kept: `by_id` owns the entries and `by_shortcode` maps a
/// code to its entry id. Both are [`DashMap`]s, so lookups on different
/// codes do not contend. A code is claimed by inserting into its vacant
/// `by_shortcode` slot while holding that slot's shard lock, and the entry is
/// placed in `by_id` before the code becomes visible. Readers therefore never
/// see a code without its entry, and two creates can never claim the same
/// code.
///
/// Entries are never removed. Expired entries stay stored but are invisible
/// to lookups, click recording and statistics; [`ShortLinkStore::list_all`]
/// still returns them.
pub struct ShortLinkStore {
    settings: StoreSettings,
    generator: Arc<dyn Generator>,
    clock: Arc<dyn Clock>,
    by_id: DashMap<LinkId, Arc<LinkSlot>>,
    by_shortcode: DashMap<ShortCode, LinkId>,
}

impl ShortLinkStore {
    /// Creates a store that generates random codes and reads the system clock.
    pub fn new(settings: StoreSettings) -> Self {
        Self::with_parts(settings, RandomGenerator::new(), SystemClock)
    }

    /// Creates a store with a custom code generator and clock.
    pub fn with_parts<G, C>(settings: StoreSettings, generator: G, clock: C) -> Self
    where
        G: Generator,
        C: Clock + 'static,
    {
        Self {
            settings,
            generator: Arc::new(generator),
            clock: Arc::new(clock),
            by_id: DashMap::new(),
            by_shortcode: DashMap::new(),
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Returns `true` for absolute URLs with an `http` or `https` scheme.
    pub fn validate_url(candidate: &str) -> bool {
        is_valid_target_url(candidate)
    }

    /// Returns `true` for 3-20 ASCII alphanumeric characters.
    pub fn validate_shortcode(candidate: &str) -> bool {
        ShortCode::is_valid(candidate)
    }

    /// Generates a code that is not currently in use.
    ///
    /// The code is not reserved; [`ShortLinkStore::create_short_url`] claims
    /// generated codes atomically on its own.
    pub fn generate_shortcode(&self) -> Result<ShortCode> {
        self.claim_generated(|code| !self.by_shortcode.contains_key(code))
    }

    /// Creates a short link.
    ///
    /// Validation runs in order (URL, validity, custom short code) and the
    /// first failure is returned. Nothing is stored unless the call succeeds.
    pub fn create_short_url(&self, request: CreateShortUrl) -> Result<CreatedLink> {
        let CreateShortUrl {
            original_url,
            validity_minutes,
            custom_shortcode,
        } = request;

        parse_target_url(&original_url)?;

        let validity = match validity_minutes {
            Some(minutes) => Validity::from_minutes(minutes)?,
            None => self.settings.default_validity(),
        };
        let created_at = self.clock.now();
        let expires_at = validity.expires_at(created_at)?;

        let new_slot =
            |code: ShortCode| LinkSlot::new(original_url.clone(), code, created_at, expires_at);

        let shortcode = match custom_shortcode {
            Some(custom) => {
                let code = ShortCode::new(custom)?;
                if !self.try_insert(new_slot(code.clone())) {
                    debug!(code = %code, "custom short code already taken");
                    return Err(StoreError::ShortCodeCollision(code.to_string()));
                }
                code
            }
            None => self.claim_generated(|code| self.try_insert(new_slot(code.clone())))?,
        };

        info!(
            code = %shortcode,
            url = %original_url,
            expires_at = %expires_at,
            "created short link"
        );

        Ok(CreatedLink {
            short_link: shortcode.to_url(self.settings.base_url()),
            shortcode,
            expires_at,
        })
    }

    /// Returns a snapshot of the entry for `shortcode`.
    ///
    /// Returns `None` if the code is unknown, malformed or expired.
    pub fn get_entry_by_shortcode(&self, shortcode: &str) -> Option<ShortLinkEntry> {
        self.live_slot(shortcode, self.clock.now())
            .map(|slot| slot.snapshot())
    }

    /// Resolves `shortcode` to its original URL and records the click.
    ///
    /// Liveness and the click timestamp come from a single clock reading, so
    /// a resolved link always gets its click. The click log is only touched
    /// to append; its history is never copied.
    pub fn resolve_click(
        &self,
        shortcode: &str,
        referrer: Option<&str>,
        source_ip: Option<&str>,
    ) -> Option<Arc<str>> {
        let now = self.clock.now();
        let slot = self.live_slot(shortcode, now)?;

        slot.record(ClickRecord::new(now, referrer, source_ip));
        trace!(code = shortcode, "click recorded");
        Some(slot.target())
    }

    /// Appends a click to the entry for `shortcode`.
    ///
    /// Best effort: returns `false` instead of failing when the code is
    /// unknown or expired.
    pub fn record_click(
        &self,
        shortcode: &str,
        referrer: Option<&str>,
        source_ip: Option<&str>,
    ) -> bool {
        let now = self.clock.now();
        let Some(slot) = self.live_slot(shortcode, now) else {
            debug!(code = shortcode, "click not recorded");
            return false;
        };

        slot.record(ClickRecord::new(now, referrer, source_ip));
        trace!(code = shortcode, "click recorded");
        true
    }

    /// Returns statistics for a live short link.
    pub fn get_statistics(&self, shortcode: &str) -> Result<LinkStatistics> {
        self.live_slot(shortcode, self.clock.now())
            .map(|slot| slot.statistics(self.settings.base_url()))
            .ok_or_else(|| StoreError::NotFound(shortcode.to_string()))
    }

    /// Returns statistics for every stored entry, expired ones included,
    /// ordered by creation time and then short code.
    pub fn list_all(&self) -> Vec<LinkStatistics> {
        let mut slots: Vec<Arc<LinkSlot>> = self
            .by_id
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        slots.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.shortcode.cmp(&b.shortcode))
        });

        let base_url = self.settings.base_url();
        slots.iter().map(|slot| slot.statistics(base_url)).collect()
    }

    /// Inserts `slot` if its short code is unclaimed.
    fn try_insert(&self, slot: LinkSlot) -> bool {
        match self.by_shortcode.entry(slot.shortcode.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vacant) => {
                let id = slot.id;
                self.by_id.insert(id, Arc::new(slot));
                vacant.insert(id);
                true
            }
        }
    }

    /// Draws codes from the generator until `claim` accepts one.
    fn claim_generated(&self, mut claim: impl FnMut(&ShortCode) -> bool) -> Result<ShortCode> {
        let attempts = self.settings.max_generation_attempts();

        for attempt in 1..=attempts {
            let code = self.generator.generate();
            if claim(&code) {
                return Ok(code);
            }
            trace!(code = %code, attempt, "generated short code collided");
        }

        warn!(attempts, "short code generation exhausted");
        Err(StoreError::GenerationExhausted { attempts })
    }

    fn live_slot(&self, shortcode: &str, now: Timestamp) -> Option<Arc<LinkSlot>> {
        let code = ShortCode::new(shortcode).ok()?;
        let id = *self.by_shortcode.get(&code)?;
        let slot = self.by_id.get(&id).map(|entry| Arc::clone(entry.value()))?;

        if slot.is_expired_at(now) {
            debug!(code = %code, "short link has expired");
            return None;
        }

        Some(slot)
    }
}

impl std::fmt::Debug for ShortLinkStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortLinkStore")
            .field("settings", &self.settings)
            .field("entries", &self.by_id.len())
            .finish_non_exhaustive()
    }
}
