use crate::error::StoreError;
use jiff::{SignedDuration, Timestamp};

/// Validity window used when a caller does not supply one.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// The span, measured from creation, during which a short link resolves.
///
/// Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Validity(SignedDuration);

impl Validity {
    /// Builds a validity window from a (possibly fractional) number of minutes.
    ///
    /// Rejects zero, negative, NaN and infinite values, as well as values too
    /// small to amount to a single nanosecond.
    pub fn from_minutes(minutes: f64) -> Result<Self, StoreError> {
        if !minutes.is_finite() || minutes <= 0.0 {
            return Err(StoreError::InvalidValidity(format!(
                "validity must be a positive number of minutes, got {}",
                minutes
            )));
        }

        let duration = SignedDuration::try_from_secs_f64(minutes * 60.0).map_err(|e| {
            StoreError::InvalidValidity(format!("validity of {} minutes: {}", minutes, e))
        })?;

        Self::from_duration(duration)
    }

    pub fn from_duration(duration: SignedDuration) -> Result<Self, StoreError> {
        if !duration.is_positive() {
            return Err(StoreError::InvalidValidity(format!(
                "validity must be positive, got {}",
                duration
            )));
        }
        Ok(Self(duration))
    }

    pub fn as_duration(&self) -> SignedDuration {
        self.0
    }

    /// Computes the expiry instant for a link created at `created_at`.
    pub fn expires_at(&self, created_at: Timestamp) -> Result<Timestamp, StoreError> {
        created_at.checked_add(self.0).map_err(|e| {
            StoreError::InvalidValidity(format!("expiry is out of range: {}", e))
        })
    }
}

/// Whether a link expiring at `expires_at` has expired as of `now`.
///
/// A link still resolves at exactly `expires_at`.
pub fn is_expired(expires_at: Timestamp, now: Timestamp) -> bool {
    now > expires_at
}

impl Default for Validity {
    fn default() -> Self {
        Self(SignedDuration::from_mins(DEFAULT_VALIDITY_MINUTES))
    }
}
