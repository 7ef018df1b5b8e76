use shortlink_core::Validity;
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_GENERATION_ATTEMPTS: usize = 10;

/// Settings for a [`ShortLinkStore`](crate::ShortLinkStore).
#[derive(Debug, Clone, TypedBuilder)]
pub struct StoreSettings {
    /// Public address short links are served from, e.g. `https://sho.rt`.
    #[builder(setter(into))]
    base_url: String,
    /// Validity applied when a create request does not specify one.
    #[builder(default)]
    default_validity: Validity,
    /// How many generated codes to try before giving up.
    #[builder(default = DEFAULT_MAX_GENERATION_ATTEMPTS)]
    max_generation_attempts: usize,
}

impl StoreSettings {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_validity(&self) -> Validity {
        self.default_validity
    }

    pub fn max_generation_attempts(&self) -> usize {
        self.max_generation_attempts
    }
}
