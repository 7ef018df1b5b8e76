pub mod random;

pub use random::RandomGenerator;

use shortlink_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage;
/// the store is responsible for retrying when a generated code is taken.
pub trait Generator: Send + Sync + 'static {
    /// Produces a candidate short code.
    fn generate(&self) -> ShortCode;
}
