use crate::Generator;
use rand::Rng;
use shortlink_core::shortcode::{MAX_LENGTH, MIN_LENGTH};
use shortlink_core::ShortCode;
use typed_builder::TypedBuilder;

/// The base58 alphabet: alphanumerics without `0`, `O`, `I` and `l`.
pub const ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

pub const DEFAULT_LENGTH: usize = 8;

/// Generates random short codes from an unambiguous alphabet.
///
/// The length is clamped to the range accepted by [`ShortCode`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGenerator {
    #[builder(default = DEFAULT_LENGTH)]
    length: usize,
}

impl RandomGenerator {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn length(&self) -> usize {
        self.length.clamp(MIN_LENGTH, MAX_LENGTH)
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> ShortCode {
        let mut rng = rand::rng();
        let code: String = (0..self.length())
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}
