//! Type system for the keystream engine
//!
//! Size-parameterized wrapper types with compile-time guarantees, plus
//! the small traits the cipher surface is written against.

use rand::{CryptoRng, RngCore};

pub mod nonce;
pub(crate) mod sealed;

pub use nonce::Nonce;

/// Trait for types that can be generated from a cryptographic RNG
pub trait RandomGeneration: Sized {
    /// Generate a random instance
    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> crate::error::Result<Self>;
}
