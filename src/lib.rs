//! # lanecrypt
//!
//! A pure Rust ChaCha stream cipher family built around a multi-lane
//! vectorized keystream engine.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! lanecrypt = "0.2"
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support
//! - `alloc`: allocator support without the full standard library
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several
//! sub-crates:
//!
//! - [`lanecrypt-chacha`]: the keystream engine and the `ChaCha` cipher
//! - [`lanecrypt-common`]: secure-memory support (zeroizing wrappers)
//! - [`lanecrypt-params`]: algorithm constants

#![cfg_attr(not(feature = "std"), no_std)]

// Core re-exports (always available)
pub use lanecrypt_chacha as chacha;
pub use lanecrypt_common as common;
pub use lanecrypt_params as params;

// Re-export the zeroization crate: callers holding their own key copies
// want the same cleansing guarantees
pub use zeroize;

// Surface the primary cipher types at the crate root
pub use lanecrypt_chacha::{ChaCha, ChaCha12, ChaCha20, ChaCha8};

/// Common imports for lanecrypt users
pub mod prelude {
    pub use lanecrypt_chacha::engine::{generate_keystream_blocks, xor_keystream_blocks};
    pub use lanecrypt_chacha::error::{Error, Result};
    pub use lanecrypt_chacha::stream::StreamCipher;
    pub use lanecrypt_chacha::types::Nonce;
    pub use lanecrypt_chacha::{ChaCha, ChaCha12, ChaCha20, ChaCha8, ChaChaState};
    pub use lanecrypt_params::chacha::{
        CHACHA_BLOCK_SIZE, CHACHA_KEY_SIZE, CHACHA_NONCE_SIZE,
    };
}
