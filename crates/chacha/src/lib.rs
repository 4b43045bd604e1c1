//! Multi-lane vectorized ChaCha keystream engine
//!
//! This crate implements the ChaCha stream cipher family around a single
//! keystream engine that is generic over the number of blocks processed
//! per iteration. The 20-round ARX permutation is expressed over a
//! portable four-lane word vector, so the same round function serves the
//! wide path (several blocks in flight, counters staggered per lane) and
//! the width-1 serial tail.
//!
//! # Security Features
//!
//! - All secret-derived scratch (working registers, keystream buffers)
//!   is zeroized before the engine returns
//! - Long-lived secrets (the cipher state, the stream wrapper's buffer)
//!   zeroize on drop
//! - Buffer sizes are checked; length mismatches are reported as errors
//!   rather than being the caller's undefined behavior

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Type system
pub mod types;
pub use types::{Nonce, RandomGeneration};

// Stream cipher implementations
pub mod stream;
pub use stream::chacha::engine;
pub use stream::chacha::{ChaCha, ChaCha12, ChaCha20, ChaCha8, ChaChaState};
pub use stream::StreamCipher;

// Algorithm compatibility traits
pub use types::nonce::ChaChaCompatible;
