//! ChaCha stream cipher family
//!
//! The implementation is split into four layers, leaf to root:
//!
//! - `lanes` (crate-internal): the portable four-lane row vector and the
//!   per-block working register set carrying the quarter-round and
//!   double-round ARX permutation
//! - [`state`]: the persistent 16-word cipher state whose 64-bit counter
//!   is the only mutable field
//! - [`engine`]: the width-generic keystream engine; groups of
//!   [`CHACHA_LANES`](lanecrypt_params::chacha::CHACHA_LANES) blocks run
//!   in lockstep, a width-1 instantiation finishes the tail
//! - the [`ChaCha`] wrapper: byte-granular streaming with partial-block
//!   buffering across calls

mod cipher;
mod lanes;

pub mod engine;
pub mod state;

// Re-export for convenience
pub use cipher::{ChaCha, ChaCha12, ChaCha20, ChaCha8};
pub use state::ChaChaState;
