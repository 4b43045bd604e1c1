//! The persistent ChaCha cipher state
//!
//! Sixteen 32-bit words in the fixed 4x4 layout: row 0 the
//! "expand 32-byte k" constants, rows 1-2 the eight key words, row 3 the
//! 64-bit little-endian block counter followed by the 64-bit nonce.
//! Constants, key, and nonce are immutable for the lifetime of a state;
//! only the counter mutates, and only as a side effect of block
//! generation. Counter overflow past 2^64 blocks is the caller's
//! responsibility and is not checked.

use byteorder::{ByteOrder, LittleEndian};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::types::nonce::ChaChaCompatible;
use crate::types::Nonce;
use lanecrypt_common::{EphemeralSecret, SecretBuffer};
use lanecrypt_params::chacha::{CHACHA_KEY_SIZE, CHACHA_SIGMA, CHACHA_STATE_WORDS};

use super::lanes::Row;

/// The 16-word ChaCha cipher state
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ChaChaState {
    words: [u32; CHACHA_STATE_WORDS],
}

impl ChaChaState {
    /// Build a state from a key, a nonce, and an initial block counter
    pub fn new<const N: usize>(
        key: &[u8; CHACHA_KEY_SIZE],
        nonce: &Nonce<N>,
        counter: u64,
    ) -> Self
    where
        Nonce<N>: ChaChaCompatible,
    {
        // Wrap the key so the stack copy is cleansed on return
        let key_buf = SecretBuffer::new(*key);
        Self::from_secret_key(&key_buf, nonce, counter)
    }

    /// Build a state from an already-wrapped key
    pub(crate) fn from_secret_key<const N: usize>(
        key: &SecretBuffer<CHACHA_KEY_SIZE>,
        nonce: &Nonce<N>,
        counter: u64,
    ) -> Self
    where
        Nonce<N>: ChaChaCompatible,
    {
        let mut words = EphemeralSecret::new([0u32; CHACHA_STATE_WORDS]);
        let w = words.as_mut();

        w[0..4].copy_from_slice(&CHACHA_SIGMA);

        // Key (8 words), little-endian
        let key_bytes = key.as_ref();
        for i in 0..8 {
            w[4 + i] = LittleEndian::read_u32(&key_bytes[i * 4..]);
        }

        // Counter (2 words, low then high)
        w[12] = counter as u32;
        w[13] = (counter >> 32) as u32;

        // Nonce (2 words)
        let nonce_bytes = nonce.as_ref();
        w[14] = LittleEndian::read_u32(&nonce_bytes[0..4]);
        w[15] = LittleEndian::read_u32(&nonce_bytes[4..8]);

        Self { words: *words }
    }

    /// Current 64-bit block counter
    pub fn counter(&self) -> u64 {
        u64::from(self.words[12]) | (u64::from(self.words[13]) << 32)
    }

    /// Set the 64-bit block counter
    ///
    /// The next block generated from this state has this index.
    pub fn set_counter(&mut self, counter: u64) {
        self.words[12] = counter as u32;
        self.words[13] = (counter >> 32) as u32;
    }

    /// Advance the counter by `blocks`, wrapping mod 2^64 with the carry
    /// propagating from the low to the high word
    pub(crate) fn advance(&mut self, blocks: u64) {
        self.set_counter(self.counter().wrapping_add(blocks));
    }

    /// The four state rows as lane vectors
    pub(crate) fn rows(&self) -> [Row; 4] {
        let w = &self.words;
        [
            Row([w[0], w[1], w[2], w[3]]),
            Row([w[4], w[5], w[6], w[7]]),
            Row([w[8], w[9], w[10], w[11]]),
            Row([w[12], w[13], w[14], w[15]]),
        ]
    }
}
