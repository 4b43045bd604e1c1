//! Streaming ChaCha cipher over the keystream engine
//!
//! Byte-granular encryption and decryption with partial-block buffering:
//! whole blocks go through the wide engine, and the unused tail of a
//! partially consumed keystream block is kept for the next call.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::types::nonce::ChaChaCompatible;
use crate::types::Nonce;
use lanecrypt_common::SecretBuffer;
use lanecrypt_params::chacha::{
    CHACHA12_ROUNDS, CHACHA20_ROUNDS, CHACHA8_ROUNDS, CHACHA_BLOCK_SIZE, CHACHA_KEY_SIZE,
};

use super::engine;
use super::state::ChaChaState;

/// ChaCha stream cipher with parametrized number of rounds
///
/// `R` is the total round count and must be even; [`ChaCha20`] is the
/// interoperable variant. The counter reflects blocks already generated,
/// including a block consumed only partially.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ChaCha<const R: usize> {
    /// The cipher state; the counter is the only field that mutates
    state: ChaChaState,
    /// Keystream left over from the last partial block
    buffer: [u8; CHACHA_BLOCK_SIZE],
    /// Read position in `buffer`; `CHACHA_BLOCK_SIZE` when empty
    position: usize,
}

/// ChaCha with 20 rounds, the common interoperable variant
pub type ChaCha20 = ChaCha<CHACHA20_ROUNDS>;

/// ChaCha with 12 rounds
pub type ChaCha12 = ChaCha<CHACHA12_ROUNDS>;

/// ChaCha with 8 rounds
pub type ChaCha8 = ChaCha<CHACHA8_ROUNDS>;

impl<const R: usize> ChaCha<R> {
    /// Create a new cipher instance with the given key and nonce
    ///
    /// The block counter starts at 0.
    pub fn new<const N: usize>(key: &[u8; CHACHA_KEY_SIZE], nonce: &Nonce<N>) -> Self
    where
        Nonce<N>: ChaChaCompatible,
    {
        Self::with_counter(key, nonce, 0)
    }

    /// Create a new cipher instance with an explicit initial block
    /// counter, as some protocols require
    pub fn with_counter<const N: usize>(
        key: &[u8; CHACHA_KEY_SIZE],
        nonce: &Nonce<N>,
        counter: u64,
    ) -> Self
    where
        Nonce<N>: ChaChaCompatible,
    {
        // Wrap the key for secure handling during state setup
        let key_buf = SecretBuffer::new(*key);
        Self {
            state: ChaChaState::from_secret_key(&key_buf, nonce, counter),
            buffer: [0u8; CHACHA_BLOCK_SIZE],
            position: CHACHA_BLOCK_SIZE,
        }
    }

    /// Current 64-bit block counter
    pub fn counter(&self) -> u64 {
        self.state.counter()
    }

    /// Seek so that the next generated keystream block has index `block`
    ///
    /// Discards any keystream buffered from a previous partial block.
    pub fn seek(&mut self, block: u64) {
        self.state.set_counter(block);
        self.position = CHACHA_BLOCK_SIZE;
        self.buffer.zeroize();
    }

    /// Encrypt or decrypt `data` in place
    ///
    /// May be called repeatedly with chunks of a stream; keystream left
    /// over from a previous partial block is consumed first.
    pub fn process(&mut self, data: &mut [u8]) {
        if data.is_empty() {
            return;
        }
        let mut offset = 0;

        // Drain keystream buffered by a previous partial block
        if self.position < CHACHA_BLOCK_SIZE {
            let take = (CHACHA_BLOCK_SIZE - self.position).min(data.len());
            for (byte, ks) in data[..take]
                .iter_mut()
                .zip(&self.buffer[self.position..self.position + take])
            {
                *byte ^= ks;
            }
            self.position += take;
            offset = take;
        }

        // Whole blocks through the wide engine
        let full = (data.len() - offset) / CHACHA_BLOCK_SIZE * CHACHA_BLOCK_SIZE;
        if full > 0 {
            engine::xor_blocks::<R>(&mut self.state, &mut data[offset..offset + full]);
            offset += full;
        }

        // Trailing partial block: generate one block, keep the unused tail
        if offset < data.len() {
            engine::fill_blocks::<R>(&mut self.state, &mut self.buffer);
            let rest = data.len() - offset;
            for (byte, ks) in data[offset..].iter_mut().zip(&self.buffer[..rest]) {
                *byte ^= ks;
            }
            self.position = rest;
        }
    }

    /// Encrypt data in place
    pub fn encrypt(&mut self, data: &mut [u8]) {
        self.process(data);
    }

    /// Decrypt data in place
    pub fn decrypt(&mut self, data: &mut [u8]) {
        self.process(data);
    }

    /// Fill `output` with raw keystream
    ///
    /// Starts from a block boundary: keystream buffered from a previous
    /// partial block is discarded first.
    pub fn keystream(&mut self, output: &mut [u8]) {
        self.position = CHACHA_BLOCK_SIZE;
        self.buffer.zeroize();

        let full = output.len() / CHACHA_BLOCK_SIZE * CHACHA_BLOCK_SIZE;
        engine::fill_blocks::<R>(&mut self.state, &mut output[..full]);

        if full < output.len() {
            engine::fill_blocks::<R>(&mut self.state, &mut self.buffer);
            let rest = output.len() - full;
            output[full..].copy_from_slice(&self.buffer[..rest]);
            self.position = rest;
        }
    }
}
