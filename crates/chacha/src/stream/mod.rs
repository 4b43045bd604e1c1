//! Stream cipher implementations
//!
//! This module provides the ChaCha family of stream ciphers, built on a
//! multi-lane vectorized keystream engine.
//!
//! # Security Considerations
//!
//! Stream ciphers require unique nonces for each encryption operation
//! with the same key. Reusing a nonce with the same key completely
//! breaks the security of the cipher.

/// ChaCha family of stream cipher implementations
pub mod chacha;

// Re-export commonly used types
pub use chacha::{ChaCha, ChaCha12, ChaCha20, ChaCha8, ChaChaState};

use crate::error::Result;
use lanecrypt_params::chacha::{CHACHA_BLOCK_SIZE, CHACHA_KEY_SIZE, CHACHA_NONCE_SIZE};

/// Common trait for stream cipher implementations
pub trait StreamCipher {
    /// The key size in bytes
    const KEY_SIZE: usize;

    /// The nonce size in bytes
    const NONCE_SIZE: usize;

    /// The internal block size in bytes
    const BLOCK_SIZE: usize;

    /// Process data in place (encrypts for encryption, decrypts for decryption)
    fn process(&mut self, data: &mut [u8]) -> Result<()>;

    /// Encrypt data in place
    fn encrypt(&mut self, data: &mut [u8]) -> Result<()> {
        self.process(data)
    }

    /// Decrypt data in place
    fn decrypt(&mut self, data: &mut [u8]) -> Result<()> {
        self.process(data)
    }

    /// Generate keystream directly into an output buffer
    fn keystream(&mut self, output: &mut [u8]) -> Result<()>;

    /// Seek so that the next generated block has the given index
    fn seek(&mut self, block: u64) -> Result<()>;
}

// Implement StreamCipher for the whole ChaCha family
impl<const R: usize> StreamCipher for ChaCha<R> {
    const KEY_SIZE: usize = CHACHA_KEY_SIZE;
    const NONCE_SIZE: usize = CHACHA_NONCE_SIZE;
    const BLOCK_SIZE: usize = CHACHA_BLOCK_SIZE;

    fn process(&mut self, data: &mut [u8]) -> Result<()> {
        self.process(data);
        Ok(())
    }

    fn keystream(&mut self, output: &mut [u8]) -> Result<()> {
        self.keystream(output);
        Ok(())
    }

    fn seek(&mut self, block: u64) -> Result<()> {
        self.seek(block);
        Ok(())
    }
}
