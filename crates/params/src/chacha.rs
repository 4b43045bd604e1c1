//! Constants for the ChaCha stream cipher family

/// ChaCha key size in bytes
pub const CHACHA_KEY_SIZE: usize = 32;

/// ChaCha nonce size in bytes (64-bit nonce layout)
pub const CHACHA_NONCE_SIZE: usize = 8;

/// ChaCha block size in bytes
pub const CHACHA_BLOCK_SIZE: usize = 64;

/// Number of 32-bit words in the ChaCha state matrix
pub const CHACHA_STATE_WORDS: usize = 16;

/// The "expand 32-byte k" state constants, little-endian
pub const CHACHA_SIGMA: [u32; 4] = [0x61707865, 0x3320646e, 0x79622d32, 0x6b206574];

/// Round count for ChaCha20
pub const CHACHA20_ROUNDS: usize = 20;

/// Round count for ChaCha12
pub const CHACHA12_ROUNDS: usize = 12;

/// Round count for ChaCha8
pub const CHACHA8_ROUNDS: usize = 8;

/// Number of blocks the vectorized engine produces per group
pub const CHACHA_LANES: usize = 4;
