//! The multi-lane keystream engine
//!
//! One engine serves every vector width: `keystream_group` is generic
//! over the number of blocks `W` in flight, and the public entry points
//! run full groups of [`CHACHA_LANES`] blocks followed by the width-1
//! instantiation for whatever remains. Within a group every lane is
//! seeded from the same base rows with the counter staggered by the lane
//! index, all lanes step through the double-round sequence in lockstep,
//! and each lane feed-forwards against its own seed. The persistent
//! counter advances by exactly the group width after each group, so the
//! blocking strategy is invisible in the output.
//!
//! No heap allocation occurs; all scratch lives on the stack and is
//! zeroized before return.

use zeroize::Zeroize;

use crate::error::{validate, Result};
use lanecrypt_common::{barrier, ZeroizeGuard};
use lanecrypt_params::chacha::{CHACHA_BLOCK_SIZE, CHACHA_LANES};

use super::lanes::WorkingState;
use super::state::ChaChaState;

/// Bytes produced by one full vector group
const GROUP_SIZE: usize = CHACHA_BLOCK_SIZE * CHACHA_LANES;

/// Produce `W` consecutive keystream blocks into `out` and advance the
/// state counter by `W`
fn keystream_group<const W: usize, const R: usize>(state: &mut ChaChaState, out: &mut [u8]) {
    debug_assert_eq!(out.len(), W * CHACHA_BLOCK_SIZE);
    debug_assert_eq!(R % 2, 0, "round count must be a whole number of double rounds");

    let base = WorkingState::from_rows(state.rows());
    let mut seeds = [base; W];
    for (i, seed) in seeds.iter_mut().enumerate().skip(1) {
        seed.offset_counter(i as u64);
    }
    let mut lanes = seeds;

    // All lanes in lockstep; the per-lane interleave amortizes loop
    // overhead without affecting the result.
    for _ in 0..R / 2 {
        for lane in lanes.iter_mut() {
            lane.double_round();
        }
    }

    // Feed-forward each lane against its own seed (which carries that
    // lane's counter), then serialize.
    for ((lane, seed), block) in lanes
        .iter_mut()
        .zip(seeds.iter())
        .zip(out.chunks_exact_mut(CHACHA_BLOCK_SIZE))
    {
        lane.feed_forward(seed);
        lane.write_keystream(block);
    }

    state.advance(W as u64);

    lanes.zeroize();
    seeds.zeroize();
}

/// Fill `out` (a whole number of blocks) with raw keystream
pub(crate) fn fill_blocks<const R: usize>(state: &mut ChaChaState, out: &mut [u8]) {
    debug_assert_eq!(out.len() % CHACHA_BLOCK_SIZE, 0);

    let mut groups = out.chunks_exact_mut(GROUP_SIZE);
    for group in &mut groups {
        keystream_group::<CHACHA_LANES, R>(state, group);
    }
    for block in groups.into_remainder().chunks_exact_mut(CHACHA_BLOCK_SIZE) {
        keystream_group::<1, R>(state, block);
    }
}

/// XOR keystream into `data` (a whole number of blocks) in place
pub(crate) fn xor_blocks<const R: usize>(state: &mut ChaChaState, data: &mut [u8]) {
    debug_assert_eq!(data.len() % CHACHA_BLOCK_SIZE, 0);

    let mut scratch = [0u8; GROUP_SIZE];
    let mut scratch = ZeroizeGuard::new(&mut scratch);

    let mut groups = data.chunks_exact_mut(GROUP_SIZE);
    for group in &mut groups {
        keystream_group::<CHACHA_LANES, R>(state, &mut scratch[..]);
        for (byte, ks) in group.iter_mut().zip(scratch.iter()) {
            *byte ^= ks;
        }
    }
    for block in groups.into_remainder().chunks_exact_mut(CHACHA_BLOCK_SIZE) {
        keystream_group::<1, R>(state, &mut scratch[..CHACHA_BLOCK_SIZE]);
        for (byte, ks) in block.iter_mut().zip(scratch.iter()) {
            *byte ^= ks;
        }
    }

    // Keep the guard's cleanse from being reordered past the return
    barrier::compiler_fence_seq_cst();
}

/// Generate `nr_blocks` keystream blocks, combined with `input`
///
/// Writes `nr_blocks * 64` bytes to `output`: each byte is the
/// corresponding `input` byte XOR keystream, or the raw keystream byte
/// when `input` is `None` (pure keystream extraction). Advances the
/// state counter by `nr_blocks`. Buffers need no particular alignment.
///
/// For the common in-place usage (ciphertext over plaintext in the same
/// buffer) use [`xor_keystream_blocks`].
///
/// # Errors
///
/// Returns [`Error::Length`](crate::error::Error::Length) unless
/// `output` (and `input`, when supplied) is exactly `nr_blocks * 64`
/// bytes.
pub fn generate_keystream_blocks<const R: usize>(
    state: &mut ChaChaState,
    input: Option<&[u8]>,
    output: &mut [u8],
    nr_blocks: usize,
) -> Result<()> {
    let expected = nr_blocks * CHACHA_BLOCK_SIZE;
    validate::length("keystream output", output.len(), expected)?;

    match input {
        None => fill_blocks::<R>(state, output),
        Some(input) => {
            validate::length("keystream input", input.len(), expected)?;
            output.copy_from_slice(input);
            xor_blocks::<R>(state, output);
        }
    }

    Ok(())
}

/// XOR `nr_blocks` blocks of keystream into `data` in place
///
/// The in-place form of [`generate_keystream_blocks`]: encrypts
/// plaintext or decrypts ciphertext in the same buffer. Advances the
/// state counter by `nr_blocks`.
///
/// # Errors
///
/// Returns [`Error::Length`](crate::error::Error::Length) unless `data`
/// is exactly `nr_blocks * 64` bytes.
pub fn xor_keystream_blocks<const R: usize>(
    state: &mut ChaChaState,
    data: &mut [u8],
    nr_blocks: usize,
) -> Result<()> {
    validate::length("keystream buffer", data.len(), nr_blocks * CHACHA_BLOCK_SIZE)?;
    xor_blocks::<R>(state, data);
    Ok(())
}
