//! Portable lane vectors for the ChaCha round function
//!
//! The state matrix is processed one row per vector: a [`Row`] holds four
//! consecutive 32-bit state words and every operation acts element-wise,
//! so word position `i` of the (a, b, c, d) row quadruple forms one
//! independent quarter-round column. Diagonal arrangement is reached by
//! rotating the word lanes of rows b, c, d instead of re-indexing memory,
//! which is the shuffle a 128-bit SIMD unit performs in one instruction.
//! The compiler lowers the element-wise loops to that vector width; no
//! hand-written intrinsics are involved.

use byteorder::{ByteOrder, LittleEndian};
use zeroize::Zeroize;

use lanecrypt_params::chacha::CHACHA_BLOCK_SIZE;

/// One row of the 4x4 state: four 32-bit words operated on element-wise
#[derive(Clone, Copy, PartialEq, Eq, Debug, Zeroize)]
pub(crate) struct Row(pub(crate) [u32; 4]);

impl Row {
    #[inline(always)]
    pub(crate) fn wrapping_add(self, rhs: Row) -> Row {
        let mut out = self.0;
        for (a, b) in out.iter_mut().zip(rhs.0) {
            *a = a.wrapping_add(b);
        }
        Row(out)
    }

    #[inline(always)]
    pub(crate) fn xor(self, rhs: Row) -> Row {
        let mut out = self.0;
        for (a, b) in out.iter_mut().zip(rhs.0) {
            *a ^= b;
        }
        Row(out)
    }

    /// Rotate every word left by `bits`
    #[inline(always)]
    pub(crate) fn rotate_each_left(self, bits: u32) -> Row {
        let mut out = self.0;
        for word in out.iter_mut() {
            *word = word.rotate_left(bits);
        }
        Row(out)
    }

    /// Rotate the word lanes left by `n` positions
    ///
    /// The diagonalization shuffle: lane 0 takes the word `n` positions
    /// up, wrapping.
    #[inline(always)]
    pub(crate) fn rotate_lanes_left(self, n: usize) -> Row {
        Row([
            self.0[n & 3],
            self.0[(n + 1) & 3],
            self.0[(n + 2) & 3],
            self.0[(n + 3) & 3],
        ])
    }

    /// Advance the 64-bit little-endian counter held in lanes 0 and 1 by
    /// `blocks`, wrapping mod 2^64; lanes 2 and 3 (the nonce) pass
    /// through untouched
    #[inline(always)]
    pub(crate) fn bump_counter(self, blocks: u64) -> Row {
        let counter = u64::from(self.0[0]) | (u64::from(self.0[1]) << 32);
        let counter = counter.wrapping_add(blocks);
        Row([counter as u32, (counter >> 32) as u32, self.0[2], self.0[3]])
    }

    /// Serialize the four words little-endian into 16 bytes
    #[inline(always)]
    pub(crate) fn write_le(&self, out: &mut [u8]) {
        LittleEndian::write_u32_into(&self.0, out);
    }
}

/// The working register set for one block in flight
///
/// Rows copied from the cipher state at the start of a block, mutated
/// through the double-round sequence, discarded (zeroized) after
/// feed-forward and serialization. Never aliases the canonical state.
#[derive(Clone, Copy, Zeroize)]
pub(crate) struct WorkingState {
    pub(crate) a: Row,
    pub(crate) b: Row,
    pub(crate) c: Row,
    pub(crate) d: Row,
}

impl WorkingState {
    #[inline(always)]
    pub(crate) fn from_rows(rows: [Row; 4]) -> Self {
        Self {
            a: rows[0],
            b: rows[1],
            c: rows[2],
            d: rows[3],
        }
    }

    /// One quarter-round pass across all four columns
    ///
    /// The add/xor/rotate sequence and the 16/12/8/7 rotation amounts are
    /// fixed by the cipher definition; reordering changes the keystream.
    #[inline(always)]
    pub(crate) fn quarter_round(&mut self) {
        self.a = self.a.wrapping_add(self.b);
        self.d = self.d.xor(self.a).rotate_each_left(16);

        self.c = self.c.wrapping_add(self.d);
        self.b = self.b.xor(self.c).rotate_each_left(12);

        self.a = self.a.wrapping_add(self.b);
        self.d = self.d.xor(self.a).rotate_each_left(8);

        self.c = self.c.wrapping_add(self.d);
        self.b = self.b.xor(self.c).rotate_each_left(7);
    }

    /// Shuffle rows b, c, d into diagonal arrangement
    #[inline(always)]
    pub(crate) fn diagonalize(&mut self) {
        self.b = self.b.rotate_lanes_left(1);
        self.c = self.c.rotate_lanes_left(2);
        self.d = self.d.rotate_lanes_left(3);
    }

    /// Restore column arrangement
    #[inline(always)]
    pub(crate) fn undiagonalize(&mut self) {
        self.b = self.b.rotate_lanes_left(3);
        self.c = self.c.rotate_lanes_left(2);
        self.d = self.d.rotate_lanes_left(1);
    }

    /// One double round: a column pass, then the same pass with the rows
    /// shuffled into diagonal arrangement
    #[inline(always)]
    pub(crate) fn double_round(&mut self) {
        self.quarter_round();
        self.diagonalize();
        self.quarter_round();
        self.undiagonalize();
    }

    /// Advance this lane's counter row by `blocks`
    #[inline(always)]
    pub(crate) fn offset_counter(&mut self, blocks: u64) {
        self.d = self.d.bump_counter(blocks);
    }

    /// Feed-forward: add the pre-permutation rows back in, word-by-word
    /// mod 2^32
    #[inline(always)]
    pub(crate) fn feed_forward(&mut self, seed: &WorkingState) {
        self.a = self.a.wrapping_add(seed.a);
        self.b = self.b.wrapping_add(seed.b);
        self.c = self.c.wrapping_add(seed.c);
        self.d = self.d.wrapping_add(seed.d);
    }

    /// Serialize the 16 words little-endian, word-major, into one
    /// 64-byte keystream block
    #[inline(always)]
    pub(crate) fn write_keystream(&self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), CHACHA_BLOCK_SIZE);
        self.a.write_le(&mut out[0..16]);
        self.b.write_le(&mut out[16..32]);
        self.c.write_le(&mut out[32..48]);
        self.d.write_le(&mut out[48..64]);
    }
}
