//! Differential tests against an independent scalar implementation,
//! plus property tests over the public surface.

use proptest::prelude::*;

use lanecrypt_chacha::engine::{generate_keystream_blocks, xor_keystream_blocks};
use lanecrypt_chacha::{ChaCha20, ChaChaState, Nonce, StreamCipher};
use lanecrypt_params::chacha::{
    CHACHA20_ROUNDS, CHACHA_BLOCK_SIZE, CHACHA_KEY_SIZE, CHACHA_LANES, CHACHA_NONCE_SIZE,
};

// ---------------------------------------------------------------------------
// Reference implementation: one block at a time, plain array indexing,
// no lane vectors. Deliberately written in the textbook in-place style
// so it shares no structure with the engine under test.
// ---------------------------------------------------------------------------

fn ref_quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(7);
}

fn ref_state(key: &[u8; CHACHA_KEY_SIZE], nonce: &[u8; CHACHA_NONCE_SIZE], counter: u64) -> [u32; 16] {
    let mut state = [0u32; 16];
    state[0] = 0x61707865;
    state[1] = 0x3320646e;
    state[2] = 0x79622d32;
    state[3] = 0x6b206574;
    for (word, chunk) in state[4..12].iter_mut().zip(key.chunks_exact(4)) {
        *word = u32::from_le_bytes(chunk.try_into().unwrap());
    }
    state[12] = counter as u32;
    state[13] = (counter >> 32) as u32;
    state[14] = u32::from_le_bytes(nonce[0..4].try_into().unwrap());
    state[15] = u32::from_le_bytes(nonce[4..8].try_into().unwrap());
    state
}

fn ref_block(state: &[u32; 16]) -> [u8; CHACHA_BLOCK_SIZE] {
    let mut working = *state;
    for _ in 0..CHACHA20_ROUNDS / 2 {
        ref_quarter_round(&mut working, 0, 4, 8, 12);
        ref_quarter_round(&mut working, 1, 5, 9, 13);
        ref_quarter_round(&mut working, 2, 6, 10, 14);
        ref_quarter_round(&mut working, 3, 7, 11, 15);
        ref_quarter_round(&mut working, 0, 5, 10, 15);
        ref_quarter_round(&mut working, 1, 6, 11, 12);
        ref_quarter_round(&mut working, 2, 7, 8, 13);
        ref_quarter_round(&mut working, 3, 4, 9, 14);
    }
    let mut out = [0u8; CHACHA_BLOCK_SIZE];
    for (i, (word, orig)) in working.iter().zip(state.iter()).enumerate() {
        out[i * 4..i * 4 + 4].copy_from_slice(&word.wrapping_add(*orig).to_le_bytes());
    }
    out
}

fn ref_keystream(
    key: &[u8; CHACHA_KEY_SIZE],
    nonce: &[u8; CHACHA_NONCE_SIZE],
    counter: u64,
    nr_blocks: usize,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(nr_blocks * CHACHA_BLOCK_SIZE);
    for i in 0..nr_blocks {
        let state = ref_state(key, nonce, counter.wrapping_add(i as u64));
        out.extend_from_slice(&ref_block(&state));
    }
    out
}

const KEY: [u8; CHACHA_KEY_SIZE] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
    0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d,
    0x1e, 0x1f,
];
const NONCE: [u8; CHACHA_NONCE_SIZE] = [0x00, 0x00, 0x00, 0x4a, 0x00, 0x00, 0x00, 0x00];

#[test]
fn engine_matches_reference_for_all_tail_shapes() {
    // Every split between the vector path and the serial tail, including
    // the N = W and N = W + 1 boundaries
    for nr_blocks in 0..=2 * CHACHA_LANES + 1 {
        let mut state = ChaChaState::new(&KEY, &Nonce::new(NONCE), 100);
        let mut out = vec![0u8; nr_blocks * CHACHA_BLOCK_SIZE];
        generate_keystream_blocks::<CHACHA20_ROUNDS>(&mut state, None, &mut out, nr_blocks)
            .unwrap();

        let expected = ref_keystream(&KEY, &NONCE, 100, nr_blocks);
        assert_eq!(out, expected, "mismatch at {nr_blocks} blocks");
        assert_eq!(state.counter(), 100 + nr_blocks as u64);
    }
}

#[test]
fn engine_xor_matches_reference() {
    let plaintext: Vec<u8> = (0..7 * CHACHA_BLOCK_SIZE).map(|i| (i * 13) as u8).collect();

    let mut state = ChaChaState::new(&KEY, &Nonce::new(NONCE), 3);
    let mut data = plaintext.clone();
    xor_keystream_blocks::<CHACHA20_ROUNDS>(&mut state, &mut data, 7).unwrap();

    let keystream = ref_keystream(&KEY, &NONCE, 3, 7);
    let expected: Vec<u8> = plaintext
        .iter()
        .zip(keystream.iter())
        .map(|(p, k)| p ^ k)
        .collect();
    assert_eq!(data, expected);
}

#[test]
fn stream_cipher_trait_surface() {
    assert_eq!(<ChaCha20 as StreamCipher>::KEY_SIZE, CHACHA_KEY_SIZE);
    assert_eq!(<ChaCha20 as StreamCipher>::NONCE_SIZE, CHACHA_NONCE_SIZE);
    assert_eq!(<ChaCha20 as StreamCipher>::BLOCK_SIZE, CHACHA_BLOCK_SIZE);

    let mut cipher = ChaCha20::new(&KEY, &Nonce::new(NONCE));
    let mut data = *b"attack at dawn";
    StreamCipher::encrypt(&mut cipher, &mut data).unwrap();
    assert_ne!(&data, b"attack at dawn");

    StreamCipher::seek(&mut cipher, 0).unwrap();
    StreamCipher::decrypt(&mut cipher, &mut data).unwrap();
    assert_eq!(&data, b"attack at dawn");
}

proptest! {
    #[test]
    fn prop_encrypt_decrypt_roundtrip(
        data in proptest::collection::vec(any::<u8>(), 0..600),
        counter in any::<u64>(),
    ) {
        let mut buf = data.clone();

        let mut cipher = ChaCha20::with_counter(&KEY, &Nonce::new(NONCE), counter);
        cipher.encrypt(&mut buf);

        let mut cipher = ChaCha20::with_counter(&KEY, &Nonce::new(NONCE), counter);
        cipher.decrypt(&mut buf);

        prop_assert_eq!(buf, data);
    }

    #[test]
    fn prop_chunked_processing_is_stable(
        data in proptest::collection::vec(any::<u8>(), 1..600),
        split in any::<usize>(),
    ) {
        let split = split % (data.len() + 1);

        let mut one_shot = data.clone();
        let mut cipher = ChaCha20::new(&KEY, &Nonce::new(NONCE));
        cipher.process(&mut one_shot);

        let mut chunked = data.clone();
        let mut cipher = ChaCha20::new(&KEY, &Nonce::new(NONCE));
        let (head, tail) = chunked.split_at_mut(split);
        cipher.process(head);
        cipher.process(tail);

        prop_assert_eq!(chunked, one_shot);
    }

    #[test]
    fn prop_engine_matches_reference(
        nr_blocks in 0usize..12,
        counter in any::<u64>(),
    ) {
        let mut state = ChaChaState::new(&KEY, &Nonce::new(NONCE), counter);
        let mut out = vec![0u8; nr_blocks * CHACHA_BLOCK_SIZE];
        generate_keystream_blocks::<CHACHA20_ROUNDS>(&mut state, None, &mut out, nr_blocks)
            .unwrap();

        prop_assert_eq!(out, ref_keystream(&KEY, &NONCE, counter, nr_blocks));
        prop_assert_eq!(state.counter(), counter.wrapping_add(nr_blocks as u64));
    }
}
