//! Property-based tests for the block obfuscation codec
//!
//! 1. **Round-trip**: decode(encode(blocks)) == blocks, and the IV comes back
//! 2. **Rejection**: invalid arguments never mutate the IV or the blocks
//! 3. **Prefix**: only the first `length` blocks are touched

use obf::{decode, encode, Block, Iv, Key, ObfError, Status};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_encode_decode_roundtrip(
        raw_key in any::<u64>(),
        iv in any::<u32>(),
        blocks in prop::collection::vec(any::<u32>(), 1..256),
    ) {
        let key = Key::from_raw(raw_key);
        let mut data = blocks.clone();
        let mut counter: Iv = iv;
        let length = data.len();

        encode(Some(&key), Some(&mut counter), Some(data.as_mut_slice()), length).unwrap();
        decode(Some(&key), Some(&mut counter), Some(data.as_mut_slice()), length).unwrap();

        prop_assert_eq!(data, blocks);
        prop_assert_eq!(counter, iv);
    }

    #[test]
    fn prop_roundtrip_near_counter_wrap(
        raw_key in any::<u64>(),
        offset in 0u32..64,
        blocks in prop::collection::vec(any::<u32>(), 1..64),
    ) {
        let key = Key::from_raw(raw_key);
        let start = u32::MAX - offset;
        let mut data = blocks.clone();
        let mut counter = start;
        let length = data.len();

        encode(Some(&key), Some(&mut counter), Some(data.as_mut_slice()), length).unwrap();
        decode(Some(&key), Some(&mut counter), Some(data.as_mut_slice()), length).unwrap();

        prop_assert_eq!(data, blocks);
        prop_assert_eq!(counter, start);
    }

    #[test]
    fn prop_zero_length_never_mutates(
        raw_key in any::<u64>(),
        iv in any::<u32>(),
        blocks in prop::collection::vec(any::<u32>(), 0..16),
    ) {
        let key = Key::from_raw(raw_key);
        let mut data = blocks.clone();
        let mut counter = iv;

        let result = encode(Some(&key), Some(&mut counter), Some(data.as_mut_slice()), 0);
        prop_assert!(matches!(result, Err(ObfError::InvalidLength)));
        let result = decode(Some(&key), Some(&mut counter), Some(data.as_mut_slice()), 0);
        prop_assert!(matches!(result, Err(ObfError::InvalidLength)));

        prop_assert_eq!(data, blocks);
        prop_assert_eq!(counter, iv);
    }

    #[test]
    fn prop_missing_key_never_mutates(
        iv in any::<u32>(),
        blocks in prop::collection::vec(any::<u32>(), 1..16),
    ) {
        let mut data = blocks.clone();
        let mut counter = iv;
        let length = data.len();

        let result = encode(None, Some(&mut counter), Some(data.as_mut_slice()), length);
        prop_assert_eq!(Status::from_result(&result), Status::InvalidKey);

        prop_assert_eq!(data, blocks);
        prop_assert_eq!(counter, iv);
    }

    #[test]
    fn prop_only_prefix_is_transformed(
        raw_key in any::<u64>(),
        iv in any::<u32>(),
        blocks in prop::collection::vec(any::<u32>(), 2..64),
        cut in any::<prop::sample::Index>(),
    ) {
        let key = Key::from_raw(raw_key);
        let length = 1 + cut.index(blocks.len() - 1);
        let mut data = blocks.clone();
        let mut counter = iv;

        encode(Some(&key), Some(&mut counter), Some(data.as_mut_slice()), length).unwrap();
        prop_assert_eq!(&data[length..], &blocks[length..]);

        decode(Some(&key), Some(&mut counter), Some(data.as_mut_slice()), length).unwrap();
        prop_assert_eq!(data, blocks);
    }
}

#[test]
fn example_vector_roundtrip() {
    let key = Key::new(0x0000_0001, 0x0000_0002);
    let mut iv: Iv = 0x0000_0000;
    let mut blocks: Vec<Block> = vec![0x1111_1111, 0x2222_2222];

    encode(Some(&key), Some(&mut iv), Some(blocks.as_mut_slice()), 2).unwrap();
    decode(Some(&key), Some(&mut iv), Some(blocks.as_mut_slice()), 2).unwrap();

    assert_eq!(blocks, vec![0x1111_1111, 0x2222_2222]);
    assert_eq!(iv, 0x0000_0000);
}

#[test]
fn validation_precedence() {
    let key = Key::new(1, 2);
    let mut iv: Iv = 5;
    let mut blocks: Vec<Block> = vec![9; 4];

    let cases = [
        (encode(None, None, None, 0), Status::InvalidKey),
        (encode(Some(&key), None, None, 0), Status::InvalidIv),
        (encode(Some(&key), Some(&mut iv), None, 0), Status::InvalidData),
        (
            encode(Some(&key), Some(&mut iv), Some(blocks.as_mut_slice()), 0),
            Status::InvalidLength,
        ),
        (decode(None, None, None, 0), Status::InvalidKey),
        (decode(Some(&key), None, None, 0), Status::InvalidIv),
        (decode(Some(&key), Some(&mut iv), None, 0), Status::InvalidData),
        (
            decode(Some(&key), Some(&mut iv), Some(blocks.as_mut_slice()), 0),
            Status::InvalidLength,
        ),
    ];

    for (index, (result, expected)) in cases.iter().enumerate() {
        assert_eq!(Status::from_result(result), *expected, "case {}", index);
    }
    assert_eq!(iv, 5);
    assert_eq!(blocks, vec![9; 4]);
}

#[test]
fn encoding_usually_changes_every_block_and_the_iv() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    for seed in 0..32u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let key = Key::generate(&mut rng);
        let iv: Iv = rng.gen();
        let plain: Vec<Block> = (0..32).map(|_| rng.gen()).collect();

        let mut cipher = plain.clone();
        let mut counter = iv;
        encode(Some(&key), Some(&mut counter), Some(cipher.as_mut_slice()), 32).unwrap();

        assert!(
            cipher.iter().zip(&plain).all(|(c, p)| c != p),
            "seed {} left a block unchanged",
            seed
        );
        assert_ne!(counter, iv, "seed {} left the IV unchanged", seed);
    }
}
