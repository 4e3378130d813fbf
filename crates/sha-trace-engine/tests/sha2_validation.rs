//! Validate our implementation against the sha2 crate.
//!
//! This is the critical correctness test - both implementations hash the
//! SAME bytes independently. If they produce different digests, our
//! implementation is wrong.

use sha2::{Digest, Sha256 as RefSha256};

use sha_trace_engine::{digest, digest_reader, Sha256};

fn reference(data: &[u8]) -> [u8; 32] {
    RefSha256::digest(data).into()
}

#[test]
fn test_all_lengths_through_both_padding_paths() {
    // 0..=130 covers every tail length twice, so every single-block and
    // split-padding shape is exercised on both sides of a block boundary.
    for len in 0..=130usize {
        let data: Vec<u8> = (0..len).map(|i| (i as u8).wrapping_mul(31)).collect();
        assert_eq!(
            digest(&data),
            reference(&data),
            "mismatch for input len {}",
            len
        );
    }
}

#[test]
fn test_multi_block_inputs() {
    for len in [256usize, 1000, 4096, 65 * 1024 + 17] {
        let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        assert_eq!(
            digest(&data),
            reference(&data),
            "mismatch for input len {}",
            len
        );
    }
}

#[test]
fn test_streamed_updates_match_reference() {
    let data: Vec<u8> = (0..10_000).map(|i| (i * 13 % 256) as u8).collect();

    let mut hasher = Sha256::new();
    let mut cursor = &data[..];
    // Uneven chunk sizes so updates straddle block boundaries
    for (i, size) in [1usize, 5, 17, 63, 64, 65, 100].iter().cycle().enumerate() {
        if cursor.is_empty() {
            break;
        }
        let take = (*size + i % 3).min(cursor.len());
        hasher.update(&cursor[..take]);
        cursor = &cursor[take..];
    }

    assert_eq!(hasher.finalize(), reference(&data));
}

#[test]
fn test_reader_path_matches_reference() {
    let data: Vec<u8> = (0..777).map(|i| (i % 256) as u8).collect();
    assert_eq!(digest_reader(&data[..]).unwrap(), reference(&data));
}
