//! Message schedule expansion (FIPS 180-4 Section 6.2.2, step 1).

use crate::padding::BLOCK_SIZE;

/// Expand one 64-byte block into the 64-word message schedule.
pub fn expand(block: &[u8; BLOCK_SIZE]) -> [u32; 64] {
    let mut w = [0u32; 64];

    // First 16 words are the block itself, read big-endian
    for (i, chunk) in block.chunks_exact(4).enumerate() {
        w[i] = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    // Extend to 64 words
    for i in 16..64 {
        w[i] = small_sigma1(w[i - 2])
            .wrapping_add(w[i - 7])
            .wrapping_add(small_sigma0(w[i - 15]))
            .wrapping_add(w[i - 16]);
    }

    w
}

/// σ0 - rotates right 7 and 18, then shifts right 3.
fn small_sigma0(w: u32) -> u32 {
    w.rotate_right(7) ^ w.rotate_right(18) ^ (w >> 3)
}

/// σ1 - rotates right 17 and 19, then shifts right 10.
fn small_sigma1(w: u32) -> u32 {
    w.rotate_right(17) ^ w.rotate_right(19) ^ (w >> 10)
}
