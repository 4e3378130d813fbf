//! Final-block padding (FIPS 180-4 Section 5.1.1).

/// SHA-256 message block size in bytes.
pub const BLOCK_SIZE: usize = 64;

/// Offset of the 8-byte big-endian bit-length trailer inside its block.
/// Doubles as the tail-length limit: a tail of 56 bytes or more leaves no
/// room for the 0x80 terminator plus the trailer.
const TRAILER_OFFSET: usize = 56;

/// Padded form of the final short read.
#[derive(Debug, Clone, Copy)]
pub enum Padded {
    /// Terminator and length trailer fit together in one block.
    Single([u8; BLOCK_SIZE]),
    /// Terminator goes in the first block, the trailer in a second,
    /// otherwise-empty block.
    Split([u8; BLOCK_SIZE], [u8; BLOCK_SIZE]),
}

/// Build the padding block(s) closing a message.
///
/// `tail` is the remainder after the last full block (0..=63 bytes) and
/// `total_bits` the length of the whole message in bits. An empty tail
/// (input an exact multiple of 64 bytes) takes the single-block path:
/// terminator at byte 0, trailer in the same block.
pub fn pad(tail: &[u8], total_bits: u64) -> Padded {
    debug_assert!(tail.len() < BLOCK_SIZE);

    let mut block = [0u8; BLOCK_SIZE];
    block[..tail.len()].copy_from_slice(tail);
    block[tail.len()] = 0x80;

    if tail.len() < TRAILER_OFFSET {
        block[TRAILER_OFFSET..].copy_from_slice(&total_bits.to_be_bytes());
        Padded::Single(block)
    } else {
        let mut trailer = [0u8; BLOCK_SIZE];
        trailer[TRAILER_OFFSET..].copy_from_slice(&total_bits.to_be_bytes());
        Padded::Split(block, trailer)
    }
}

/// Total number of 64-byte blocks a message of `len` bytes compresses to,
/// padding block(s) included.
pub fn total_blocks(len: u64) -> u64 {
    let tail = len % BLOCK_SIZE as u64;
    len / BLOCK_SIZE as u64 + if tail < TRAILER_OFFSET as u64 { 1 } else { 2 }
}
