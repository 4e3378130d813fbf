//! Read-only inspection of per-block engine state.
//!
//! The engine computes; an observer renders. Implementations of [`Inspect`]
//! receive every intermediate value but cannot feed anything back, so
//! attaching one never changes the digest.

use crate::padding::BLOCK_SIZE;

/// Temporaries and working variables after one compression round.
#[derive(Debug, Clone, Copy)]
pub struct RoundStep {
    pub t1: u32,
    pub t2: u32,
    /// a..h after the round's shift.
    pub vars: [u32; 8],
}

/// Everything the engine computed for one 64-byte block.
#[derive(Debug, Clone)]
pub struct BlockTrace {
    /// 1-based sequence number of the block, padding blocks included.
    pub index: u64,
    /// Raw block bytes fed to the schedule expander.
    pub block: [u8; BLOCK_SIZE],
    /// The 64-word message schedule.
    pub schedule: [u32; 64],
    /// Accumulator before this block was folded in.
    pub entry_state: [u32; 8],
    /// One entry per compression round, in order.
    pub rounds: Vec<RoundStep>,
    /// Accumulator after the fold.
    pub exit_state: [u32; 8],
}

/// Shape of the padding appended after the final read.
#[derive(Debug, Clone, Copy)]
pub struct PaddingInfo {
    /// Payload bytes left over after the last full block (0..=63).
    pub tail_len: usize,
    /// Total message length in bits, as written to the trailer.
    pub total_bits: u64,
    /// Whether the trailer spilled into a second block.
    pub split: bool,
}

/// Per-block observer hook.
pub trait Inspect {
    /// Called once for every processed block, after its fold commits.
    fn block(&mut self, trace: &BlockTrace);

    /// Called once when the final read is padded, before the padded
    /// block(s) are processed.
    fn padding(&mut self, _info: &PaddingInfo) {}
}
