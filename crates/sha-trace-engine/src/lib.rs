//! Streaming SHA-256 implementation (FIPS 180-4).
//!
//! The algorithm is implemented from scratch so every intermediate value
//! (message schedule, per-round working variables, accumulator folds) can be
//! observed through the [`trace::Inspect`] hook. The reference sha2 crate is
//! a dev-dependency used only to validate this implementation in tests.

#![forbid(unsafe_code)]

pub mod compress;
pub mod hasher;
pub mod padding;
pub mod schedule;
pub mod trace;

pub use hasher::{digest, digest_reader, digest_reader_with, Sha256};
pub use padding::{total_blocks, BLOCK_SIZE};
pub use trace::{BlockTrace, Inspect, PaddingInfo, RoundStep};
