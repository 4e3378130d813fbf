//! Streaming hash engine: block buffering, padding, and state chaining.

use std::io::{ErrorKind, Read};

use sha_trace_core::constants::INITIAL_HASH;
use sha_trace_core::Result;

use crate::compress::compress;
use crate::padding::{pad, Padded, BLOCK_SIZE};
use crate::schedule;
use crate::trace::{BlockTrace, Inspect, PaddingInfo};

/// Streaming SHA-256 engine.
///
/// Owns the running accumulator; feed bytes with [`update`](Self::update) and
/// retrieve the digest with [`finalize`](Self::finalize). The digest depends
/// only on the byte content, never on how the calls are chunked. Finalizing
/// consumes the engine; a run has no resumable partial result.
pub struct Sha256<'a> {
    state: [u32; 8],
    buf: [u8; BLOCK_SIZE],
    buf_len: usize,
    total_bytes: u64,
    blocks: u64,
    inspector: Option<&'a mut dyn Inspect>,
}

impl<'a> Sha256<'a> {
    pub fn new() -> Self {
        Sha256 {
            state: INITIAL_HASH,
            buf: [0u8; BLOCK_SIZE],
            buf_len: 0,
            total_bytes: 0,
            blocks: 0,
            inspector: None,
        }
    }

    /// Attach a per-block observer. The observer sees every intermediate
    /// value but cannot influence the computation.
    pub fn with_inspector(inspector: &'a mut dyn Inspect) -> Self {
        Sha256 {
            inspector: Some(inspector),
            ..Sha256::new()
        }
    }

    /// Absorb input bytes, compressing each time a full 64-byte block is
    /// available.
    pub fn update(&mut self, mut data: &[u8]) {
        self.total_bytes += data.len() as u64;

        // Top up a partial block left over from the previous call
        if self.buf_len > 0 {
            let take = (BLOCK_SIZE - self.buf_len).min(data.len());
            self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
            self.buf_len += take;
            data = &data[take..];

            if self.buf_len < BLOCK_SIZE {
                return;
            }
            let block = self.buf;
            self.buf_len = 0;
            self.process(&block);
        }

        while data.len() >= BLOCK_SIZE {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(&data[..BLOCK_SIZE]);
            self.process(&block);
            data = &data[BLOCK_SIZE..];
        }

        self.buf[..data.len()].copy_from_slice(data);
        self.buf_len = data.len();
    }

    /// Pad the remaining tail, compress the final block(s), and render the
    /// accumulator as the 32-byte digest.
    pub fn finalize(mut self) -> [u8; 32] {
        // The trailer carries the length of the whole message, so the bit
        // count must be fixed before the padding shape is chosen.
        let total_bits = self.total_bytes * 8;
        let padded = pad(&self.buf[..self.buf_len], total_bits);

        if let Some(inspector) = self.inspector.as_mut() {
            inspector.padding(&PaddingInfo {
                tail_len: self.buf_len,
                total_bits,
                split: matches!(padded, Padded::Split(..)),
            });
        }

        match padded {
            Padded::Single(block) => self.process(&block),
            Padded::Split(block, trailer) => {
                self.process(&block);
                self.process(&trailer);
            }
        }

        let mut digest = [0u8; 32];
        for (i, word) in self.state.iter().enumerate() {
            digest[i * 4..(i + 1) * 4].copy_from_slice(&word.to_be_bytes());
        }
        digest
    }

    /// Number of 64-byte blocks compressed so far.
    pub fn blocks(&self) -> u64 {
        self.blocks
    }

    fn process(&mut self, block: &[u8; BLOCK_SIZE]) {
        self.blocks += 1;
        let w = schedule::expand(block);

        match self.inspector.as_mut() {
            None => compress(&mut self.state, &w, None),
            Some(inspector) => {
                let entry_state = self.state;
                let mut rounds = Vec::with_capacity(64);
                compress(&mut self.state, &w, Some(&mut rounds));
                inspector.block(&BlockTrace {
                    index: self.blocks,
                    block: *block,
                    schedule: w,
                    entry_state,
                    rounds,
                    exit_state: self.state,
                });
            }
        }
    }
}

impl Default for Sha256<'_> {
    fn default() -> Self {
        Sha256::new()
    }
}

/// Compute the SHA-256 digest of an in-memory buffer.
pub fn digest(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize()
}

/// Compute the SHA-256 digest of a byte source, reading up to 64 bytes at
/// a time until end-of-data.
pub fn digest_reader<R: Read>(reader: R) -> Result<[u8; 32]> {
    drive(reader, Sha256::new())
}

/// Same as [`digest_reader`], with a per-block inspector attached.
pub fn digest_reader_with<R: Read>(reader: R, inspector: &mut dyn Inspect) -> Result<[u8; 32]> {
    drive(reader, Sha256::with_inspector(inspector))
}

fn drive<R: Read>(mut reader: R, mut hasher: Sha256<'_>) -> Result<[u8; 32]> {
    let mut buf = [0u8; BLOCK_SIZE];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(hasher.finalize()),
            Ok(read) => hasher.update(&buf[..read]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}
