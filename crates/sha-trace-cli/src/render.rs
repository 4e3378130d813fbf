//! Formatted rendering of engine traces.
//!
//! Implements the engine's [`Inspect`] hook. All layout lives here; the
//! engine itself never formats anything.

use std::io::{self, Write};

use console::Style;

use sha_trace_core::constants::{INITIAL_HASH, ROUND_CONSTANTS};
use sha_trace_engine::{BlockTrace, Inspect, PaddingInfo, BLOCK_SIZE};

const HEADING_WIDTH: usize = 80;

/// Writes a section-by-section account of the hash computation to `out`.
pub struct TraceRenderer<W: Write> {
    out: W,
    style: Style,
}

impl<W: Write> TraceRenderer<W> {
    /// `colors` selects ANSI styling for the section headings; pass false
    /// when the trace goes to a log file.
    pub fn new(out: W, colors: bool) -> Self {
        let style = if colors {
            Style::new().yellow()
        } else {
            Style::new()
        };
        TraceRenderer { out, style }
    }

    /// Render the sections that precede the first block: the round constant
    /// table and the initial hash values.
    pub fn preamble(&mut self) -> io::Result<()> {
        self.heading("Set constants (sixty-four constant 32-bit words)")?;
        for (i, k) in ROUND_CONSTANTS.iter().enumerate() {
            write!(self.out, "{:08x}", k)?;
            if (i + 1) % 8 == 0 {
                writeln!(self.out)?;
            } else {
                write!(self.out, " ")?;
            }
        }
        writeln!(self.out)?;

        self.heading("Set initial hash values (H0-H7)")?;
        for (i, h) in INITIAL_HASH.iter().enumerate() {
            write!(self.out, "H{}: {:08x}  ", i, h)?;
            if (i + 1) % 4 == 0 {
                writeln!(self.out)?;
            }
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn heading(&mut self, title: &str) -> io::Result<()> {
        let label = format!("=== {} ", title);
        let fill = HEADING_WIDTH.saturating_sub(label.chars().count());
        let line = format!("{}{}", label, "=".repeat(fill));
        writeln!(self.out, "{}", self.style.apply_to(line))
    }

    /// Hexdump with offset gutter and printable-ASCII column, 16 bytes per line.
    fn hexdump(&mut self, bytes: &[u8]) -> io::Result<()> {
        for (line_no, line) in bytes.chunks(16).enumerate() {
            write!(self.out, "{:<8}", format!("0x{:x}", line_no * 16))?;
            for b in line {
                write!(self.out, "{:02x}", b)?;
            }
            write!(self.out, "\t")?;
            for &b in line {
                let c = if (33..=126).contains(&b) { b as char } else { '.' };
                write!(self.out, "{}", c)?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn render_padding(&mut self, info: &PaddingInfo) -> io::Result<()> {
        self.heading(&format!(
            "Padding block (message length: {}-bit)",
            info.total_bits
        ))?;
        writeln!(self.out, "{:<8}{}-bit", "From", info.tail_len * 8)?;
        writeln!(
            self.out,
            "{:<8}{}-bit{}",
            "To",
            BLOCK_SIZE * 8,
            if info.split {
                " (terminator and trailer split across two blocks)"
            } else {
                ""
            }
        )?;
        writeln!(self.out)?;
        Ok(())
    }

    fn render_block(&mut self, trace: &BlockTrace) -> io::Result<()> {
        self.heading(&format!("Start processing block {}", trace.index))?;
        self.hexdump(&trace.block)?;

        self.heading("Prepare message schedule")?;
        for (i, words) in trace.schedule.chunks(4).enumerate() {
            write!(self.out, "W{}-{}\t", i * 4, i * 4 + 3)?;
            for w in words {
                write!(self.out, "{:08x} ", w)?;
            }
            writeln!(self.out)?;
        }

        self.heading("Initialize working variables")?;
        for (i, (name, value)) in "abcdefgh".chars().zip(trace.entry_state.iter()).enumerate() {
            write!(self.out, "{}: {:08x}  ", name, value)?;
            if (i + 1) % 4 == 0 {
                writeln!(self.out)?;
            }
        }

        self.heading("Main compression loop (64 rounds)")?;
        writeln!(
            self.out,
            "{:<8}{:<10}{:<10}{:<10}{:<10}{:<10}{:<10}{:<10}{:<10}{:<10}{:<10}",
            "Round", "t1", "t2", "a", "b", "c", "d", "e", "f", "g", "h"
        )?;
        for (t, step) in trace.rounds.iter().enumerate() {
            // First round, then every eighth
            if t != 0 && (t + 1) % 8 != 0 {
                continue;
            }
            write!(self.out, "{:<8}", format!("{}th", t + 1))?;
            write!(self.out, "{:<10x}{:<10x}", step.t1, step.t2)?;
            for v in step.vars {
                write!(self.out, "{:<10x}", v)?;
            }
            writeln!(self.out)?;
        }

        self.heading("Compute hash value (sum work vars with previous hash words)")?;
        for i in 0..8 {
            writeln!(
                self.out,
                "H{}  {:08x}  ->  {:08x}",
                i, trace.entry_state[i], trace.exit_state[i]
            )?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> Inspect for TraceRenderer<W> {
    fn block(&mut self, trace: &BlockTrace) {
        self.render_block(trace).ok();
    }

    fn padding(&mut self, info: &PaddingInfo) {
        self.render_padding(info).ok();
    }
}
