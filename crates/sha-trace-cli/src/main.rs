use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use console::style;

use sha_trace_engine::{digest_reader, digest_reader_with, total_blocks};

mod render;

use render::TraceRenderer;

/// Largest input that still gets verbose tracing on the console.
const VERBOSE_CONSOLE_MAX_SIZE: u64 = 1024; // 1 KB

/// Largest input that still gets verbose tracing into a log file.
const VERBOSE_LOG_FILE_MAX_SIZE: u64 = 100 * 1024; // 100 KB

#[derive(Parser, Debug)]
#[command(
    name = "sha-trace",
    about = "From-scratch SHA-256 file hashing with per-step tracing"
)]
struct Args {
    /// File to hash
    file: PathBuf,

    /// Print the internal state of every processing step
    #[arg(short = 'v', long = "verbose", default_value_t = false)]
    verbose: bool,
}

/// Where verbose tracing goes for a given input size.
#[derive(Debug, PartialEq)]
enum TraceSink {
    /// Small inputs trace straight to stdout, with colors.
    Console,
    /// Mid-sized inputs trace into a log file, without colors.
    LogFile(PathBuf),
    /// Tracing not requested, or input too large for it.
    Disabled,
}

fn select_sink(verbose: bool, file_size: u64, path: &Path) -> TraceSink {
    if !verbose {
        return TraceSink::Disabled;
    }
    if file_size <= VERBOSE_CONSOLE_MAX_SIZE {
        TraceSink::Console
    } else if file_size <= VERBOSE_LOG_FILE_MAX_SIZE {
        TraceSink::LogFile(log_file_name(path))
    } else {
        TraceSink::Disabled
    }
}

/// Derive `<file name>.sha256.log` in the working directory.
fn log_file_name(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    PathBuf::from(format!("{}.sha256.log", name))
}

fn human_size(size: u64) -> String {
    if size > 1024 * 1024 {
        format!("{} Mb ({} bytes)", size / (1024 * 1024), size)
    } else if size > 1024 {
        format!("{} Kb ({} bytes)", size / 1024, size)
    } else {
        format!("{} bytes", size)
    }
}

fn box_row(text: &str) -> String {
    format!("║ {:<77}║", text)
}

fn print_start_banner(path: &Path, size: u64) {
    println!();
    println!("{}", style("=".repeat(80)).yellow());
    println!("SHA-256 Digest Algorithm From Scratch");
    println!("{}", style("=".repeat(80)).yellow());
    println!();
    println!("Input file: {} ({} bytes)", path.display(), size);
    println!();
}

fn print_result(path: &Path, digest: &[u8; 32], size: u64, elapsed_secs: f64) {
    println!();
    println!("╔{}╗", "═".repeat(78));
    println!("║{:^78}║", "RESULT");
    println!("╠{}╣", "═".repeat(78));
    println!("{}", box_row(&format!("File: {}", path.display())));
    println!("{}", box_row(&format!("Size: {}", human_size(size))));
    println!("{}", box_row(""));
    println!("{}", box_row("SHA-256:"));
    for half in digest.chunks(16) {
        let words: Vec<String> = half
            .chunks(4)
            .map(|w| format!("{:08x}", u32::from_be_bytes([w[0], w[1], w[2], w[3]])))
            .collect();
        println!("{}", box_row(&words.join(" ")));
    }
    println!("{}", box_row(""));
    println!("{}", box_row("Hexadecimal (contiguous):"));
    println!("{}", box_row(&hex::encode(digest)));
    println!("{}", box_row(""));
    println!("╚{}╝", "═".repeat(78));
    println!();
    println!("  Computation completed successfully");
    println!("  Processed: {} block(s)", total_blocks(size));
    println!("  Time spent: {:.3} seconds", elapsed_secs);
}

fn run(args: &Args) -> anyhow::Result<()> {
    let started = Instant::now();

    let file = File::open(&args.file)
        .with_context(|| format!("cannot open '{}'", args.file.display()))?;
    let size = file
        .metadata()
        .with_context(|| format!("cannot stat '{}'", args.file.display()))?
        .len();

    print_start_banner(&args.file, size);

    let sink = select_sink(args.verbose, size, &args.file);
    if args.verbose && sink == TraceSink::Disabled {
        println!(
            "Verbose tracing is available for files up to {} Kb; continuing without it.",
            VERBOSE_LOG_FILE_MAX_SIZE / 1024
        );
    }

    let reader = BufReader::new(file);
    let digest = match &sink {
        TraceSink::Console => {
            let stdout = io::stdout();
            let mut renderer = TraceRenderer::new(stdout.lock(), true);
            renderer.preamble()?;
            digest_reader_with(reader, &mut renderer)?
        }
        TraceSink::LogFile(log_path) => {
            let log = File::create(log_path)
                .with_context(|| format!("cannot create log file '{}'", log_path.display()))?;
            println!("File too large for console verbose output.");
            println!("Verbose logging redirected to: {}", log_path.display());
            let mut renderer = TraceRenderer::new(BufWriter::new(log), false);
            renderer.preamble()?;
            digest_reader_with(reader, &mut renderer)?
        }
        TraceSink::Disabled => digest_reader(reader)?,
    };

    print_result(&args.file, &digest, size, started.elapsed().as_secs_f64());
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_selection_thresholds() {
        let path = Path::new("data.bin");

        assert_eq!(select_sink(false, 10, path), TraceSink::Disabled);
        assert_eq!(select_sink(true, 0, path), TraceSink::Console);
        assert_eq!(select_sink(true, 1024, path), TraceSink::Console);
        assert_eq!(
            select_sink(true, 1025, path),
            TraceSink::LogFile(PathBuf::from("data.bin.sha256.log"))
        );
        assert_eq!(
            select_sink(true, 100 * 1024, path),
            TraceSink::LogFile(PathBuf::from("data.bin.sha256.log"))
        );
        assert_eq!(select_sink(true, 100 * 1024 + 1, path), TraceSink::Disabled);
    }

    #[test]
    fn test_log_file_name_uses_basename() {
        assert_eq!(
            log_file_name(Path::new("/var/tmp/archive.tar")),
            PathBuf::from("archive.tar.sha256.log")
        );
        assert_eq!(
            log_file_name(Path::new("plain.txt")),
            PathBuf::from("plain.txt.sha256.log")
        );
    }

    #[test]
    fn test_human_size_labels() {
        assert_eq!(human_size(500), "500 bytes");
        assert_eq!(human_size(2048), "2 Kb (2048 bytes)");
        assert_eq!(human_size(3 * 1024 * 1024), "3 Mb (3145728 bytes)");
    }

    #[test]
    fn test_box_row_width() {
        // 78 columns between the borders
        assert_eq!(box_row("File: x").chars().count(), 80);
        assert_eq!(box_row("").chars().count(), 80);
    }
}
