mod paths;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rle_core::Stats;

/// Environment variable holding the log filter directive (e.g. `debug`).
const LOG_ENV: &str = "RLE_LOG";

// ── CLI definition ─────────────────────────────────────────────────────────

/// The mode word is a literal first argument, not an option, so `-cf` is an
/// unknown mode and the path may itself start with `-`. Help and version are
/// long-only for the same reason.
#[derive(Parser)]
#[command(
    name = "rle",
    about = "Run-length encoding: compress FILE to FILE.rle, or restore FILE from FILE.rle",
    version,
    override_usage = "rle <-c|-d> <FILE>",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    #[arg(value_enum, allow_hyphen_values = true, value_name = "MODE")]
    mode: Mode,
    /// File to compress, or the .rle file to decompress
    #[arg(allow_hyphen_values = true, value_name = "FILE")]
    path: PathBuf,
    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
    /// Print version
    #[arg(long, action = ArgAction::Version)]
    version: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Compress FILE into FILE.rle
    #[value(name = "-c")]
    Compress,
    /// Decompress FILE (must have the .rle extension)
    #[value(name = "-d")]
    Decompress,
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn human_bytes(n: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut v = n as f64;
    let mut unit = 0;
    while v >= 1024.0 && unit < UNITS.len() - 1 {
        v /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", n)
    } else {
        format!("{:.2} {}", v, UNITS[unit])
    }
}

fn print_stats(stats: &Stats, elapsed_secs: f64) {
    eprintln!("  raw size    : {}", human_bytes(stats.raw_bytes));
    eprintln!("  encoded     : {}", human_bytes(stats.encoded_bytes()));
    eprintln!("  packets     : {}", stats.packets);
    eprintln!("  ratio       : {:.2}x", stats.ratio());
    eprintln!("  elapsed     : {:.3}s", elapsed_secs);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Mode implementations ───────────────────────────────────────────────────

fn run_compress(input: &Path) -> anyhow::Result<()> {
    let output = paths::compressed_name(input);

    let src = File::open(input).with_context(|| format!("could not open input file {input:?}"))?;
    let dst = File::create(&output).with_context(|| format!("could not create {output:?}"))?;
    debug!(input = %input.display(), output = %output.display(), "compressing");

    let t0 = Instant::now();
    let stats = rle_core::compress(BufReader::new(src), BufWriter::new(dst))
        .with_context(|| format!("something went wrong while compressing {input:?}"))?;

    eprintln!("{} was compressed to {}", input.display(), output.display());
    print_stats(&stats, t0.elapsed().as_secs_f64());
    Ok(())
}

fn run_decompress(input: &Path) -> anyhow::Result<()> {
    let Some(output) = paths::decompressed_name(input) else {
        bail!("{input:?} is not an .rle file, so decompression can not be done");
    };

    let src = File::open(input).with_context(|| format!("could not open input file {input:?}"))?;
    let dst = File::create(&output)
        .with_context(|| format!("could not create the decompressed file {output:?}"))?;
    debug!(input = %input.display(), output = %output.display(), "decompressing");

    let t0 = Instant::now();
    let stats = rle_core::decompress(BufReader::new(src), BufWriter::new(dst))
        .with_context(|| format!("something went wrong while decompressing {input:?}"))?;

    eprintln!(
        "{} was successfully decompressed to {}",
        input.display(),
        output.display()
    );
    print_stats(&stats, t0.elapsed().as_secs_f64());
    Ok(())
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // clap exits with 2 on bad usage; every failure of this tool is 1.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };
    init_logging();

    match cli.mode {
        Mode::Compress => run_compress(&cli.path),
        Mode::Decompress => run_decompress(&cli.path),
    }
}
