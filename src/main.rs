//! stringer - parallel string extraction CLI
//!
//! Scan a binary (or stdin) for ASCII and UTF-16 strings and print one
//! record per hit.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process;
use stringer::{Config, Encodings};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stringer")]
#[command(author, about = "Parallel string extraction for binary triage")]
#[command(disable_version_flag = true)]
#[command(long_about = "
stringer scans binaries and memory dumps for embedded strings: maximal runs
of printable ASCII bytes and of ASCII-range UTF-16 code units. Every hit is
printed as one line carrying its absolute file offset, encoding, length in
units, and text. Large inputs are scanned by multiple workers; output order
is not sorted.

EXAMPLES:
    stringer malware.exe                 # ASCII + UTF-16LE, text output
    stringer -m 6 -e ascii malware.exe   # longer ASCII runs only
    stringer -n -j firmware.bin          # NUL-terminated runs as JSONL
    cat dump.raw | stringer -            # scan stdin
")]
struct Cli {
    /// Input file, or `-` to read standard input
    #[arg(value_name = "FILE")]
    path: Option<String>,

    /// Minimum run length in units (bytes for ascii, code units for utf16)
    #[arg(short = 'm', long, default_value_t = stringer::DEFAULT_MIN_LEN, value_name = "N")]
    min_len: usize,

    /// Encodings to scan: comma list of ascii, utf16le, utf16be, all
    #[arg(short = 'e', long, default_value = "ascii,utf16le", value_name = "LIST")]
    enc: String,

    /// Worker threads, or `auto` to match the CPU count
    #[arg(
        short = 't',
        long,
        default_value = "auto",
        value_parser = parse_threads,
        value_name = "N|auto"
    )]
    threads: usize,

    /// Emit one JSON object per hit instead of text columns
    #[arg(short = 'j', long)]
    json: bool,

    /// Only report runs immediately followed by a NUL terminator
    #[arg(short = 'n', long)]
    null_only: bool,

    /// Per-run cap in bytes, applied while scanning and again when rendering
    #[arg(short = 'c', long, default_value_t = stringer::DEFAULT_CAP_RUN_BYTES, value_name = "N")]
    cap_run_bytes: usize,

    /// Print version and exit
    #[arg(short = 'v', long)]
    version: bool,
}

fn parse_threads(s: &str) -> Result<usize, String> {
    if s == "auto" {
        return Ok(0);
    }
    s.parse::<usize>()
        .map_err(|_| format!("expected a number or `auto`, got `{s}`"))
}

fn parse_encodings(list: &str) -> Result<Encodings> {
    let mut enc = Encodings::none();
    for item in list.split(',') {
        match item.trim() {
            "ascii" => enc.ascii = true,
            "utf16le" => enc.utf16le = true,
            "utf16be" => enc.utf16be = true,
            "all" => enc = Encodings::all(),
            other => anyhow::bail!(
                "unknown encoding `{other}` (expected ascii, utf16le, utf16be, all)"
            ),
        }
    }
    Ok(enc)
}

fn build_config(cli: &Cli) -> Result<Config> {
    let encodings = parse_encodings(&cli.enc)?;
    let cfg = Config::new(cli.min_len)
        .with_encodings(encodings)
        .with_threads(cli.threads)
        .with_json(cli.json)
        .with_null_only(cli.null_only)
        .with_cap_run_bytes(cli.cap_run_bytes);
    cfg.validate()?;
    Ok(cfg)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(path: &str, cfg: &Config) -> Result<()> {
    let input = if path == "-" {
        stringer::load_stdin()
    } else {
        stringer::load_path(Path::new(path))
    }?;

    let stdout = io::stdout();
    let sink = BufWriter::new(stdout);
    let mut sink = stringer::scan_buffer(input.as_bytes(), cfg, sink)?;
    sink.flush().context("flushing output failed")?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if cli.version {
        println!("stringer {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let Some(path) = cli.path.as_deref() else {
        eprintln!("stringer: missing input file (use `-` for stdin)");
        process::exit(2);
    };

    let cfg = match build_config(&cli) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("stringer: {err}");
            process::exit(2);
        }
    };

    if let Err(err) = run(path, &cfg) {
        eprintln!("stringer: {err:#}");
        process::exit(1);
    }
}
