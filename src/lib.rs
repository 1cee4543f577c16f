//! # stringer - parallel string extraction for binary triage
//!
//! This library scans a byte buffer for maximal runs of printable ASCII and
//! ASCII-range UTF-16 code units, the way `strings(1)` does, and emits one
//! newline-terminated record per run with its absolute byte offset, kind,
//! unit length, and rendered text.
//!
//! The scan is parallel and exactly-once: the input is cut into tiles whose
//! core windows partition the file, each tile carries a halo wide enough for
//! a detector to close any run starting in its core, and a run is emitted
//! only by the tile that owns its start byte. Workers pull tiles from a
//! shared atomic counter and render records locally; a single mutex guards
//! the final sink write, so lines never interleave.
//!
//! ## Usage
//!
//! ```no_run
//! use stringer::{scan_buffer, Config};
//!
//! let data = std::fs::read("target_binary").unwrap();
//! let out = scan_buffer(&data, &Config::new(4), Vec::new()).unwrap();
//! print!("{}", String::from_utf8_lossy(&out));
//! ```

pub mod config;
pub mod dispatch;
pub mod emit;
pub mod error;
pub mod input;
pub mod plan;
pub mod scan;

pub use config::{Config, Encodings, DEFAULT_CAP_RUN_BYTES, DEFAULT_MIN_LEN};
pub use emit::{Emitter, HitKind};
pub use error::Error;
pub use input::{load_path, load_stdin, InputBuffer};
pub use plan::{overlap_bytes, plan_tiles, Tile};

use std::io::Write;

/// Scan a buffer with an automatically sized plan and return the sink.
pub fn scan_buffer<W: Write + Send>(data: &[u8], cfg: &Config, sink: W) -> Result<W, Error> {
    scan_buffer_with_hint(data, cfg, 0, sink)
}

/// Scan a buffer with an explicit tile-size hint (0 = auto).
///
/// The hint controls tile geometry only; emitted records are the same for
/// any plan as long as runs stay shorter than the halo.
pub fn scan_buffer_with_hint<W: Write + Send>(
    data: &[u8],
    cfg: &Config,
    tile_hint: usize,
    sink: W,
) -> Result<W, Error> {
    cfg.validate()?;
    let tiles = plan_tiles(data.len(), cfg, tile_hint);
    let emitter = Emitter::new(sink, cfg);
    dispatch::run_plan(data, cfg, &tiles, &emitter);
    Ok(emitter.into_inner())
}
