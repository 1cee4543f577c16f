//! Tile planning for the parallel scan.
//!
//! The planner cuts `[0, file_len)` into tiles. Each tile has a core window
//! and a symmetric halo. Cores partition the file exactly; halos give the
//! detector working a core enough bytes past both edges to close a run that
//! starts near the boundary and to check its terminator. A run is emitted by
//! the one tile whose core contains the run's start byte, so no cross-worker
//! dedupe pass is needed afterwards.

use crate::config::{Config, Encodings};

/// Smallest tile size honoured when an explicit hint is given.
pub const TILE_HINT_FLOOR: usize = 32 * 1024;

/// Bounds for the automatic tile size.
const AUTO_TILE_MIN: usize = 64 * 1024;
const AUTO_TILE_MAX: usize = 2 * 1024 * 1024;

/// One contiguous span of the input handled by a single scan invocation.
///
/// Invariants: `start <= core_start < core_end <= end` (except for the empty
/// input, which yields a single all-zero tile), `core_start - start <= ov`,
/// `end - core_end <= ov`, and adjacent cores butt exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// First byte of the tile, including the left halo.
    pub start: usize,
    /// First byte of the core window.
    pub core_start: usize,
    /// One past the last byte of the core window.
    pub core_end: usize,
    /// One past the last byte of the tile, including the right halo.
    pub end: usize,
    /// Detectors to run over this tile.
    pub encodings: Encodings,
}

/// Halo width in bytes required by the enabled detectors.
///
/// A run of exactly `min_len` units that starts on the last core byte ends
/// `min_len - 1` units past the boundary, plus the terminator when
/// `null_only` is set. UTF-16 doubles both terms. The wider requirement wins.
/// Note that whenever UTF-16 is enabled the result is even, which keeps every
/// tile start on the same byte parity as the file itself.
pub fn overlap_bytes(cfg: &Config) -> usize {
    let term = usize::from(cfg.null_only);
    let ov_ascii = if cfg.encodings.ascii {
        (cfg.min_len - 1) + term
    } else {
        0
    };
    let ov_utf16 = if cfg.encodings.any_utf16() {
        2 * (cfg.min_len - 1) + 2 * term
    } else {
        0
    };
    ov_ascii.max(ov_utf16)
}

/// Cut the input length into tiles.
///
/// `tile_hint` of 0 selects an automatic size from the worker count; a
/// nonzero hint is used directly, raised to [`TILE_HINT_FLOOR`] if smaller.
pub fn plan_tiles(file_len: usize, cfg: &Config, tile_hint: usize) -> Vec<Tile> {
    if file_len == 0 {
        // One empty tile keeps the dispatcher free of special cases.
        return vec![Tile {
            start: 0,
            core_start: 0,
            core_end: 0,
            end: 0,
            encodings: cfg.encodings,
        }];
    }

    let ov = overlap_bytes(cfg);
    let tile = tile_size(file_len, cfg, tile_hint, ov);
    tracing::debug!(file_len, tile, ov, "planned tile geometry");

    let mut tiles = Vec::with_capacity(file_len / tile + 1);
    let mut pos = 0;
    while pos < file_len {
        let core_start = pos;
        let core_end = (pos + tile).min(file_len);
        tiles.push(Tile {
            start: core_start - core_start.min(ov),
            core_start,
            core_end,
            end: core_end + ov.min(file_len - core_end),
            encodings: cfg.encodings,
        });
        pos = core_end;
    }
    tiles
}

fn tile_size(file_len: usize, cfg: &Config, hint: usize, ov: usize) -> usize {
    if hint != 0 {
        return hint.max(TILE_HINT_FLOOR);
    }
    let workers = if cfg.threads == 0 {
        num_cpus::get().max(1)
    } else {
        cfg.threads
    };
    let target = file_len / (4 * workers + 1);
    target
        .clamp(AUTO_TILE_MIN, AUTO_TILE_MAX)
        .max(8 * ov)
        .next_multiple_of(AUTO_TILE_MIN)
}
