//! Worker pool driving the detectors across a tile plan.
//!
//! A single atomic counter hands out tile indices; workers fetch-add until
//! the plan is exhausted. With one effective worker the loop runs on the
//! calling thread. A failing tile is logged and skipped; sibling workers and
//! the remaining tiles are unaffected.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::config::Config;
use crate::emit::Emitter;
use crate::error::Error;
use crate::plan::Tile;
use crate::scan::{scan_ascii, scan_utf16be, scan_utf16le};

/// Resolve the effective worker count for a plan.
pub fn worker_count(cfg: &Config, tiles: usize) -> usize {
    let configured = if cfg.threads == 0 {
        num_cpus::get()
    } else {
        cfg.threads
    };
    configured.min(tiles).max(1)
}

/// Run every enabled detector over every tile, then return once all workers
/// have joined. Emission order across workers is unspecified.
pub fn run_plan<W: Write + Send>(
    data: &[u8],
    cfg: &Config,
    tiles: &[Tile],
    emitter: &Emitter<W>,
) {
    let workers = worker_count(cfg, tiles.len());
    let next = AtomicUsize::new(0);
    tracing::debug!(tiles = tiles.len(), workers, "dispatching scan");

    if workers == 1 {
        drain_tiles(data, cfg, tiles, &next, emitter);
    } else {
        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| drain_tiles(data, cfg, tiles, &next, emitter));
            }
        });
    }
    tracing::debug!(hits = emitter.hits(), "scan complete");
}

fn drain_tiles<W: Write>(
    data: &[u8],
    cfg: &Config,
    tiles: &[Tile],
    next: &AtomicUsize,
    emitter: &Emitter<W>,
) {
    loop {
        let idx = next.fetch_add(1, Ordering::Relaxed);
        let Some(tile) = tiles.get(idx) else { break };
        if let Err(err) = scan_tile(data, cfg, tile, emitter) {
            tracing::warn!(tile = idx, %err, "tile scan failed");
        }
    }
}

/// Run the enabled detectors, in fixed order, over one tile.
fn scan_tile<W: Write>(
    data: &[u8],
    cfg: &Config,
    tile: &Tile,
    emitter: &Emitter<W>,
) -> Result<(), Error> {
    let slice = &data[tile.start..tile.end];
    let base = tile.start as u64;
    let core = (tile.core_start - tile.start)..(tile.core_end - tile.start);

    if tile.encodings.ascii {
        scan_ascii(cfg, base, core.clone(), slice, emitter)?;
    }
    if tile.encodings.utf16le {
        scan_utf16le(cfg, base, core.clone(), slice, emitter)?;
    }
    if tile.encodings.utf16be {
        scan_utf16be(cfg, base, core, slice, emitter)?;
    }
    Ok(())
}
