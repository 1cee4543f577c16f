//! Run detectors for printable ASCII and ASCII-range UTF-16.
//!
//! Both detectors walk one tile slice and report every qualifying run whose
//! start byte lies inside the tile's core window. The halo bytes around the
//! core are visible to the detector (so it can close a run and check its
//! terminator) but never own an emission; that single rule is what makes the
//! parallel scan emit each run exactly once.

use std::io::Write;
use std::ops::Range;

use memchr::memchr_iter;

use crate::config::Config;
use crate::emit::{Emitter, HitKind};
use crate::error::Error;

/// Printable ASCII: space through tilde, plus tab, newline, carriage return.
#[inline]
pub fn is_printable_ascii(b: u8) -> bool {
    b.is_ascii_graphic() || matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Scan a slice for printable-ASCII runs.
///
/// `base` is the absolute file offset of `slice[0]`; `core` is the tile core
/// expressed relative to `slice`. A run longer than the cap yields exactly
/// one record at its start with `chars` equal to the cap; the remainder is
/// consumed silently.
pub fn scan_ascii<W: Write>(
    cfg: &Config,
    base: u64,
    core: Range<usize>,
    slice: &[u8],
    emitter: &Emitter<W>,
) -> Result<(), Error> {
    if cfg.null_only {
        return scan_ascii_terminated(cfg, base, core, slice, emitter);
    }

    let cap = cfg.cap_run_bytes;
    let mut i = 0;
    while i < slice.len() {
        if !is_printable_ascii(slice[i]) {
            i += 1;
            continue;
        }
        let start = i;
        while i < slice.len() && is_printable_ascii(slice[i]) {
            i += 1;
        }
        let full = i - start;
        // Only a run the cap actually truncated skips the length floor; a
        // run of exactly cap bytes was stopped by its own end, not the cap.
        if core.contains(&start) && (full >= cfg.min_len || full > cap) {
            let chars = full.min(cap);
            emitter.emit_ascii(base + start as u64, chars, &slice[start..start + chars])?;
        }
    }
    Ok(())
}

/// `null_only` ASCII strategy: every qualifying run ends at a NUL, so jump
/// between NULs and walk back over the printable tail of each gap. A run
/// whose terminator falls outside the slice is dropped, same as the forward
/// machine closing an unterminated run at the slice edge.
fn scan_ascii_terminated<W: Write>(
    cfg: &Config,
    base: u64,
    core: Range<usize>,
    slice: &[u8],
    emitter: &Emitter<W>,
) -> Result<(), Error> {
    let cap = cfg.cap_run_bytes;
    for nul in memchr_iter(0, slice) {
        let mut start = nul;
        while start > 0 && is_printable_ascii(slice[start - 1]) {
            start -= 1;
        }
        let full = nul - start;
        if full == 0 || !core.contains(&start) {
            continue;
        }
        if full < cfg.min_len && full <= cap {
            continue;
        }
        let chars = full.min(cap);
        emitter.emit_ascii(base + start as u64, chars, &slice[start..start + chars])?;
    }
    Ok(())
}

/// Scan a slice for UTF-16LE runs of ASCII-range code units.
pub fn scan_utf16le<W: Write>(
    cfg: &Config,
    base: u64,
    core: Range<usize>,
    slice: &[u8],
    emitter: &Emitter<W>,
) -> Result<(), Error> {
    scan_utf16(cfg, base, core, slice, HitKind::Utf16Le, emitter)
}

/// Scan a slice for UTF-16BE runs of ASCII-range code units.
pub fn scan_utf16be<W: Write>(
    cfg: &Config,
    base: u64,
    core: Range<usize>,
    slice: &[u8],
    emitter: &Emitter<W>,
) -> Result<(), Error> {
    scan_utf16(cfg, base, core, slice, HitKind::Utf16Be, emitter)
}

/// Stride-2 state machine shared by both byte orders.
///
/// Only even slice offsets are examined; a single stray byte ahead of an
/// otherwise valid sequence shifts its parity and suppresses detection. Runs
/// reaching `cap_run_bytes` are chunked: each full chunk is emitted
/// immediately and the machine restarts on the following unit.
fn scan_utf16<W: Write>(
    cfg: &Config,
    base: u64,
    core: Range<usize>,
    slice: &[u8],
    kind: HitKind,
    emitter: &Emitter<W>,
) -> Result<(), Error> {
    let cap = cfg.cap_run_bytes;
    let mut i = 0;
    let mut start = 0usize;
    let mut chars = 0usize;

    while i + 1 < slice.len() {
        let accepted = match kind {
            HitKind::Utf16Le => slice[i + 1] == 0 && is_printable_ascii(slice[i]),
            _ => slice[i] == 0 && is_printable_ascii(slice[i + 1]),
        };
        if accepted {
            if chars == 0 {
                start = i;
            }
            chars += 1;
            i += 2;
            if 2 * chars >= cap {
                // Oversize run: emit this chunk unconditionally (length floor
                // and terminator rule do not apply to chunked emissions).
                if core.contains(&start) {
                    emit_wide(emitter, kind, base + start as u64, chars, &slice[start..i])?;
                }
                chars = 0;
            }
        } else {
            if chars > 0 {
                let terminated = slice[i] == 0 && slice[i + 1] == 0;
                close_wide(cfg, base, &core, slice, start, chars, terminated, kind, emitter)?;
                chars = 0;
            }
            i += 2;
        }
    }

    if chars > 0 {
        // Open run at the slice edge: no terminator is observable.
        close_wide(cfg, base, &core, slice, start, chars, false, kind, emitter)?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn close_wide<W: Write>(
    cfg: &Config,
    base: u64,
    core: &Range<usize>,
    slice: &[u8],
    start: usize,
    chars: usize,
    terminated: bool,
    kind: HitKind,
    emitter: &Emitter<W>,
) -> Result<(), Error> {
    if chars < cfg.min_len {
        return Ok(());
    }
    if cfg.null_only && !terminated {
        return Ok(());
    }
    if !core.contains(&start) {
        return Ok(());
    }
    emit_wide(
        emitter,
        kind,
        base + start as u64,
        chars,
        &slice[start..start + 2 * chars],
    )
}

fn emit_wide<W: Write>(
    emitter: &Emitter<W>,
    kind: HitKind,
    offset: u64,
    chars: usize,
    region: &[u8],
) -> Result<(), Error> {
    match kind {
        HitKind::Utf16Be => emitter.emit_utf16be(offset, chars, region),
        _ => emitter.emit_utf16le(offset, chars, region),
    }
}
