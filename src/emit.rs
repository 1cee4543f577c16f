//! Record rendering and serialised output.
//!
//! One [`Emitter`] is shared by every worker. Each emit call renders the
//! complete line into a private scratch buffer first, then takes the sink
//! mutex for a single `write_all`. Records therefore never interleave, while
//! rendering itself runs fully in parallel.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::config::Config;
use crate::error::Error;

/// Which detector produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitKind {
    Ascii,
    Utf16Le,
    Utf16Be,
}

impl HitKind {
    /// Stable lowercase name used in both output formats.
    pub fn name(self) -> &'static str {
        match self {
            HitKind::Ascii => "ascii",
            HitKind::Utf16Le => "utf16le",
            HitKind::Utf16Be => "utf16be",
        }
    }
}

/// Shape of one JSON record line.
#[derive(Serialize)]
struct JsonRecord<'a> {
    offset: u64,
    kind: &'static str,
    len: usize,
    text: &'a str,
}

/// Thread-safe line emitter over a generic sink.
///
/// The sink is any `io::Write`; production uses a `BufWriter` around stdout,
/// tests pass a `Vec<u8>` and read it back with [`Emitter::into_inner`].
pub struct Emitter<W: Write> {
    sink: Mutex<W>,
    json: bool,
    render_cap: usize,
    hits: AtomicUsize,
}

impl<W: Write> Emitter<W> {
    pub fn new(sink: W, cfg: &Config) -> Self {
        Emitter {
            sink: Mutex::new(sink),
            json: cfg.json,
            render_cap: cfg.cap_run_bytes,
            hits: AtomicUsize::new(0),
        }
    }

    /// Number of records written so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Recover the sink after all workers have joined.
    pub fn into_inner(self) -> W {
        self.sink
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Emit one ASCII run. `chars` is the detector's unit count; `bytes` is
    /// the run payload (already detector-capped by the caller).
    pub fn emit_ascii(&self, offset: u64, chars: usize, bytes: &[u8]) -> Result<(), Error> {
        let payload = &bytes[..bytes.len().min(self.render_cap)];
        self.write_record(offset, HitKind::Ascii, chars, payload)
    }

    /// Emit one UTF-16LE run. `region` is the raw little-endian byte region
    /// of the run (two bytes per unit).
    pub fn emit_utf16le(&self, offset: u64, chars: usize, region: &[u8]) -> Result<(), Error> {
        let payload = decode_wide(region, self.render_cap, 0);
        self.write_record(offset, HitKind::Utf16Le, chars, &payload)
    }

    /// Emit one UTF-16BE run; see [`Emitter::emit_utf16le`].
    pub fn emit_utf16be(&self, offset: u64, chars: usize, region: &[u8]) -> Result<(), Error> {
        let payload = decode_wide(region, self.render_cap, 1);
        self.write_record(offset, HitKind::Utf16Be, chars, &payload)
    }

    fn write_record(
        &self,
        offset: u64,
        kind: HitKind,
        chars: usize,
        payload: &[u8],
    ) -> Result<(), Error> {
        let mut line: Vec<u8> = Vec::with_capacity(payload.len() + 48);
        if self.json {
            render_json(&mut line, offset, kind, chars, payload)?;
        } else {
            render_text(&mut line, offset, kind, chars, payload)?;
        }
        line.push(b'\n');

        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        sink.write_all(&line)
            .map_err(|source| Error::SinkWrite { source })?;
        self.hits.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Project a UTF-16 byte region down to its ASCII payload.
///
/// The detector only accepts units whose other byte is zero, so decoding is a
/// plain selection of the data byte of each pair. The render cap applies to
/// the raw region before decoding.
fn decode_wide(region: &[u8], render_cap: usize, data_byte: usize) -> Vec<u8> {
    let region = &region[..region.len().min(render_cap)];
    region.chunks_exact(2).map(|unit| unit[data_byte]).collect()
}

fn render_text(
    line: &mut Vec<u8>,
    offset: u64,
    kind: HitKind,
    chars: usize,
    payload: &[u8],
) -> Result<(), Error> {
    write!(line, "{offset:016x} {:<8} len={chars} \"", kind.name())
        .map_err(|source| Error::SinkWrite { source })?;
    for &b in payload {
        match b {
            b'\n' => line.extend_from_slice(b"\\n"),
            b'\r' => line.extend_from_slice(b"\\r"),
            b'\t' => line.extend_from_slice(b"\\t"),
            b'"' => line.extend_from_slice(b"\\\""),
            b'\\' => line.extend_from_slice(b"\\\\"),
            _ => line.push(b),
        }
    }
    line.push(b'"');
    Ok(())
}

fn render_json(
    line: &mut Vec<u8>,
    offset: u64,
    kind: HitKind,
    chars: usize,
    payload: &[u8],
) -> Result<(), Error> {
    // Detector payloads are printable ASCII plus tab/newline/CR, so this is
    // always a borrowed, lossless view.
    let text = String::from_utf8_lossy(payload);
    let record = JsonRecord {
        offset,
        kind: kind.name(),
        len: chars,
        text: &text,
    };
    serde_json::to_writer(line, &record).map_err(|source| Error::SinkWrite {
        source: source.into(),
    })
}
