//! Scan configuration.
//!
//! A [`Config`] is built once by the caller (the CLI in the shipped binary),
//! validated, and then shared read-only by every worker.

use crate::error::Error;

/// Default minimum run length in units.
pub const DEFAULT_MIN_LEN: usize = 2;

/// Default per-run cap in bytes, applied by the detectors and again when
/// rendering.
pub const DEFAULT_CAP_RUN_BYTES: usize = 4096;

/// Which detectors run over a tile.
///
/// Copied into every [`crate::plan::Tile`] so a tile is self-describing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encodings {
    pub ascii: bool,
    pub utf16le: bool,
    pub utf16be: bool,
}

impl Encodings {
    /// The default selection: ASCII plus UTF-16LE.
    pub fn default_set() -> Self {
        Encodings {
            ascii: true,
            utf16le: true,
            utf16be: false,
        }
    }

    /// Every supported encoding.
    pub fn all() -> Self {
        Encodings {
            ascii: true,
            utf16le: true,
            utf16be: true,
        }
    }

    /// No encoding enabled. Invalid as a final configuration; useful as a
    /// starting point when accumulating `--enc` list items.
    pub fn none() -> Self {
        Encodings {
            ascii: false,
            utf16le: false,
            utf16be: false,
        }
    }

    pub fn any(&self) -> bool {
        self.ascii || self.utf16le || self.utf16be
    }

    /// True when either UTF-16 byte order is enabled.
    pub fn any_utf16(&self) -> bool {
        self.utf16le || self.utf16be
    }
}

/// Immutable scan settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Minimum run length in units (bytes for ASCII, 16-bit units for UTF-16).
    pub min_len: usize,
    /// Enabled detectors.
    pub encodings: Encodings,
    /// Worker count; 0 means probe the CPU count at dispatch time.
    pub threads: usize,
    /// Emit JSON objects instead of text columns.
    pub json: bool,
    /// Only report runs immediately followed by a NUL terminator.
    pub null_only: bool,
    /// Upper bound on how many bytes of one run are consumed and rendered.
    pub cap_run_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_MIN_LEN)
    }
}

impl Config {
    pub fn new(min_len: usize) -> Self {
        Config {
            min_len,
            encodings: Encodings::default_set(),
            threads: 0,
            json: false,
            null_only: false,
            cap_run_bytes: DEFAULT_CAP_RUN_BYTES,
        }
    }

    pub fn with_encodings(mut self, encodings: Encodings) -> Self {
        self.encodings = encodings;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn with_null_only(mut self, null_only: bool) -> Self {
        self.null_only = null_only;
        self
    }

    pub fn with_cap_run_bytes(mut self, cap: usize) -> Self {
        self.cap_run_bytes = cap;
        self
    }

    /// Check the configuration once before any planning or scanning.
    pub fn validate(&self) -> Result<(), Error> {
        if self.min_len < 2 {
            return Err(Error::MinLenTooSmall { got: self.min_len });
        }
        if !self.encodings.any() {
            return Err(Error::NoEncodingsSelected);
        }
        if self.cap_run_bytes == 0 {
            return Err(Error::InvalidCap);
        }
        Ok(())
    }
}
