//! Error types for configuration, input acquisition, and output.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors surfaced by the scanner library.
///
/// Configuration variants are produced by [`crate::Config::validate`] before
/// any scanning starts. Acquisition variants come from the input loader.
/// `SinkWrite` is the only variant that can occur mid-scan; workers report it
/// and move on to their next tile.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Minimum run length below the supported floor of 2 units.
    MinLenTooSmall { got: usize },
    /// Configuration enables no encodings, so no detector would ever run.
    NoEncodingsSelected,
    /// Per-run byte cap of zero.
    InvalidCap,
    /// Input path exists but is not a regular file.
    NotARegularFile { path: PathBuf },
    /// Input size does not fit the platform word.
    FileTooLarge { size: u64 },
    /// Opening the input file failed.
    IoOpen { path: PathBuf, source: io::Error },
    /// Reading the input into memory failed.
    IoRead { source: io::Error },
    /// Memory-mapping the input failed.
    MmapFailed { source: io::Error },
    /// Writing a record through the sink failed.
    SinkWrite { source: io::Error },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MinLenTooSmall { got } => {
                write!(f, "minimum run length must be at least 2, got {got}")
            }
            Error::NoEncodingsSelected => write!(f, "no encodings selected"),
            Error::InvalidCap => write!(f, "run cap must be at least 1 byte"),
            Error::NotARegularFile { path } => {
                write!(f, "not a regular file: {}", path.display())
            }
            Error::FileTooLarge { size } => {
                write!(f, "file of {size} bytes does not fit in memory on this platform")
            }
            Error::IoOpen { path, source } => {
                write!(f, "cannot open {}: {source}", path.display())
            }
            Error::IoRead { source } => write!(f, "read failed: {source}"),
            Error::MmapFailed { source } => write!(f, "mmap failed: {source}"),
            Error::SinkWrite { source } => write!(f, "write failed: {source}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoOpen { source, .. }
            | Error::IoRead { source }
            | Error::MmapFailed { source }
            | Error::SinkWrite { source } => Some(source),
            _ => None,
        }
    }
}
