//! Input acquisition.
//!
//! The scanner core only ever sees a contiguous read-only byte slice; this
//! module decides where that slice lives. Regular files on POSIX are
//! memory-mapped. Standard input, empty files, and every other platform go
//! through an owned heap buffer.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Error;

/// A loaded input with its origin tag.
///
/// Dropping the buffer releases whichever resource backs it.
#[derive(Debug)]
pub enum InputBuffer {
    /// Heap-owned bytes (stdin, empty files, non-POSIX platforms).
    Owned(Vec<u8>),
    /// Borrowed mapping of a regular file.
    #[cfg(unix)]
    Mapped(memmap2::Mmap),
}

impl InputBuffer {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            InputBuffer::Owned(v) => v,
            #[cfg(unix)]
            InputBuffer::Mapped(m) => m,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// Load a file for scanning.
///
/// Fails with `NotARegularFile` for directories, sockets, and friends, and
/// with `FileTooLarge` when the size does not fit the platform word.
pub fn load_path(path: &Path) -> Result<InputBuffer, Error> {
    let file = File::open(path).map_err(|source| Error::IoOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let meta = file.metadata().map_err(|source| Error::IoOpen {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_file() {
        return Err(Error::NotARegularFile {
            path: path.to_path_buf(),
        });
    }
    let size = usize::try_from(meta.len()).map_err(|_| Error::FileTooLarge { size: meta.len() })?;
    if size == 0 {
        // Mapping a zero-length file is platform-dependent; skip it.
        return Ok(InputBuffer::Owned(Vec::new()));
    }

    #[cfg(unix)]
    {
        let map = unsafe { memmap2::Mmap::map(&file) }
            .map_err(|source| Error::MmapFailed { source })?;
        tracing::debug!(bytes = size, path = %path.display(), "mapped input");
        Ok(InputBuffer::Mapped(map))
    }
    #[cfg(not(unix))]
    {
        let mut buf = Vec::with_capacity(size);
        let mut file = file;
        file.read_to_end(&mut buf)
            .map_err(|source| Error::IoRead { source })?;
        Ok(InputBuffer::Owned(buf))
    }
}

/// Read standard input to a heap buffer.
pub fn load_stdin() -> Result<InputBuffer, Error> {
    let mut buf = Vec::new();
    std::io::stdin()
        .lock()
        .read_to_end(&mut buf)
        .map_err(|source| Error::IoRead { source })?;
    Ok(InputBuffer::Owned(buf))
}
