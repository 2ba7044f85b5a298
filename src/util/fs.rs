//! Filesystem utilities.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::core::{AutohdrError, Result};

/// Read an input file's raw bytes, distinguishing a missing path from an
/// unreadable one.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(AutohdrError::InputMissing {
            path: path.to_path_buf(),
        });
    }
    fs::read(path).map_err(|source| AutohdrError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Read an input file that must be UTF-8 text (results files, manifests).
pub fn read_input(path: &Path) -> Result<String> {
    let bytes = read_bytes(path)?;
    String::from_utf8(bytes).map_err(|e| AutohdrError::InputUnreadable {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Write `contents` to `path` atomically.
///
/// The content goes to a temporary file next to the destination which is
/// then renamed over it, so a pre-existing output is never truncated by a
/// failed write. Parent directories are created as needed.
pub fn write_atomic(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    let contents = contents.as_ref();
    let unwritable = |source: io::Error| AutohdrError::OutputUnwritable {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent).map_err(unwritable)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(unwritable)?;
    tmp.write_all(contents).map_err(unwritable)?;
    tmp.flush().map_err(unwritable)?;
    tmp.persist(path).map_err(|e| unwritable(e.error))?;

    tracing::debug!("wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}
