//! Filesystem utilities.

use std::path::Path;

use crate::error::Result;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Size of a file in bytes, or `None` if it does not exist.
pub fn file_size(path: impl AsRef<Path>) -> Result<Option<u64>> {
    let path = path.as_ref();
    if path.exists() {
        Ok(Some(std::fs::metadata(path)?.len()))
    } else {
        Ok(None)
    }
}
