//! Atomic write primitives
//!
//! Each write goes to its own uniquely named temp file in the target's
//! directory, then is renamed over the target. Overlapping writers never
//! share a temp file; the last rename wins.

use crate::errors::{io_error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically replace `target_path` with `content`
///
/// Readers observe either the previous file or the new one, never a mix.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    let parent = match target_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| io_error("create_store_dir", e))?;

    // Same directory as the target so the rename stays on one filesystem
    let mut temp = NamedTempFile::new_in(parent).map_err(|e| io_error("create_store_temp", e))?;

    temp.write_all(content)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| io_error("write_store_temp", e))?;

    // On failure the temp file is removed when `PersistError` drops
    temp.persist(target_path)
        .map_err(|e| io_error("rename_store_temp", e.error))?;

    Ok(())
}
