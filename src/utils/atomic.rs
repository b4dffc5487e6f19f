//! Atomic file operations
//!
//! The roster data file is rewritten after every committed change. Writes
//! go through a sibling `.tmp` file that is synced and then renamed over
//! the target, so the file on disk is always either the previous or the
//! next complete roster, never a partial one.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Temp path used while writing `path`
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Atomically write content using a writer function
///
/// # Example
///
/// ```ignore
/// atomic_write_with("data/roster.jsonl", |file| {
///     writeln!(file, "line1")?;
///     Ok(())
/// })?;
/// ```
pub fn atomic_write_with<P, F>(path: P, write_fn: F) -> io::Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let path = path.as_ref();
    let temp_path = temp_path_for(path);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(&temp_path)?;
    if let Err(e) = write_fn(&mut file).and_then(|_| file.sync_all()) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path)
}

/// Remove a temp file left behind by an interrupted write of `path`.
///
/// Returns whether one was found.
pub fn remove_stale_temp(path: &Path) -> io::Result<bool> {
    let temp_path = temp_path_for(path);
    if !temp_path.exists() {
        return Ok(false);
    }
    fs::remove_file(&temp_path)?;
    Ok(true)
}
