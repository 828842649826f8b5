//! File-based locking to prevent concurrent runs writing the same output.
//!
//! Uses flock-style advisory locking on a `<output>.lock` file next to the
//! blocklist.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// A guard that holds an exclusive lock for one output file.
/// The lock is released when the guard is dropped.
pub struct LockGuard {
    file: File,
    path: PathBuf,
}

impl LockGuard {
    /// Lock file path used for `output`
    pub fn lock_path(output: &Path) -> PathBuf {
        let mut name = output
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "hostmerge".into());
        name.push(".lock");
        output.with_file_name(name)
    }

    /// Attempt to acquire an exclusive lock for `output`.
    /// Returns an error if another run already holds it.
    pub fn acquire(output: &Path) -> Result<Self> {
        let path = Self::lock_path(output);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        // create+read+write without truncation avoids a race between
        // creating the file and locking it
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .with_context(|| format!("Failed to open lock file: {:?}", path))?;

        file.try_lock_exclusive().map_err(|_| {
            anyhow::anyhow!(
                "Another hostmerge run is already writing {:?}.\n\
                 If you believe this is an error, remove the lock file: {:?}",
                output,
                path
            )
        })?;

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
