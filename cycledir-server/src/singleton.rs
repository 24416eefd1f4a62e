//! Ensure only one cycledir-server writes to a data directory at a time.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File};
use std::path::Path;

const LOCK_FILE: &str = ".server.lock";

/// A lock guard that releases the lock when dropped
pub struct LockGuard {
    _file: File,
}

/// Acquire an exclusive lock on `data_dir`, failing if another instance holds it
pub fn acquire_lock(data_dir: &Path) -> Result<LockGuard> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

    let path = data_dir.join(LOCK_FILE);
    let file = File::create(&path).context("Failed to create lock file")?;

    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "Another cycledir-server instance is already using {}.\n\
            If you believe this is an error, remove: {}",
            data_dir.display(),
            path.display()
        )
    })?;

    Ok(LockGuard { _file: file })
}
