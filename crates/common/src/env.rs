//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the record store is opened.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the data file's directory exists; note when the file itself is absent.
pub fn ensure_data_dir(data_file: &Path) -> anyhow::Result<()> {
    if let Some(dir) = data_file.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    }
    if data_file.is_dir() {
        anyhow::bail!("{} is a directory, expected a JSON file", data_file.display());
    }
    if data_file.exists() {
        info!(data_file = %data_file.display(), "using existing data file");
    } else {
        warn!(data_file = %data_file.display(), "data file not found; it will be created on first save");
    }
    Ok(())
}
