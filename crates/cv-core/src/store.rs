//! On-disk persistence for the CV document.
//!
//! Saves are whole-document replacements: the new content goes to a temp
//! file in the same directory and is renamed over the original, so a
//! reader never observes a partial write. Each save of an existing
//! document first snapshots it into `backups/`, keeping the 5 most
//! recent snapshots.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

const BACKUP_DIR: &str = "backups";
const BACKUP_PREFIX: &str = "cv-";
const MAX_BACKUPS: usize = 5;

/// Reads and parses the document. A missing file is fatal for callers,
/// so it gets its own error variant.
pub fn load_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::DocumentMissing(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Replaces the document atomically, snapshotting the previous content
/// first. Concurrent writers race; last write wins.
pub fn save_document(path: &Path, doc: &Value) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    if path.exists() {
        snapshot(path, parent)?;
    }

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    serde_json::to_writer_pretty(&mut tmp, doc)?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

/// Copies the current document into the backup directory under a
/// millisecond-precision UTC timestamp, then prunes old snapshots.
fn snapshot(path: &Path, parent: &Path) -> Result<()> {
    let dir = parent.join(BACKUP_DIR);
    fs::create_dir_all(&dir)?;

    let stamp = Utc::now().format("%Y%m%dT%H%M%S%3f");
    let mut dest = dir.join(format!("{BACKUP_PREFIX}{stamp}.json"));
    // Two saves inside the same millisecond still get distinct snapshots.
    let mut seq = 1;
    while dest.exists() {
        dest = dir.join(format!("{BACKUP_PREFIX}{stamp}-{seq}.json"));
        seq += 1;
    }

    fs::copy(path, &dest)?;
    debug!(snapshot = %dest.display(), "document snapshotted");
    prune(&dir)
}

fn prune(dir: &Path) -> Result<()> {
    let mut snapshots: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| {
            p.extension().is_some_and(|ext| ext == "json")
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(BACKUP_PREFIX))
        })
        .collect();

    // Timestamped names sort chronologically.
    snapshots.sort();
    while snapshots.len() > MAX_BACKUPS {
        let oldest = snapshots.remove(0);
        fs::remove_file(&oldest)?;
        debug!(snapshot = %oldest.display(), "old snapshot pruned");
    }
    Ok(())
}
