use crate::error::{Error, Result};
use crate::models::Snapshot;
use std::fs;
use std::path::Path;

fn unavailable(path: &Path, source: std::io::Error) -> Error {
    Error::FileUnavailable {
        path: path.to_path_buf(),
        source,
    }
}

/// Reads a JSON snapshot from `path`.
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let content = fs::read_to_string(path).map_err(|e| unavailable(path, e))?;
    let snapshot = serde_json::from_str(&content)?;
    Ok(snapshot)
}

pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let json = serde_json::to_string(snapshot)?;
    fs::write(path, json).map_err(|e| unavailable(path, e))
}

pub fn write_log(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| unavailable(path, e))
}
