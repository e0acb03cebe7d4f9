use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use std::fs;
use std::path::Path;

/// Current UTC time as an RFC3339 string with seconds precision.
pub fn now_rfc3339_utc() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("failed to create {}", path.display()))
}

/// True when `path` exists and its content equals `fresh`, with leading
/// and trailing whitespace trimmed on both sides. A missing or unreadable
/// file counts as changed.
pub fn content_unchanged(path: &Path, fresh: &[u8]) -> bool {
    match fs::read(path) {
        Ok(old) => old.trim_ascii() == fresh.trim_ascii(),
        Err(_) => false,
    }
}
