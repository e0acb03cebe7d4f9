use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::vault::util::now_rfc3339_utc;

/// Derived summary written next to the data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportStatus {
    pub updated_at: String,
    pub arcs: usize,
    pub episodes: usize,
}

impl ExportStatus {
    pub fn now(arcs: usize, episodes: usize) -> Self {
        Self {
            updated_at: now_rfc3339_utc(),
            arcs,
            episodes,
        }
    }
}

/// Read a previously written status file. Missing file yields `None`;
/// an unreadable or unparsable one is a real error since we wrote it.
pub fn load(path: &Path) -> Result<Option<ExportStatus>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let parsed: ExportStatus = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(parsed))
}
