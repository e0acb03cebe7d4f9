use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::vault::archive::{EpisodesArchive, reconcile};
use crate::vault::config::StatusPolicy;
use crate::vault::model::Arc;
use crate::vault::normalize::normalize_arc_ids;
use crate::vault::paths::ExportPaths;
use crate::vault::status::ExportStatus;
use crate::vault::util::{content_unchanged, ensure_dir};
use crate::vault::warn;

#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub arcs: usize,
    pub archive_entries: usize,
    pub added_entries: usize,
    pub files_written: Vec<PathBuf>,
    pub status_written: bool,
}

/// Load the persisted archive from a prior run. A missing file starts an
/// empty archive; an unparsable one is warned about and treated the same
/// way so one bad file never blocks future exports.
pub fn load_archive(paths: &ExportPaths) -> EpisodesArchive {
    let path = &paths.episodes_json;
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return EpisodesArchive::new(),
    };

    match serde_json::from_str(&raw) {
        Ok(archive) => archive,
        Err(err) => {
            warn::emit(
                "ARCHIVE_UNPARSABLE",
                "load",
                &path.display().to_string(),
                "starting from empty archive; prior history is not recoverable this run",
                &err.to_string(),
            );
            EpisodesArchive::new()
        }
    }
}

fn encode_json<T: Serialize>(target: &'static str, value: &T) -> Result<Vec<u8>, ExportError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|source| ExportError::EncodeJson { target, source })?;
    Ok(format!("{text}\n").into_bytes())
}

fn encode_yaml<T: Serialize>(target: &'static str, value: &T) -> Result<Vec<u8>, ExportError> {
    let text =
        serde_yaml::to_string(value).map_err(|source| ExportError::EncodeYaml { target, source })?;
    Ok(text.into_bytes())
}

/// Whole-buffer write, skipped when the on-disk content already matches
/// modulo surrounding whitespace. Returns true when bytes landed.
fn write_if_changed(path: &Path, fresh: &[u8]) -> Result<bool, ExportError> {
    if content_unchanged(path, fresh) {
        return Ok(false);
    }
    fs::write(path, fresh).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Full pipeline over an already-parsed arc list: normalize ids, merge
/// into the persisted archive, and materialize the output directory.
pub fn run_export(arcs: Vec<Arc>, out_dir: &Path, policy: StatusPolicy) -> Result<ExportOutcome> {
    let paths = ExportPaths::new(out_dir);
    ensure_dir(&paths.out_dir)?;

    let arcs = normalize_arc_ids(arcs);
    let previous = load_archive(&paths);
    let reconciled = reconcile(&arcs, previous);

    persist(&arcs, &reconciled.archive, reconciled.added, &paths, policy)
}

/// Materialize both serialization formats of the arc list and the
/// archive, rewriting only files whose content actually differs, then
/// the status summary per policy.
pub fn persist(
    arcs: &[Arc],
    archive: &EpisodesArchive,
    added_entries: usize,
    paths: &ExportPaths,
    policy: StatusPolicy,
) -> Result<ExportOutcome> {
    // Encode everything up front: an encode failure must leave the
    // directory untouched for this pass.
    let arcs_json = encode_json("arcs", &arcs)?;
    let arcs_yml = encode_yaml("arcs", &arcs)?;
    let episodes_json = encode_json("episodes archive", archive)?;
    let episodes_yml = encode_yaml("episodes archive", archive)?;

    let buffers: [(&PathBuf, &Vec<u8>); 4] = [
        (&paths.arcs_json, &arcs_json),
        (&paths.arcs_yml, &arcs_yml),
        (&paths.episodes_json, &episodes_json),
        (&paths.episodes_yml, &episodes_yml),
    ];

    let mut files_written = Vec::new();
    for (path, bytes) in buffers {
        if write_if_changed(path, bytes)? {
            files_written.push(path.clone());
        }
    }

    let data_changed = !files_written.is_empty();
    let status_written = data_changed || policy == StatusPolicy::Always;
    if status_written {
        let status = ExportStatus::now(arcs.len(), archive.len());
        let bytes = encode_json("status", &status)?;
        fs::write(&paths.status_json, &bytes).map_err(|source| ExportError::Write {
            path: paths.status_json.clone(),
            source,
        })?;
        files_written.push(paths.status_json.clone());
    }

    Ok(ExportOutcome {
        arcs: arcs.len(),
        archive_entries: archive.len(),
        added_entries,
        files_written,
        status_written,
    })
}
