use std::path::{Path, PathBuf};

/// Resolved locations of every file the persistence layer owns.
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub out_dir: PathBuf,
    pub arcs_json: PathBuf,
    pub arcs_yml: PathBuf,
    pub episodes_json: PathBuf,
    pub episodes_yml: PathBuf,
    pub status_json: PathBuf,
}

impl ExportPaths {
    pub fn new(out_dir: &Path) -> Self {
        Self {
            out_dir: out_dir.to_path_buf(),
            arcs_json: out_dir.join("arcs.json"),
            arcs_yml: out_dir.join("arcs.yml"),
            episodes_json: out_dir.join("episodes.json"),
            episodes_yml: out_dir.join("episodes.yml"),
            status_json: out_dir.join("status.json"),
        }
    }

    /// The four data files, status excluded.
    pub fn data_files(&self) -> [&PathBuf; 4] {
        [
            &self.arcs_json,
            &self.arcs_yml,
            &self.episodes_json,
            &self.episodes_yml,
        ]
    }
}
