use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::commands::CommandReport;
use crate::vault::config::load_config;
use crate::vault::paths::ExportPaths;
use crate::vault::status;

pub fn run(out_dir_flag: Option<&Path>) -> Result<CommandReport> {
    let cfg = load_config()?;
    let out_dir = out_dir_flag
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&cfg.export.out_dir));
    let paths = ExportPaths::new(&out_dir);

    let mut report = CommandReport::new("status");
    report.detail(format!("out_dir={}", paths.out_dir.display()));

    if !paths.out_dir.exists() {
        report.issue(format!(
            "output directory {} does not exist; run `arcvault export` first",
            paths.out_dir.display()
        ));
        return Ok(report);
    }

    for path in paths.data_files() {
        if !path.exists() {
            report.issue(format!("missing data file {}", path.display()));
        }
    }

    match status::load(&paths.status_json)? {
        Some(summary) => {
            report.detail(format!("updated_at={}", summary.updated_at));
            report.detail(format!("arcs={}", summary.arcs));
            report.detail(format!("episodes={}", summary.episodes));
        }
        None => report.issue(format!("missing {}", paths.status_json.display())),
    }

    Ok(report)
}
