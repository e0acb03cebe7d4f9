use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::commands::CommandReport;
use crate::vault::config::load_config;
use crate::vault::export::run_export;
use crate::vault::ingest;

pub fn run(input: &Path, out_dir_flag: Option<&Path>) -> Result<CommandReport> {
    let cfg = load_config()?;
    let out_dir = out_dir_flag
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&cfg.export.out_dir));

    let mut report = CommandReport::new("export");
    report.detail(format!("input={}", input.display()));
    report.detail(format!("out_dir={}", out_dir.display()));

    let arcs = ingest::load_arcs(input)?;
    report.detail(format!("arcs_loaded={}", arcs.len()));

    let outcome = run_export(arcs, &out_dir, cfg.export.status_policy)?;

    report.detail(format!("arcs={}", outcome.arcs));
    report.detail(format!("archive_entries={}", outcome.archive_entries));
    report.detail(format!("new_entries={}", outcome.added_entries));
    if outcome.files_written.is_empty() {
        report.detail("unchanged: no files rewritten");
    } else {
        for path in &outcome.files_written {
            report.detail(format!("wrote={}", path.display()));
        }
    }
    report.detail(format!("status_written={}", outcome.status_written));

    Ok(report)
}
