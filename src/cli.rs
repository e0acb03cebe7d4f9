use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Debug, Parser)]
#[command(
    name = "arcvault",
    version,
    about = "Reconcile fan-edit episode metadata into an append-only archive and export it as JSON/YAML"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize, reconcile, and export a fetched arc list.
    Export {
        /// JSON file with the parsed arc list from the fetch layer.
        #[arg(long)]
        input: PathBuf,
        /// Output directory; defaults to configuration.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Inspect the output directory and the last export summary.
    Status {
        /// Output directory; defaults to configuration.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let report = match cli.command {
        Command::Export { input, out_dir } => commands::export::run(&input, out_dir.as_deref())?,
        Command::Status { out_dir } => commands::status::run(out_dir.as_deref())?,
    };

    for detail in &report.details {
        println!("{detail}");
    }
    for issue in &report.issues {
        eprintln!("issue: {issue}");
    }
    if !report.ok {
        anyhow::bail!("{} finished with issues", report.command);
    }
    Ok(())
}
