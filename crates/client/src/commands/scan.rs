//! List the attribute sets in a library directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use sheet_content::{LibraryScan, LibraryScanner};

use super::OutputFormat;
use crate::config::ClientConfig;

/// List the attribute sets in the library
#[derive(Parser)]
pub struct Scan {
    /// Library directory (defaults to SHEET_LIBRARY_DIR or the platform data dir)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Scan {
    pub fn execute(self, config: &ClientConfig) -> Result<()> {
        let root = self.dir.unwrap_or_else(|| config.library_dir.clone());
        if !root.exists() {
            anyhow::bail!(
                "Library directory not found: {}\n\nHint: set SHEET_LIBRARY_DIR or pass --dir",
                root.display()
            );
        }

        let scan = LibraryScanner::new(&root).scan()?;

        match self.format {
            OutputFormat::Summary => print_summary(&root, &scan),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&to_json(&scan))
                    .context("Failed to serialize scan to JSON")?;
                println!("{json}");
            }
        }
        Ok(())
    }
}

fn print_summary(root: &std::path::Path, scan: &LibraryScan) {
    println!("{} {}", style("Library:").bold().cyan(), root.display());
    println!();

    println!(
        "{}",
        style(format!("Attribute Sets ({}):", scan.entries.len()))
            .bold()
            .yellow()
    );
    for entry in &scan.entries {
        let relative = entry.path.strip_prefix(root).unwrap_or(&entry.path);
        println!(
            "  {} - {} attributes",
            relative.display(),
            entry.attributes.len()
        );
    }

    if !scan.failures.is_empty() {
        println!();
        println!(
            "{}",
            style(format!("Skipped ({}):", scan.failures.len()))
                .bold()
                .red()
        );
        for failure in &scan.failures {
            let relative = failure.path.strip_prefix(root).unwrap_or(&failure.path);
            println!("  {}: {}", relative.display(), failure.reason);
        }
    }
}

fn to_json(scan: &LibraryScan) -> serde_json::Value {
    serde_json::json!({
        "entries": scan
            .entries
            .iter()
            .map(|entry| serde_json::json!({
                "path": entry.path.display().to_string(),
                "attributes": entry.attributes.ids().collect::<Vec<_>>(),
            }))
            .collect::<Vec<_>>(),
        "failures": scan
            .failures
            .iter()
            .map(|failure| serde_json::json!({
                "path": failure.path.display().to_string(),
                "reason": failure.reason,
            }))
            .collect::<Vec<_>>(),
    })
}
