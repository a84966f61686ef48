//! Write the standard attribute set.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use sheet_content::AttributeSetLoader;
use sheet_core::AttributeDefs;

/// Write the standard attribute set to a file
#[derive(Parser)]
pub struct Defaults {
    /// Destination file
    #[arg(value_name = "FILE")]
    output: PathBuf,

    /// Replace the file if it already exists
    #[arg(short, long)]
    force: bool,
}

impl Defaults {
    pub fn execute(self) -> Result<()> {
        if self.output.exists() && !self.force {
            anyhow::bail!(
                "Refusing to overwrite {} (use --force)",
                self.output.display()
            );
        }

        let attributes = AttributeDefs::standard();
        AttributeSetLoader::save(&self.output, &attributes)?;

        println!(
            "{} {} attributes to {}",
            style("Wrote").bold().green(),
            attributes.len(),
            self.output.display()
        );
        Ok(())
    }
}
