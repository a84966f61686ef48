//! Print a character file's attributes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use sheet_content::CharacterLoader;
use sheet_core::{Character, CharacterFile, ThresholdOps};

use super::OutputFormat;
use crate::config::ClientConfig;

/// Show a character file's attributes
#[derive(Parser)]
pub struct Show {
    /// Character file to read
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Show {
    pub fn execute(self, config: &ClientConfig) -> Result<()> {
        let character = CharacterLoader::load(&self.path, &config.sheet)?;

        match self.format {
            OutputFormat::Summary => {
                println!(
                    "{} {}",
                    style("Character:").bold().cyan(),
                    self.path.display()
                );
                println!();
                print_summary(&character);
            }
            OutputFormat::Json => {
                let file = CharacterFile::capture(&character);
                let json = serde_json::to_string_pretty(&file)
                    .context("Failed to serialize character to JSON")?;
                println!("{json}");
            }
        }
        Ok(())
    }
}

fn print_summary(character: &Character) {
    println!("{}", style("Attributes:").bold().yellow());
    for attribute in character.attributes() {
        let Some(def) = attribute.def(character) else {
            continue;
        };
        let value = if def.kind.is_decimal() {
            format!("{:.2}", attribute.double_value(character))
        } else {
            attribute.int_value(character).to_string()
        };
        let mut line = format!(
            "  {:<14} {:>6}  [{:>4} pts]",
            def.combined_name(),
            value,
            attribute.point_cost(character)
        );
        if def.is_pool() {
            line.push_str(&format!(
                "  current {}/{}",
                attribute.current(character),
                attribute.maximum(character)
            ));
            if let Some(threshold) = attribute.current_threshold(character) {
                line.push_str(&format!(" ({})", threshold.state));
            }
        }
        println!("{line}");
    }
    println!();

    println!("{}", style("Totals:").bold().yellow());
    println!("  Points: {}", character.attribute_points());
    println!("  Size Modifier: {}", character.profile().size_modifier);

    let active: Vec<String> = ThresholdOps::all()
        .iter()
        .filter(|op| character.is_threshold_op_met(*op))
        .flat_map(|op| op.keys())
        .collect();
    if !active.is_empty() {
        println!("  Penalties: {}", active.join(", "));
    }
}
