//! Evaluate a formula from the command line.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use sheet_content::CharacterLoader;
use sheet_core::Evaluator;
use sheet_core::expression::NoVariables;

use crate::config::ClientConfig;

/// Evaluate a formula, optionally against a character
#[derive(Parser)]
pub struct Eval {
    /// Formula text, e.g. "($dx + $ht) / 4"
    #[arg(value_name = "FORMULA")]
    formula: String,

    /// Character file supplying `$id` variables
    #[arg(short, long, value_name = "FILE")]
    character: Option<PathBuf>,

    /// Truncate the result to an integer
    #[arg(short, long)]
    integer: bool,
}

impl Eval {
    pub fn execute(self, config: &ClientConfig) -> Result<()> {
        let output = match &self.character {
            Some(path) => {
                let character = CharacterLoader::load(path, &config.sheet)?;
                let resolver = character.resolver();
                self.run(&Evaluator::new(&resolver))?
            }
            None => self.run(&Evaluator::new(&NoVariables))?,
        };
        println!("{output}");
        Ok(())
    }

    fn run(&self, evaluator: &Evaluator<'_>) -> Result<String> {
        let output = if self.integer {
            evaluator.evaluate_to_integer(&self.formula)?.to_string()
        } else {
            evaluator.evaluate(&self.formula)?.to_string()
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(formula: &str, integer: bool) -> Eval {
        Eval {
            formula: formula.to_string(),
            character: None,
            integer,
        }
    }

    #[test]
    fn formats_plain_and_integer_results() {
        let evaluator = Evaluator::new(&NoVariables);
        assert_eq!(eval("7 / 2", false).run(&evaluator).unwrap(), "3.5");
        assert_eq!(eval("7 / 2", true).run(&evaluator).unwrap(), "3");
        assert!(eval("1 +", false).run(&evaluator).is_err());
    }
}
