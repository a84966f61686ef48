//! Command implementations.
//!
//! Each command owns its CLI args and an `execute` method.

mod defaults;
mod eval;
mod scan;
mod show;

pub use defaults::Defaults;
pub use eval::Eval;
pub use scan::Scan;
pub use show::Show;

/// Output format shared by the inspection commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human readable table
    Summary,
    /// JSON on stdout
    Json,
}
