//! Output formats for command results.

use clap::ValueEnum;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
}
