//! Issue output formatters.
//!
//! This module provides formatters for writing validation issues
//! in different formats (human-readable, JSON).

pub mod human;
pub mod json;

use crate::lint::Issue;
use std::io::Write;

/// Output format for validation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Trait for formatting validation output.
pub trait IssueFormatter {
    /// Format issues to the given writer.
    fn format<W: Write>(&self, issues: &[Issue], writer: &mut W) -> std::io::Result<()>;
}

/// Write `issues` in the chosen format.
pub fn write_issues<W: Write>(
    format: OutputFormat,
    issues: &[Issue],
    writer: &mut W,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Human => HumanFormatter::new().format(issues, writer),
        OutputFormat::Json => JsonFormatter::new().format(issues, writer),
    }
}

pub use human::HumanFormatter;
pub use json::JsonFormatter;
