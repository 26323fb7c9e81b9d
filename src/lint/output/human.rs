//! Human-readable output formatter.
//!
//! Formats validation issues for terminal display.

use super::IssueFormatter;
use crate::lint::{Issue, Severity};
use std::io::Write;

/// Formats issues for human consumption.
#[derive(Debug, Default)]
pub struct HumanFormatter {
    /// Append the issue kind's description as a note.
    pub show_description: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self) -> Self {
        self.show_description = true;
        self
    }
}

fn count(issues: &[Issue], severity: Severity) -> usize {
    issues.iter().filter(|i| i.severity() == severity).count()
}

impl IssueFormatter for HumanFormatter {
    fn format<W: Write>(&self, issues: &[Issue], writer: &mut W) -> std::io::Result<()> {
        for issue in issues {
            // Header line: medium[dangling_detection]: message
            writeln!(
                writer,
                "{}[{}]: {}",
                issue.severity(),
                issue.kind,
                issue.message()
            )?;

            for rule in &issue.rules {
                writeln!(writer, "  --> {}", rule)?;
            }

            if self.show_description {
                writeln!(writer, "   = note: {}", issue.kind.description())?;
            }

            writeln!(writer)?;
        }

        if !issues.is_empty() {
            writeln!(
                writer,
                "Found {} issue(s): {} critical, {} high, {} medium, {} low",
                issues.len(),
                count(issues, Severity::Critical),
                count(issues, Severity::High),
                count(issues, Severity::Medium),
                count(issues, Severity::Low)
            )?;
        }

        Ok(())
    }
}
