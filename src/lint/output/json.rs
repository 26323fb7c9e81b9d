//! JSON output formatter.
//!
//! Formats validation issues as machine-readable JSON for tooling integration.

use super::IssueFormatter;
use crate::lint::{Issue, IssueKind, IssuePayload, Severity};
use crate::rule::RuleRef;
use serde::Serialize;
use std::io::Write;

/// Formats issues as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    issues: Vec<JsonIssue<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonIssue<'a> {
    kind: IssueKind,
    severity: Severity,
    description: &'static str,
    message: String,
    rules: &'a [RuleRef],
    payload: &'a IssuePayload,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    critical: usize,
    high: usize,
    medium: usize,
    low: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueFormatter for JsonFormatter {
    fn format<W: Write>(&self, issues: &[Issue], writer: &mut W) -> std::io::Result<()> {
        let json_issues: Vec<_> = issues
            .iter()
            .map(|i| JsonIssue {
                kind: i.kind,
                severity: i.severity(),
                description: i.kind.description(),
                message: i.message(),
                rules: &i.rules,
                payload: &i.payload,
            })
            .collect();

        let count = |severity: Severity| issues.iter().filter(|i| i.severity() == severity).count();
        let summary = JsonSummary {
            total: issues.len(),
            critical: count(Severity::Critical),
            high: count(Severity::High),
            medium: count(Severity::Medium),
            low: count(Severity::Low),
        };

        let output = JsonOutput {
            issues: json_issues,
            summary,
        };

        serde_json::to_writer_pretty(writer, &output).map_err(std::io::Error::other)?;

        Ok(())
    }
}
