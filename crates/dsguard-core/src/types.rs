//! Core types for compliance violations and reports.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for compliance violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail the check.
    Info,
    /// Recommended-but-not-required; never fails the check.
    Warning,
    /// Violation that must be fixed; fails the check.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to the scan root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A suggested fix for a violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A compliance violation found during scanning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "DS001").
    pub code: String,
    /// Rule name (e.g., "no-raw-html").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Primary location of the violation.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Matched source fragment (trimmed line content).
    pub snippet: String,
    /// Optional suggestion for fixing.
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            snippet: String::new(),
            suggestion: None,
        }
    }

    /// Sets the matched snippet for this violation.
    #[must_use]
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code,
            self.rule,
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if !self.snippet.is_empty() {
            let _ = writeln!(output, "  | {}", self.snippet);
        }
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// Converts a Violation to a miette Diagnostic for rich error display.
#[allow(dead_code)] // Public API for miette integration
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        Self {
            message: format!("[{}] {}", v.code, v.message),
            help: v.suggestion.as_ref().map(|s| s.message.clone()),
            span: SourceSpan::from((v.location.offset, v.location.length)),
            label_message: v.rule.clone(),
        }
    }
}

/// A non-fatal problem encountered while scanning a file.
///
/// Unreadable or non-UTF-8 files are skipped and recorded here; the scan
/// always runs to completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// File that could not be scanned.
    pub path: PathBuf,
    /// What went wrong.
    pub message: String,
}

/// Result of running a compliance scan.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// All violations found, sorted by (file, line, column).
    pub violations: Vec<Violation>,
    /// Non-fatal per-file scan problems.
    pub warnings: Vec<ScanWarning>,
    /// Number of files scanned.
    pub files_scanned: usize,
}

impl ComplianceReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the report passes: no error-severity violations.
    ///
    /// Warnings and infos never fail a run.
    #[must_use]
    pub fn passed(&self) -> bool {
        !self.has_errors()
    }

    /// Returns true if there are any error-severity violations.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Counts violations by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let errors = self
            .violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count();
        let warnings = self
            .violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .count();
        let infos = self
            .violations
            .iter()
            .filter(|v| v.severity == Severity::Info)
            .count();
        (errors, warnings, infos)
    }

    /// Counts violations per rule, ordered by rule code.
    #[must_use]
    pub fn counts_by_rule(&self) -> Vec<(String, usize)> {
        let mut counts: std::collections::BTreeMap<String, usize> = std::collections::BTreeMap::new();
        for v in &self.violations {
            *counts.entry(v.rule.clone()).or_insert(0) += 1;
        }
        counts.into_iter().collect()
    }

    /// Formats the full compliance report, grouped by rule.
    ///
    /// Groups are ordered by rule code; entries within a group keep the
    /// scanner's (file, line, column) ordering, so identical inputs always
    /// render byte-identical output.
    #[must_use]
    pub fn format_report(&self) -> String {
        use std::fmt::Write;

        let mut rules: Vec<(&str, &str)> = self
            .violations
            .iter()
            .map(|v| (v.code.as_str(), v.rule.as_str()))
            .collect();
        rules.sort_unstable();
        rules.dedup();

        let mut report = String::new();

        for (code, rule) in rules {
            let group: Vec<&Violation> =
                self.violations.iter().filter(|v| v.rule == rule).collect();
            let _ = writeln!(report, "{rule} ({code}): {} violation(s)", group.len());
            for v in group {
                let _ = writeln!(
                    report,
                    "  {}:{} [{}] {}",
                    v.location.file.display(),
                    v.location.line,
                    v.severity,
                    v.message
                );
                if !v.snippet.is_empty() {
                    let _ = writeln!(report, "    | {}", v.snippet);
                }
            }
            let _ = writeln!(report);
        }

        if !self.warnings.is_empty() {
            let _ = writeln!(report, "Scan warnings:");
            for w in &self.warnings {
                let _ = writeln!(report, "  {}: {}", w.path.display(), w.message);
            }
            let _ = writeln!(report);
        }

        let (errors, warnings, infos) = self.count_by_severity();
        let _ = writeln!(
            report,
            "Found {} error(s), {} warning(s), {} info(s) in {} file(s)",
            errors, warnings, infos, self.files_scanned
        );
        let _ = writeln!(report, "{}", if self.passed() { "PASS" } else { "FAIL" });

        report
    }

    /// Formats violations as a test failure report.
    ///
    /// Produces a human-readable multi-line report suitable for `panic!()`
    /// messages in `cargo test` integration.
    #[must_use]
    pub fn format_test_report(&self, fail_on: Severity) -> String {
        use std::fmt::Write;

        let failing: Vec<&Violation> = self
            .violations
            .iter()
            .filter(|v| v.severity >= fail_on)
            .collect();

        let mut report = String::new();
        let _ = writeln!(report, "\n=== dsguard: {} violation(s) ===\n", failing.len());

        for v in &failing {
            let _ = writeln!(
                report,
                "{} [{}] at {}:{}:{}",
                v.rule,
                v.code,
                v.location.file.display(),
                v.location.line,
                v.location.column,
            );
            let _ = writeln!(report, "  {}: {}", v.severity, v.message);
            if !v.snippet.is_empty() {
                let _ = writeln!(report, "  | {}", v.snippet);
            }
            if let Some(suggestion) = &v.suggestion {
                let _ = writeln!(report, "  = help: {}", suggestion.message);
            }
            let _ = writeln!(report);
        }

        let (errors, warnings, infos) = self.count_by_severity();
        let _ = writeln!(
            report,
            "Total: {} error(s), {} warning(s), {} info(s) in {} file(s)",
            errors, warnings, infos, self.files_scanned
        );

        report
    }

    /// Adds violations and warnings from another report.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.warnings.extend(other.warnings);
        self.files_scanned += other.files_scanned;
    }
}
