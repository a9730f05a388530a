//! Shared output formatting for compliance reports.

use anyhow::Result;
use dsguard_core::{ComplianceReport, Severity};

use crate::OutputFormat;

/// Print a compliance report in the specified format.
pub fn print(report: &ComplianceReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn print_text(report: &ComplianceReport) {
    let (errors, warnings, infos) = report.count_by_severity();

    for violation in &report.violations {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        println!(
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        println!("  {}: {}", severity_indicator, violation.message);
        if !violation.snippet.is_empty() {
            println!("  | {}", violation.snippet);
        }
        if let Some(suggestion) = &violation.suggestion {
            println!("  = help: {}", suggestion.message);
        }
        println!();
    }

    for warning in &report.warnings {
        println!(
            "\x1b[33mwarning\x1b[0m: could not scan {}: {}",
            warning.path.display(),
            warning.message
        );
    }
    if !report.warnings.is_empty() {
        println!();
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, report.files_scanned
    );

    if report.passed() {
        println!("\x1b[32mPASS\x1b[0m");
    } else {
        println!("\x1b[31mFAIL\x1b[0m");
    }
}

fn print_json(report: &ComplianceReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &ComplianceReport) {
    for violation in &report.violations {
        println!(
            "{}:{}:{}: {} [{}] {}",
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
            violation.severity,
            violation.code,
            violation.message,
        );
    }
}
