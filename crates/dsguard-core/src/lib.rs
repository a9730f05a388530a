//! # dsguard-core
//!
//! Core framework for design-system compliance checking.
//!
//! This crate provides the foundational traits and types for building
//! compliance checkers over React/Next.js source trees. It includes:
//!
//! - [`Rule`] trait for per-file textual rules
//! - [`ProjectRule`] trait for project-wide structural checks
//! - [`Scanner`] for orchestrating a one-shot scan
//! - [`Violation`] and [`ComplianceReport`] for representing findings
//! - [`SourceFile`] for the masked textual source model
//!
//! ## Example
//!
//! ```ignore
//! use dsguard_core::Scanner;
//!
//! let scanner = Scanner::builder()
//!     .root("./app")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let report = scanner.scan()?;
//! println!("{}", report.format_report());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod rule;
mod scanner;
mod source;
mod types;

/// Comment-based suppression directives.
pub mod suppression;

pub use config::{Config, ConfigError, RuleConfig, ScannerConfig};
pub use context::{FileContext, ProjectContext};
pub use rule::{ProjectRule, ProjectRuleBox, Rule, RuleBox};
pub use scanner::{ScanError, Scanner, ScannerBuilder};
pub use source::{ImportRecord, JsxTag, SourceFile, SourceLine};
pub use suppression::{check_suppression, SuppressionCheck};
pub use types::{
    ComplianceReport, Location, ScanWarning, Severity, Suggestion, Violation, ViolationDiagnostic,
};
