//! # dsguard-rules
//!
//! Built-in compliance rules for dsguard.
//!
//! This crate provides the design-system compliance rules that ship with
//! dsguard: per-file rules over the textual source model, and
//! project-wide rules that verify provider wrapping at the application
//! entry point.
//!
//! ## Available Rules
//!
//! | Code  | Name | Description |
//! |-------|------|-------------|
//! | DS001 | `no-raw-html` | Forbids raw HTML elements in JSX |
//! | DS002 | `no-inline-styles` | Forbids literal style values without design tokens |
//! | DS003 | `no-restricted-imports` | Forbids imports from competing styling packages |
//! | DS100 | `entry-point-not-found` | Requires a recognizable application entry point |
//! | DS101 | `missing-error-boundary` | Requires an error boundary at the entry point |
//! | DS102 | `missing-theme-provider` | Requires the theme provider at the entry point |
//! | DS103 | `missing-locale-provider` | Recommends a locale provider (warning only) |
//!
//! ## Usage
//!
//! ```ignore
//! use dsguard_core::Scanner;
//! use dsguard_rules::{NoRawHtml, MissingThemeProvider};
//!
//! let scanner = Scanner::builder()
//!     .root("./src")
//!     .rule(NoRawHtml::new())
//!     .project_rule(MissingThemeProvider::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod entry;
mod no_inline_styles;
mod no_raw_html;
mod no_restricted_imports;
mod presets;
mod providers;

pub use no_inline_styles::NoInlineStyles;
pub use no_raw_html::NoRawHtml;
pub use no_restricted_imports::NoRestrictedImports;
pub use presets::{
    all_project_rules, all_rules, minimal_rules, recommended_project_rules, recommended_rules,
    strict_project_rules, strict_rules, Preset,
};
pub use providers::{
    MissingErrorBoundary, MissingLocaleProvider, MissingThemeProvider, RequireEntryPoint,
};

/// Re-export core types for convenience.
pub use dsguard_core::{ProjectRule, Rule, Severity, Violation};
