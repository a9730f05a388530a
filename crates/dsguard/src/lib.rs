//! # dsguard
//!
//! Design-system compliance checker for React and Next.js projects.
//!
//! This is the main facade crate that re-exports core functionality and
//! the built-in rules.
//!
//! ## Quick Start — `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! dsguard = "0.3"
//! ```
//!
//! ```rust,ignore
//! // tests/design_system.rs
//! dsguard::check!();
//! ```
//!
//! This runs dsguard as part of `cargo test`. Configure via `dsguard.toml`.
//!
//! ## Suppression Directives
//!
//! Use a comment on (or immediately above) the offending line:
//!
//! ```jsx,ignore
//! {/* dsguard: allow(no-raw-html) reason="legacy markup, tracked in UI-412" */}
//! return <div className="legacy" />;
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use dsguard::Scanner;
//! use dsguard::rules::Preset;
//!
//! let scanner = Scanner::builder()
//!     .root("./app")
//!     .build()?;
//!
//! let report = scanner.scan()?;
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use dsguard_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use dsguard_rules::*;
}

mod runner;

#[doc(hidden)]
pub mod __internal {
    pub use crate::runner::run_check;
}

/// Generates a `#[test]` that runs dsguard over the project.
///
/// ```rust,ignore
/// // tests/design_system.rs
/// dsguard::check!();
/// dsguard::check!(preset = "strict");
/// dsguard::check!(preset = "strict", fail_on = "warning");
/// dsguard::check!(config = "configs/dsguard.toml");
/// ```
#[macro_export]
macro_rules! check {
    () => {
        #[test]
        fn dsguard_compliance() {
            $crate::__internal::run_check(None, None, None);
        }
    };
    (preset = $preset:literal) => {
        #[test]
        fn dsguard_compliance() {
            $crate::__internal::run_check(Some($preset), None, None);
        }
    };
    (preset = $preset:literal, fail_on = $fail_on:literal) => {
        #[test]
        fn dsguard_compliance() {
            $crate::__internal::run_check(Some($preset), None, Some($fail_on));
        }
    };
    (fail_on = $fail_on:literal) => {
        #[test]
        fn dsguard_compliance() {
            $crate::__internal::run_check(None, None, Some($fail_on));
        }
    };
    (config = $config:literal) => {
        #[test]
        fn dsguard_compliance() {
            $crate::__internal::run_check(None, Some($config), None);
        }
    };
}
