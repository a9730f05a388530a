//! Rule to forbid imports from restricted styling packages.
//!
//! # Rationale
//!
//! Competing styling libraries and raw component kits undermine the design
//! system's single source of truth. Applications should import UI from the
//! design-system package only.
//!
//! # Detected Patterns
//!
//! - `import styled from 'styled-components'`
//! - `import { css } from '@emotion/react'`
//! - `const Button = require('react-bootstrap/Button')`
//!
//! # Good Patterns
//!
//! ```jsx
//! import { Box, Text } from '@acme/design-system';
//! ```

use dsguard_core::{FileContext, Location, Rule, Severity, SourceFile, Suggestion, Violation};

/// Rule code for no-restricted-imports.
pub const CODE: &str = "DS003";

/// Rule name for no-restricted-imports.
pub const NAME: &str = "no-restricted-imports";

/// Default denylist of module-specifier prefixes.
const DEFAULT_PREFIXES: &[&str] = &[
    "styled-components",
    "@emotion/",
    "react-bootstrap",
    "@mui/material",
];

/// Forbids imports whose module specifier starts with a restricted prefix.
#[derive(Debug, Clone)]
pub struct NoRestrictedImports {
    severity: Severity,
    prefixes: Vec<String>,
    allow_in_tests: bool,
}

impl Default for NoRestrictedImports {
    fn default() -> Self {
        Self::new()
    }
}

impl NoRestrictedImports {
    /// Creates a new rule with the default prefix denylist.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            prefixes: DEFAULT_PREFIXES.iter().map(ToString::to_string).collect(),
            allow_in_tests: true,
        }
    }

    /// Creates a rule configured from `[rules.no-restricted-imports]`
    /// options.
    ///
    /// Recognized options: `prefixes` (replaces the denylist),
    /// `allow_in_tests`.
    #[must_use]
    pub fn from_options(options: &dsguard_core::RuleConfig) -> Self {
        let mut rule = Self::new();
        let prefixes = options.get_str_array("prefixes");
        if !prefixes.is_empty() {
            rule.prefixes = prefixes;
        }
        rule.allow_in_tests = options.get_bool("allow_in_tests", rule.allow_in_tests);
        rule
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Replaces the prefix denylist.
    #[must_use]
    pub fn prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether test files are exempt (default: true).
    #[must_use]
    pub fn allow_in_tests(mut self, allow: bool) -> Self {
        self.allow_in_tests = allow;
        self
    }

    fn restricted_prefix(&self, source: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|p| source.starts_with(p.as_str()))
            .map(String::as_str)
    }
}

impl Rule for NoRestrictedImports {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids imports from packages that compete with the design system"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, source: &SourceFile) -> Vec<Violation> {
        if ctx.is_test && self.allow_in_tests {
            return Vec::new();
        }

        source
            .imports
            .iter()
            .filter_map(|imp| {
                let prefix = self.restricted_prefix(&imp.source)?;
                let offset = ctx.offset_for(imp.line, imp.column);
                Some(
                    Violation::new(
                        CODE,
                        NAME,
                        self.severity,
                        Location::new(ctx.relative_path.clone(), imp.line, imp.column)
                            .with_span(offset, imp.source.len()),
                        format!("restricted import '{}'", imp.source),
                    )
                    .with_snippet(source.snippet(imp.line))
                    .with_suggestion(Suggestion::new(format!(
                        "Import the equivalent component from the design-system package instead of '{prefix}'"
                    ))),
                )
            })
            .collect()
    }
}
