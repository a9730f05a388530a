//! Project-wide rules that verify provider wrapping at the entry point.
//!
//! A compliant application mounts its component tree inside the design
//! system's providers: an error boundary, the theme provider, and
//! (warning-only) a locale provider. These rules locate the entry files
//! via [`crate::entry`] and check that at least one accepted provider
//! component appears in each.
//!
//! When no entry point exists at all, [`RequireEntryPoint`] reports a
//! single finding and the provider rules stay silent, so a misdetected
//! project never produces a cascade of missing-provider errors.
//! [`RequireEntryPoint`] also owns unreadable entry files: each one gets
//! an error finding, and the provider rules only check entries that could
//! actually be read.

use crate::entry;
use dsguard_core::{
    Location, ProjectContext, ProjectRule, Severity, SourceFile, Suggestion, Violation,
};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Rule code for entry-point-not-found.
pub const ENTRY_POINT_CODE: &str = "DS100";
/// Rule name for entry-point-not-found.
pub const ENTRY_POINT_NAME: &str = "entry-point-not-found";

/// Rule code for missing-error-boundary.
pub const ERROR_BOUNDARY_CODE: &str = "DS101";
/// Rule name for missing-error-boundary.
pub const ERROR_BOUNDARY_NAME: &str = "missing-error-boundary";

/// Rule code for missing-theme-provider.
pub const THEME_PROVIDER_CODE: &str = "DS102";
/// Rule name for missing-theme-provider.
pub const THEME_PROVIDER_NAME: &str = "missing-theme-provider";

/// Rule code for missing-locale-provider.
pub const LOCALE_PROVIDER_CODE: &str = "DS103";
/// Rule name for missing-locale-provider.
pub const LOCALE_PROVIDER_NAME: &str = "missing-locale-provider";

const DEFAULT_ERROR_BOUNDARIES: &[&str] = &["ErrorBoundary", "AppErrorBoundary"];
const DEFAULT_THEME_PROVIDERS: &[&str] = &["ThemeProvider", "DesignSystemProvider"];
const DEFAULT_LOCALE_PROVIDERS: &[&str] = &["LocaleProvider", "IntlProvider", "I18nProvider"];

/// Reads and parses each entry file, splitting readable entries from the
/// ones that failed to read.
fn entry_sources(ctx: &ProjectContext) -> (Vec<(PathBuf, SourceFile)>, Vec<(PathBuf, String)>) {
    let mut readable = Vec::new();
    let mut unreadable = Vec::new();

    for path in entry::find_entry_points(ctx) {
        let relative = path
            .strip_prefix(ctx.root)
            .map_or_else(|_| path.clone(), Path::to_path_buf);
        match std::fs::read_to_string(&path) {
            Ok(content) => readable.push((relative, SourceFile::parse(&content))),
            Err(e) => {
                warn!("Could not read entry point {}: {}", path.display(), e);
                unreadable.push((relative, e.to_string()));
            }
        }
    }

    (readable, unreadable)
}

/// Reports entry files where none of the accepted provider components
/// appears.
fn check_entry_providers(
    ctx: &ProjectContext,
    code: &'static str,
    name: &'static str,
    severity: Severity,
    components: &[String],
    missing: &str,
) -> Vec<Violation> {
    let (entries, _) = entry_sources(ctx);
    if entries.is_empty() {
        // RequireEntryPoint owns this case, whether the entry point is
        // missing or just unreadable.
        return Vec::new();
    }

    entries
        .into_iter()
        .filter(|(_, source)| !components.iter().any(|c| source.has_tag(c)))
        .map(|(relative, _)| {
            Violation::new(
                code,
                name,
                severity,
                Location::new(relative, 1, 1),
                format!("entry point does not render {missing}"),
            )
            .with_suggestion(Suggestion::new(format!(
                "Wrap the application in one of: {}",
                components
                    .iter()
                    .map(|c| format!("<{c}>"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )))
        })
        .collect()
}

fn default_components(defaults: &[&str]) -> Vec<String> {
    defaults.iter().map(ToString::to_string).collect()
}

fn components_from_options(
    options: &dsguard_core::RuleConfig,
    defaults: &[&str],
) -> Vec<String> {
    let configured = options.get_str_array("components");
    if configured.is_empty() {
        default_components(defaults)
    } else {
        configured
    }
}

/// Requires that the project has a recognizable application entry point.
#[derive(Debug, Clone, Default)]
pub struct RequireEntryPoint;

impl RequireEntryPoint {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProjectRule for RequireEntryPoint {
    fn name(&self) -> &'static str {
        ENTRY_POINT_NAME
    }

    fn code(&self) -> &'static str {
        ENTRY_POINT_CODE
    }

    fn description(&self) -> &'static str {
        "Requires a recognizable application entry point"
    }

    fn check_project(&self, ctx: &ProjectContext) -> Vec<Violation> {
        if entry::find_entry_points(ctx).is_empty() {
            return vec![Violation::new(
                ENTRY_POINT_CODE,
                ENTRY_POINT_NAME,
                Severity::Error,
                Location::new(PathBuf::from("."), 0, 0),
                "no application entry point found",
            )
            .with_suggestion(Suggestion::new(
                "Expected one of pages/_app.*, app/layout.*, src/main.*, or src/index.*",
            ))];
        }

        // Entry files that exist but cannot be read are just as unverifiable
        // as a missing entry point.
        let (_, unreadable) = entry_sources(ctx);
        unreadable
            .into_iter()
            .map(|(relative, error)| {
                Violation::new(
                    ENTRY_POINT_CODE,
                    ENTRY_POINT_NAME,
                    Severity::Error,
                    Location::new(relative, 0, 0),
                    format!("entry point could not be read: {error}"),
                )
                .with_suggestion(Suggestion::new(
                    "Provider wrapping cannot be verified for an unreadable entry point",
                ))
            })
            .collect()
    }
}

/// Requires an error boundary around the application entry point.
#[derive(Debug, Clone)]
pub struct MissingErrorBoundary {
    severity: Severity,
    components: Vec<String>,
}

impl Default for MissingErrorBoundary {
    fn default() -> Self {
        Self::new()
    }
}

impl MissingErrorBoundary {
    /// Creates the rule with the default accepted components.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            components: default_components(DEFAULT_ERROR_BOUNDARIES),
        }
    }

    /// Creates a rule configured from `[rules.missing-error-boundary]`
    /// options. Recognized options: `components`.
    #[must_use]
    pub fn from_options(options: &dsguard_core::RuleConfig) -> Self {
        Self {
            severity: Severity::Error,
            components: components_from_options(options, DEFAULT_ERROR_BOUNDARIES),
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Replaces the accepted component names.
    #[must_use]
    pub fn components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = components.into_iter().map(Into::into).collect();
        self
    }
}

impl ProjectRule for MissingErrorBoundary {
    fn name(&self) -> &'static str {
        ERROR_BOUNDARY_NAME
    }

    fn code(&self) -> &'static str {
        ERROR_BOUNDARY_CODE
    }

    fn description(&self) -> &'static str {
        "Requires an error boundary around the application entry point"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check_project(&self, ctx: &ProjectContext) -> Vec<Violation> {
        check_entry_providers(
            ctx,
            ERROR_BOUNDARY_CODE,
            ERROR_BOUNDARY_NAME,
            self.severity,
            &self.components,
            "an error boundary",
        )
    }
}

/// Requires the design-system theme provider at the entry point.
#[derive(Debug, Clone)]
pub struct MissingThemeProvider {
    severity: Severity,
    components: Vec<String>,
}

impl Default for MissingThemeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MissingThemeProvider {
    /// Creates the rule with the default accepted components.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            components: default_components(DEFAULT_THEME_PROVIDERS),
        }
    }

    /// Creates a rule configured from `[rules.missing-theme-provider]`
    /// options. Recognized options: `components`.
    #[must_use]
    pub fn from_options(options: &dsguard_core::RuleConfig) -> Self {
        Self {
            severity: Severity::Error,
            components: components_from_options(options, DEFAULT_THEME_PROVIDERS),
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Replaces the accepted component names.
    #[must_use]
    pub fn components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = components.into_iter().map(Into::into).collect();
        self
    }
}

impl ProjectRule for MissingThemeProvider {
    fn name(&self) -> &'static str {
        THEME_PROVIDER_NAME
    }

    fn code(&self) -> &'static str {
        THEME_PROVIDER_CODE
    }

    fn description(&self) -> &'static str {
        "Requires the theme provider around the application entry point"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check_project(&self, ctx: &ProjectContext) -> Vec<Violation> {
        check_entry_providers(
            ctx,
            THEME_PROVIDER_CODE,
            THEME_PROVIDER_NAME,
            self.severity,
            &self.components,
            "the theme provider",
        )
    }
}

/// Recommends a locale provider at the entry point. Warning severity by
/// default, so a missing locale provider never fails the run on its own.
#[derive(Debug, Clone)]
pub struct MissingLocaleProvider {
    severity: Severity,
    components: Vec<String>,
}

impl Default for MissingLocaleProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MissingLocaleProvider {
    /// Creates the rule with the default accepted components.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            components: default_components(DEFAULT_LOCALE_PROVIDERS),
        }
    }

    /// Creates a rule configured from `[rules.missing-locale-provider]`
    /// options. Recognized options: `components`.
    #[must_use]
    pub fn from_options(options: &dsguard_core::RuleConfig) -> Self {
        Self {
            severity: Severity::Warning,
            components: components_from_options(options, DEFAULT_LOCALE_PROVIDERS),
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Replaces the accepted component names.
    #[must_use]
    pub fn components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = components.into_iter().map(Into::into).collect();
        self
    }
}

impl ProjectRule for MissingLocaleProvider {
    fn name(&self) -> &'static str {
        LOCALE_PROVIDER_NAME
    }

    fn code(&self) -> &'static str {
        LOCALE_PROVIDER_CODE
    }

    fn description(&self) -> &'static str {
        "Recommends a locale provider around the application entry point"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check_project(&self, ctx: &ProjectContext) -> Vec<Violation> {
        check_entry_providers(
            ctx,
            LOCALE_PROVIDER_CODE,
            LOCALE_PROVIDER_NAME,
            self.severity,
            &self.components,
            "a locale provider",
        )
    }
}
