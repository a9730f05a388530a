//! Rule presets for common configurations.

use crate::{
    no_inline_styles, no_raw_html, no_restricted_imports, MissingErrorBoundary,
    MissingLocaleProvider, MissingThemeProvider, NoInlineStyles, NoRawHtml, NoRestrictedImports,
    RequireEntryPoint,
};
use dsguard_core::{Config, ProjectRuleBox, RuleBox, Severity};

/// Preset configurations for dsguard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Recommended rules with sensible defaults.
    Recommended,
    /// Strict rules for maximum compliance.
    Strict,
    /// Minimal rules for gradual adoption.
    Minimal,
}

impl Preset {
    /// Parses a preset name as written in configuration files.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "strict" => Some(Self::Strict),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    /// Returns the per-file rules for this preset, honoring any
    /// `[rules.<name>]` options in the configuration.
    #[must_use]
    pub fn rules(self, config: &Config) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(config),
            Self::Strict => strict_rules(config),
            Self::Minimal => minimal_rules(config),
        }
    }

    /// Returns the project-wide rules for this preset.
    #[must_use]
    pub fn project_rules(self, config: &Config) -> Vec<ProjectRuleBox> {
        match self {
            Self::Recommended => recommended_project_rules(config),
            Self::Strict => strict_project_rules(config),
            Self::Minimal => Vec::new(),
        }
    }
}

fn raw_html(config: &Config) -> NoRawHtml {
    config
        .rules
        .get(no_raw_html::NAME)
        .map_or_else(NoRawHtml::new, NoRawHtml::from_options)
}

fn inline_styles(config: &Config) -> NoInlineStyles {
    config
        .rules
        .get(no_inline_styles::NAME)
        .map_or_else(NoInlineStyles::new, NoInlineStyles::from_options)
}

fn restricted_imports(config: &Config) -> NoRestrictedImports {
    config
        .rules
        .get(no_restricted_imports::NAME)
        .map_or_else(NoRestrictedImports::new, NoRestrictedImports::from_options)
}

fn error_boundary(config: &Config) -> MissingErrorBoundary {
    config
        .rules
        .get(crate::providers::ERROR_BOUNDARY_NAME)
        .map_or_else(MissingErrorBoundary::new, MissingErrorBoundary::from_options)
}

fn theme_provider(config: &Config) -> MissingThemeProvider {
    config
        .rules
        .get(crate::providers::THEME_PROVIDER_NAME)
        .map_or_else(MissingThemeProvider::new, MissingThemeProvider::from_options)
}

fn locale_provider(config: &Config) -> MissingLocaleProvider {
    config
        .rules
        .get(crate::providers::LOCALE_PROVIDER_NAME)
        .map_or_else(MissingLocaleProvider::new, MissingLocaleProvider::from_options)
}

/// Returns the recommended set of per-file rules.
///
/// Includes:
/// - `no-raw-html` (DS001) - Forbids raw HTML elements
/// - `no-inline-styles` (DS002) - Forbids literal style values
/// - `no-restricted-imports` (DS003) - Forbids competing styling packages
#[must_use]
pub fn recommended_rules(config: &Config) -> Vec<RuleBox> {
    vec![
        Box::new(raw_html(config)),
        Box::new(inline_styles(config)),
        Box::new(restricted_imports(config)),
    ]
}

/// Returns the recommended set of project-wide rules.
///
/// Includes:
/// - `entry-point-not-found` (DS100) - Requires an application entry point
/// - `missing-error-boundary` (DS101) - Requires an error boundary
/// - `missing-theme-provider` (DS102) - Requires the theme provider
/// - `missing-locale-provider` (DS103) - Recommends a locale provider
#[must_use]
pub fn recommended_project_rules(config: &Config) -> Vec<ProjectRuleBox> {
    vec![
        Box::new(RequireEntryPoint::new()),
        Box::new(error_boundary(config)),
        Box::new(theme_provider(config)),
        Box::new(locale_provider(config)),
    ]
}

/// Returns the strict set of per-file rules.
///
/// All recommended rules, with test files no longer exempt.
#[must_use]
pub fn strict_rules(config: &Config) -> Vec<RuleBox> {
    vec![
        Box::new(raw_html(config).allow_in_tests(false)),
        Box::new(inline_styles(config).allow_in_tests(false)),
        Box::new(restricted_imports(config).allow_in_tests(false)),
    ]
}

/// Returns the strict set of project-wide rules.
///
/// All recommended rules, with the locale provider promoted to an error.
#[must_use]
pub fn strict_project_rules(config: &Config) -> Vec<ProjectRuleBox> {
    vec![
        Box::new(RequireEntryPoint::new()),
        Box::new(error_boundary(config)),
        Box::new(theme_provider(config)),
        Box::new(locale_provider(config).severity(Severity::Error)),
    ]
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only includes `no-raw-html`.
#[must_use]
pub fn minimal_rules(config: &Config) -> Vec<RuleBox> {
    vec![Box::new(raw_html(config))]
}

/// Returns all available per-file rules with default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(NoRawHtml::new()),
        Box::new(NoInlineStyles::new()),
        Box::new(NoRestrictedImports::new()),
    ]
}

/// Returns all available project-wide rules with default settings.
#[must_use]
pub fn all_project_rules() -> Vec<ProjectRuleBox> {
    vec![
        Box::new(RequireEntryPoint::new()),
        Box::new(MissingErrorBoundary::new()),
        Box::new(MissingThemeProvider::new()),
        Box::new(MissingLocaleProvider::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_names_round_trip() {
        assert_eq!(Preset::from_name("recommended"), Some(Preset::Recommended));
        assert_eq!(Preset::from_name("strict"), Some(Preset::Strict));
        assert_eq!(Preset::from_name("minimal"), Some(Preset::Minimal));
        assert_eq!(Preset::from_name("other"), None);
    }

    #[test]
    fn presets_are_populated() {
        let config = Config::default();
        assert_eq!(Preset::Recommended.rules(&config).len(), 3);
        assert_eq!(Preset::Recommended.project_rules(&config).len(), 4);
        assert_eq!(Preset::Strict.rules(&config).len(), 3);
        assert_eq!(Preset::Minimal.rules(&config).len(), 1);
        assert!(Preset::Minimal.project_rules(&config).is_empty());
    }

    #[test]
    fn rule_options_flow_through_presets() {
        let config = Config::parse(
            "[rules.no-raw-html]\nelements = [\"marquee\"]\n",
        )
        .expect("config");
        let rules = Preset::Recommended.rules(&config);
        // Construction succeeds with the custom option applied; behavior is
        // covered by the rule's own tests.
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].name(), "no-raw-html");
    }
}
