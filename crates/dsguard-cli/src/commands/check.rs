//! Check command implementation.

use anyhow::{Context, Result};
use dsguard_core::{Config, ProjectRuleBox, RuleBox, Scanner};
use dsguard_rules::{
    MissingErrorBoundary, MissingLocaleProvider, MissingThemeProvider, NoInlineStyles, NoRawHtml,
    NoRestrictedImports, Preset, RequireEntryPoint,
};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::{OutputFormat, PresetArg};

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    preset_arg: Option<PresetArg>,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<()> {
    let config = source.load()?;
    tracing::info!("Using {source}");

    let preset = resolve_preset(preset_arg, &config);

    let mut builder = Scanner::builder().root(path).config(config.clone());

    for pattern in exclude {
        builder = builder.exclude(pattern);
    }

    let (rules, project_rules) = if let Some(filter) = rules_filter {
        let names: Vec<&str> = filter.split(',').map(str::trim).collect();
        filter_rules(&names)
    } else {
        (preset.rules(&config), preset.project_rules(&config))
    };

    for rule in rules {
        builder = builder.rule_box(rule);
    }
    for rule in project_rules {
        builder = builder.project_rule_box(rule);
    }

    let scanner = builder.build().context("Failed to build scanner")?;

    tracing::info!("Scanning {:?} with {} rules", path, scanner.rule_count());

    let report = scanner.scan().context("Scan failed")?;

    super::output::print(&report, format)?;

    // Exit with error code if the check failed
    if report.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Resolves the effective preset: CLI flag, then configured preset, then
/// recommended.
fn resolve_preset(arg: Option<PresetArg>, config: &Config) -> Preset {
    if let Some(arg) = arg {
        return arg.into();
    }

    if let Some(name) = &config.preset {
        if let Some(preset) = Preset::from_name(name) {
            return preset;
        }
        tracing::warn!("Unknown preset '{}', falling back to recommended", name);
    }

    Preset::Recommended
}

fn filter_rules(names: &[&str]) -> (Vec<RuleBox>, Vec<ProjectRuleBox>) {
    let mut rules: Vec<RuleBox> = Vec::new();
    let mut project_rules: Vec<ProjectRuleBox> = Vec::new();

    for name in names {
        match *name {
            "no-raw-html" | "DS001" => rules.push(Box::new(NoRawHtml::new())),
            "no-inline-styles" | "DS002" => rules.push(Box::new(NoInlineStyles::new())),
            "no-restricted-imports" | "DS003" => {
                rules.push(Box::new(NoRestrictedImports::new()));
            }
            "entry-point-not-found" | "DS100" => {
                project_rules.push(Box::new(RequireEntryPoint::new()));
            }
            "missing-error-boundary" | "DS101" => {
                project_rules.push(Box::new(MissingErrorBoundary::new()));
            }
            "missing-theme-provider" | "DS102" => {
                project_rules.push(Box::new(MissingThemeProvider::new()));
            }
            "missing-locale-provider" | "DS103" => {
                project_rules.push(Box::new(MissingLocaleProvider::new()));
            }
            _ => tracing::warn!("Unknown rule: {}", name),
        }
    }

    (rules, project_rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_names_and_codes() {
        let (rules, project_rules) = filter_rules(&["no-raw-html", "DS102"]);
        assert_eq!(rules.len(), 1);
        assert_eq!(project_rules.len(), 1);
        assert_eq!(rules[0].name(), "no-raw-html");
        assert_eq!(project_rules[0].name(), "missing-theme-provider");
    }

    #[test]
    fn filter_skips_unknown_rules() {
        let (rules, project_rules) = filter_rules(&["no-such-rule"]);
        assert!(rules.is_empty());
        assert!(project_rules.is_empty());
    }

    #[test]
    fn cli_preset_overrides_config() {
        let config = Config::parse("preset = \"minimal\"").expect("config");
        assert_eq!(
            resolve_preset(Some(PresetArg::Strict), &config),
            Preset::Strict
        );
        assert_eq!(resolve_preset(None, &config), Preset::Minimal);
    }

    #[test]
    fn unknown_config_preset_falls_back_to_recommended() {
        let config = Config::parse("preset = \"everything\"").expect("config");
        assert_eq!(resolve_preset(None, &config), Preset::Recommended);
    }
}
