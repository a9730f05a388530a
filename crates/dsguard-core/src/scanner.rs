//! Scanner for orchestrating compliance checks.

use crate::config::{Config, RuleConfig};
use crate::context::{FileContext, ProjectContext};
use crate::rule::{ProjectRule, ProjectRuleBox, Rule, RuleBox};
use crate::source::SourceFile;
use crate::suppression;
use crate::types::{ComplianceReport, ScanWarning, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while building or running a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// IO error resolving paths.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scan root does not exist or is not a directory.
    #[error("Scan root {path} does not exist or is not a directory")]
    InvalidRoot {
        /// Path that was rejected.
        path: PathBuf,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring a [`Scanner`].
#[derive(Default)]
pub struct ScannerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    project_rules: Vec<ProjectRuleBox>,
    exclude_patterns: Vec<String>,
    extensions: Vec<String>,
    config: Option<Config>,
}

impl ScannerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to scan.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a per-file rule to the scanner.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed per-file rule to the scanner.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds a project-wide rule to the scanner.
    #[must_use]
    pub fn project_rule<R: ProjectRule + 'static>(mut self, rule: R) -> Self {
        self.project_rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed project-wide rule to the scanner.
    #[must_use]
    pub fn project_rule_box(mut self, rule: ProjectRuleBox) -> Self {
        self.project_rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Overrides the tracked file extensions.
    #[must_use]
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the scanner.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidRoot`] if the root directory does not
    /// exist or is not a directory. This is the fatal-input check: it runs
    /// before any file is read.
    pub fn build(self) -> Result<Scanner, ScanError> {
        let config = self.config.unwrap_or_default();

        let root = self.root.unwrap_or_else(|| config.scanner.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        if !root.is_dir() {
            return Err(ScanError::InvalidRoot { path: root });
        }

        // Builder excludes extend the configured (or default) set.
        let mut exclude_patterns = config.scanner.exclude.clone();
        exclude_patterns.extend(self.exclude_patterns);

        let extensions = if self.extensions.is_empty() {
            config.scanner.extensions.clone()
        } else {
            self.extensions
        };

        Ok(Scanner {
            root,
            rules: self.rules,
            project_rules: self.project_rules,
            exclude_patterns,
            extensions,
            config,
        })
    }
}

/// The scanner that orchestrates compliance checks.
///
/// Use [`Scanner::builder()`] to construct an instance. Each call to
/// [`Scanner::scan`] is a one-shot, stateless pass over the file tree.
pub struct Scanner {
    root: PathBuf,
    rules: Vec<RuleBox>,
    project_rules: Vec<ProjectRuleBox>,
    exclude_patterns: Vec<String>,
    extensions: Vec<String>,
    config: Config,
}

impl Scanner {
    /// Creates a new builder for configuring a scanner.
    #[must_use]
    pub fn builder() -> ScannerBuilder {
        ScannerBuilder::new()
    }

    /// Returns the root directory being scanned.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len() + self.project_rules.len()
    }

    /// Scans all files and returns the compliance report.
    ///
    /// Unreadable files and directories never abort the run; they are
    /// recorded as scan warnings and the remaining files are still checked.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails.
    pub fn scan(&self) -> Result<ComplianceReport, ScanError> {
        info!("Starting scan at {:?}", self.root);

        let mut report = ComplianceReport::new();
        let files = self.discover_files(&mut report.warnings)?;

        info!("Found {} files to scan", files.len());

        for file_path in &files {
            match std::fs::read_to_string(file_path) {
                Ok(content) => {
                    report
                        .violations
                        .extend(self.check_file(file_path, &content));
                    report.files_scanned += 1;
                }
                Err(e) => {
                    warn!("Skipping unreadable file {}: {}", file_path.display(), e);
                    report.warnings.push(ScanWarning {
                        path: self.relative(file_path),
                        message: e.to_string(),
                    });
                }
            }
        }

        let project_ctx = ProjectContext::new(&self.root).with_source_files(files);

        for rule in &self.project_rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let violations = rule.check_project(&project_ctx);
            let violations = self.apply_severity_override(rule.name(), violations);
            report.violations.extend(violations);
        }

        // Deterministic ordering: file path lexical, then line, then column.
        report.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });

        info!(
            "Scan complete: {} violations in {} files",
            report.violations.len(),
            report.files_scanned
        );

        Ok(report)
    }

    /// Runs all enabled file rules against one file, then drops violations
    /// covered by a suppression directive.
    fn check_file(&self, path: &Path, content: &str) -> Vec<Violation> {
        debug!("Scanning: {}", path.display());

        let source = SourceFile::parse(content);
        let ctx = FileContext::new(path, content, &self.root);
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx, &source);
            let rule_violations = self.apply_severity_override(rule.name(), rule_violations);
            violations.extend(rule_violations);
        }

        violations.retain(|v| {
            let suppressed = suppression::is_suppressed(content, v.location.line, &v.rule);
            if suppressed {
                debug!(
                    "Suppressed {} at {}:{}",
                    v.rule,
                    v.location.file.display(),
                    v.location.line
                );
            }
            !suppressed
        });

        violations
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers all source files to scan, sorted for determinism.
    ///
    /// Unreadable directories do not abort discovery; they are recorded in
    /// `warnings` and the remaining tree is still walked.
    fn discover_files(&self, warnings: &mut Vec<ScanWarning>) -> Result<Vec<PathBuf>, ScanError> {
        let mut files = Vec::new();

        for ext in &self.extensions {
            // Both patterns so root-level files are found regardless of how
            // `**` treats zero components.
            let patterns = [
                format!("{}/*.{ext}", self.root.display()),
                format!("{}/**/*.{ext}", self.root.display()),
            ];
            for pattern in &patterns {
                for entry in glob::glob(pattern)? {
                    let path = match entry {
                        Ok(path) => path,
                        Err(e) => {
                            warn!("Skipping unreadable path {}: {}", e.path().display(), e.error());
                            let warning_path = self.relative(e.path());
                            // The same directory can fail once per pattern.
                            if !warnings.iter().any(|w| w.path == warning_path) {
                                warnings.push(ScanWarning {
                                    path: warning_path,
                                    message: e.error().to_string(),
                                });
                            }
                            continue;
                        }
                    };

                    if self.should_exclude(&path) {
                        debug!("Excluding: {}", path.display());
                        continue;
                    }

                    files.push(path);
                }
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/node_modules/**"
            let normalized_pattern = pattern.replace("**", "");
            if !normalized_pattern.is_empty() && path_str.contains(&normalized_pattern) {
                return true;
            }
        }

        false
    }

    /// Makes a path relative to the scan root for reporting.
    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }

    /// Gets the rule configuration for a specific rule.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.config.rules.get(rule_name)
    }
}
