//! Rule traits for defining compliance rules.

use crate::context::{FileContext, ProjectContext};
use crate::source::SourceFile;
use crate::types::{Severity, Violation};

/// A per-file compliance rule over the textual source model.
///
/// Implement this trait to create rules that inspect individual source
/// files. Rules receive the masked [`SourceFile`] view, so matches inside
/// comments and string literals are already excluded.
///
/// # Example
///
/// ```ignore
/// use dsguard_core::{Rule, FileContext, SourceFile, Violation, Severity};
///
/// pub struct NoMarqueeTags;
///
/// impl Rule for NoMarqueeTags {
///     fn name(&self) -> &'static str { "no-marquee-tags" }
///     fn code(&self) -> &'static str { "DS999" }
///
///     fn check(&self, ctx: &FileContext, source: &SourceFile) -> Vec<Violation> {
///         source
///             .tags
///             .iter()
///             .filter(|t| t.name == "marquee")
///             .map(|t| /* build violation */ unimplemented!())
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "no-raw-html").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DS001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single file and returns any violations found.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context about the file being checked
    /// * `source` - The masked textual model of the file
    ///
    /// # Returns
    ///
    /// A vector of violations found in this file.
    fn check(&self, ctx: &FileContext, source: &SourceFile) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// A project-wide compliance rule over the scanned file set.
///
/// Implement this trait for checks that look at the project structure
/// rather than a single file's contents, such as verifying that required
/// providers wrap the application entry point.
pub trait ProjectRule: Send + Sync {
    /// Returns the kebab-case name of this rule.
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DS101").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks the project and returns any violations found.
    fn check_project(&self, ctx: &ProjectContext) -> Vec<Violation>;
}

/// Type alias for boxed `ProjectRule` trait objects.
pub type ProjectRuleBox = Box<dyn ProjectRule>;
