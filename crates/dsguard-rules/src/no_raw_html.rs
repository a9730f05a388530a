//! Rule to forbid raw HTML elements in JSX.
//!
//! # Rationale
//!
//! Consumer applications should compose design-system primitives instead
//! of raw DOM elements, so spacing, color, and accessibility behavior stay
//! consistent.
//!
//! # Detected Patterns
//!
//! - `<div>`, `<span>`, `<button>`, ... — any opening tag whose lowercase
//!   element name is on the denylist
//!
//! # Good Patterns
//!
//! ```jsx
//! <Box padding="md">
//!   <Text>hello</Text>
//! </Box>
//! ```

use dsguard_core::{FileContext, Location, Rule, Severity, SourceFile, Suggestion, Violation};

/// Rule code for no-raw-html.
pub const CODE: &str = "DS001";

/// Rule name for no-raw-html.
pub const NAME: &str = "no-raw-html";

/// Default denylist of raw DOM element names.
const DEFAULT_ELEMENTS: &[&str] = &[
    "div", "span", "p", "a", "button", "input", "select", "textarea", "label", "form", "img",
    "ul", "ol", "li", "table", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Forbids raw HTML elements in JSX.
#[derive(Debug, Clone)]
pub struct NoRawHtml {
    severity: Severity,
    elements: Vec<String>,
    allow_in_tests: bool,
}

impl Default for NoRawHtml {
    fn default() -> Self {
        Self::new()
    }
}

impl NoRawHtml {
    /// Creates a new rule with the default denylist.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            elements: DEFAULT_ELEMENTS.iter().map(ToString::to_string).collect(),
            allow_in_tests: true,
        }
    }

    /// Creates a rule configured from `[rules.no-raw-html]` options.
    ///
    /// Recognized options: `elements` (replaces the denylist),
    /// `allow_in_tests`.
    #[must_use]
    pub fn from_options(options: &dsguard_core::RuleConfig) -> Self {
        let mut rule = Self::new();
        let elements = options.get_str_array("elements");
        if !elements.is_empty() {
            rule.elements = elements;
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

    /// Replaces the element denylist.
    #[must_use]
    pub fn elements<I, S>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.elements = elements.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether test files are exempt (default: true).
    #[must_use]
    pub fn allow_in_tests(mut self, allow: bool) -> Self {
        self.allow_in_tests = allow;
        self
    }
}

impl Rule for NoRawHtml {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids raw HTML elements in favor of design-system primitives"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, source: &SourceFile) -> Vec<Violation> {
        if ctx.is_test && self.allow_in_tests {
            return Vec::new();
        }

        source
            .tags
            .iter()
            .filter(|tag| self.elements.iter().any(|e| e == &tag.name))
            .map(|tag| {
                let offset = ctx.offset_for(tag.line, tag.column);
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    Location::new(ctx.relative_path.clone(), tag.line, tag.column)
                        .with_span(offset, tag.name.len() + 1),
                    format!("raw <{}> element", tag.name),
                )
                .with_snippet(source.snippet(tag.line))
                .with_suggestion(Suggestion::new(format!(
                    "Replace <{}> with the corresponding design-system primitive",
                    tag.name
                )))
            })
            .collect()
    }
}
