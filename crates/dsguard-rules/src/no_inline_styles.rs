//! Rule to forbid inline styles that bypass design tokens.
//!
//! # Rationale
//!
//! Hardcoded `style` values drift from the design system's spacing and
//! color scales. Styling should go through component props or token
//! accessors.
//!
//! # Detected Patterns
//!
//! - `style={{ color: 'red' }}` — literal object values
//! - `style="color: red"` — literal string values
//!
//! # Good Patterns
//!
//! ```jsx
//! <Box style={{ color: theme.colors.primary }} />
//! <Box style={{ gap: 'var(--ds-space-2)' }} />
//! <Box style={styles.box} />
//! ```

use dsguard_core::{FileContext, Location, Rule, Severity, SourceFile, Suggestion, Violation};

/// Rule code for no-inline-styles.
pub const CODE: &str = "DS002";

/// Rule name for no-inline-styles.
pub const NAME: &str = "no-inline-styles";

/// Default token-accessor patterns that exempt a style value.
const DEFAULT_ACCESSORS: &[&str] = &["theme.", "tokens.", "var(--"];

/// How many lines a multi-line style object is followed before giving up.
const MAX_VALUE_LINES: usize = 20;

/// Forbids literal `style` attribute values that do not reference design
/// tokens.
#[derive(Debug, Clone)]
pub struct NoInlineStyles {
    severity: Severity,
    token_accessors: Vec<String>,
    allow_in_tests: bool,
}

impl Default for NoInlineStyles {
    fn default() -> Self {
        Self::new()
    }
}

impl NoInlineStyles {
    /// Creates a new rule with the default accessor patterns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            token_accessors: DEFAULT_ACCESSORS.iter().map(ToString::to_string).collect(),
            allow_in_tests: true,
        }
    }

    /// Creates a rule configured from `[rules.no-inline-styles]` options.
    ///
    /// Recognized options: `token_accessors` (replaces the accessor list),
    /// `allow_in_tests`.
    #[must_use]
    pub fn from_options(options: &dsguard_core::RuleConfig) -> Self {
        let mut rule = Self::new();
        let accessors = options.get_str_array("token_accessors");
        if !accessors.is_empty() {
            rule.token_accessors = accessors;
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

    /// Replaces the token-accessor patterns.
    #[must_use]
    pub fn token_accessors<I, S>(mut self, accessors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.token_accessors = accessors.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether test files are exempt (default: true).
    #[must_use]
    pub fn allow_in_tests(mut self, allow: bool) -> Self {
        self.allow_in_tests = allow;
        self
    }

    fn references_tokens(&self, value: &str) -> bool {
        self.token_accessors.iter().any(|a| value.contains(a.as_str()))
    }

    fn violation(&self, ctx: &FileContext, source: &SourceFile, line: usize, column: usize) -> Violation {
        let offset = ctx.offset_for(line, column);
        Violation::new(
            CODE,
            NAME,
            self.severity,
            Location::new(ctx.relative_path.clone(), line, column).with_span(offset, 6),
            "inline style without design tokens",
        )
        .with_snippet(source.snippet(line))
        .with_suggestion(Suggestion::new(
            "Use component props or token accessors (theme.*, var(--…)) instead of literal styles",
        ))
    }
}

impl Rule for NoInlineStyles {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids literal style values that bypass design tokens"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, source: &SourceFile) -> Vec<Violation> {
        if ctx.is_test && self.allow_in_tests {
            return Vec::new();
        }

        let mut violations = Vec::new();

        for (idx, line) in source.lines.iter().enumerate() {
            let masked: Vec<char> = line.masked.chars().collect();
            let raw: Vec<char> = line.raw.chars().collect();

            let mut i = 0;
            while i + 6 <= masked.len() {
                if !starts_with_at(&masked, i, "style=") {
                    i += 1;
                    continue;
                }
                // Attribute position only: preceded by whitespace or line start.
                if i > 0 && !masked[i - 1].is_whitespace() {
                    i += 6;
                    continue;
                }

                let value_start = i + 6;
                match masked.get(value_start) {
                    Some('"') | Some('\'') => {
                        let quote = masked[value_start];
                        let value = quoted_value(&raw, value_start, quote);
                        if !self.references_tokens(&value) {
                            violations.push(self.violation(ctx, source, idx + 1, i + 1));
                        }
                    }
                    Some('{') => {
                        // `{{` is a literal object; any other expression
                        // (`{styles.box}`, `{cond ? a : b}`) is exempt.
                        let is_object = masked
                            .get(value_start + 1..)
                            .and_then(|rest| rest.iter().find(|c| !c.is_whitespace()))
                            == Some(&'{');
                        if is_object {
                            let value = braced_value(source, idx, value_start);
                            if !self.references_tokens(&value) {
                                violations.push(self.violation(ctx, source, idx + 1, i + 1));
                            }
                        }
                    }
                    _ => {}
                }

                i = value_start;
            }
        }

        violations
    }
}

fn starts_with_at(chars: &[char], at: usize, needle: &str) -> bool {
    let mut i = at;
    for nc in needle.chars() {
        if chars.get(i) != Some(&nc) {
            return false;
        }
        i += 1;
    }
    true
}

/// Extracts the raw contents of a quoted attribute value starting at
/// `quote_at` (the opening quote) on one line.
fn quoted_value(raw: &[char], quote_at: usize, quote: char) -> String {
    let mut value = String::new();
    for &c in raw.iter().skip(quote_at + 1) {
        if c == quote {
            break;
        }
        value.push(c);
    }
    value
}

/// Collects the raw text of a braced value starting at `start_col` on
/// `start_line` (0-indexed), tracking brace depth in the masked view so
/// braces inside strings don't count.
fn braced_value(source: &SourceFile, start_line: usize, start_col: usize) -> String {
    let mut depth = 0usize;
    let mut out = String::new();

    for (li, line) in source
        .lines
        .iter()
        .enumerate()
        .skip(start_line)
        .take(MAX_VALUE_LINES)
    {
        let masked: Vec<char> = line.masked.chars().collect();
        let raw: Vec<char> = line.raw.chars().collect();
        let from = if li == start_line { start_col } else { 0 };

        for k in from..masked.len() {
            match masked[k] {
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        out.push('}');
                        return out;
                    }
                }
                _ => {}
            }
            out.push(*raw.get(k).unwrap_or(&' '));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn check(content: &str) -> Vec<Violation> {
        let rule = NoInlineStyles::new();
        let source = SourceFile::parse(content);
        let ctx = FileContext::new(Path::new("src/App.tsx"), content, Path::new("."));
        rule.check(&ctx, &source)
    }

    #[test]
    fn detects_literal_object_style() {
        let violations = check("<Box style={{ color: 'red' }} />\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "no-inline-styles");
        assert_eq!(violations[0].location.line, 1);
    }

    #[test]
    fn detects_literal_string_style() {
        let violations = check("<Box style=\"color: red\" />\n");
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn theme_accessor_is_exempt() {
        let violations = check("<Box style={{ color: theme.colors.primary }} />\n");
        assert!(violations.is_empty());
    }

    #[test]
    fn css_variable_is_exempt() {
        let violations = check("<Box style={{ gap: 'var(--ds-space-2)' }} />\n");
        assert!(violations.is_empty());
    }

    #[test]
    fn non_literal_expression_is_exempt() {
        let violations = check("<Box style={styles.box} />\n");
        assert!(violations.is_empty());
    }

    #[test]
    fn multiline_object_without_tokens_is_flagged() {
        let src = "<Box\n  style={{\n    color: 'red',\n    margin: 4,\n  }}\n/>\n";
        let violations = check(src);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 2);
    }

    #[test]
    fn multiline_object_with_tokens_is_exempt() {
        let src = "<Box\n  style={{\n    color: tokens.color.danger,\n  }}\n/>\n";
        assert!(check(src).is_empty());
    }

    #[test]
    fn style_word_in_string_is_exempt() {
        let violations = check("const s = \"style={{ color: 'red' }}\";\n");
        assert!(violations.is_empty());
    }

    #[test]
    fn custom_accessor_list() {
        let rule = NoInlineStyles::new().token_accessors(["ds."]);
        let content = "<Box style={{ color: ds.red }} />\n";
        let source = SourceFile::parse(content);
        let ctx = FileContext::new(Path::new("src/App.tsx"), content, Path::new("."));
        assert!(rule.check(&ctx, &source).is_empty());
    }
}
