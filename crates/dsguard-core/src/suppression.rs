//! Comment-based suppression directives.
//!
//! Supports directives like:
//! ```text
//! // dsguard: allow(no-raw-html) reason="third-party embed"
//! {/* dsguard: allow(no-inline-styles) */}
//! ```
//!
//! A directive on the offending line, or on the line immediately before it,
//! suppresses that single line's violations for the named rules.

use std::collections::HashSet;

/// Result of checking for a suppression directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuppressionCheck {
    /// Rule is not suppressed.
    Active,
    /// Rule is suppressed with optional reason.
    Suppressed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl SuppressionCheck {
    /// Returns true if suppressed.
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed { .. })
    }

    /// Returns the reason if suppressed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Suppressed { reason } => reason.as_deref(),
            Self::Active => None,
        }
    }
}

/// Parsed suppression directive.
#[derive(Debug, Clone)]
pub struct SuppressionDirective {
    /// Rule names that are suppressed.
    pub rules: HashSet<String>,
    /// Optional reason for the suppression.
    pub reason: Option<String>,
}

/// Checks whether a violation at `line` (1-indexed) is suppressed for
/// `rule_name`.
///
/// The directive may sit on the offending line itself (trailing comment)
/// or on the line immediately before it. `allow(all)` suppresses every
/// rule.
#[must_use]
pub fn is_suppressed(content: &str, line: usize, rule_name: &str) -> bool {
    check_suppression(content, line, rule_name).is_suppressed()
}

/// Checks for a suppression directive, returning any reason given.
#[must_use]
pub fn check_suppression(content: &str, line: usize, rule_name: &str) -> SuppressionCheck {
    let lines: Vec<&str> = content.lines().collect();

    for check_line in [line.saturating_sub(1), line] {
        if check_line == 0 || check_line > lines.len() {
            continue;
        }

        let line_content = lines[check_line - 1];
        if let Some(directive) = parse_directive(line_content) {
            if directive.rules.contains(rule_name) || directive.rules.contains("all") {
                return SuppressionCheck::Suppressed {
                    reason: directive.reason,
                };
            }
        }
    }

    SuppressionCheck::Active
}

/// Parses a suppression directive from a line.
///
/// The directive must live in a `//` or `/* */` comment (including the JSX
/// `{/* */}` form).
#[must_use]
pub fn parse_directive(line: &str) -> Option<SuppressionDirective> {
    // Locate the comment opener; directives outside comments don't count.
    let comment_start = match (line.find("//"), line.find("/*")) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return None,
    };

    let mut comment_content = line[comment_start + 2..].trim();
    for suffix in ["*/}", "*/"] {
        if let Some(rest) = comment_content.strip_suffix(suffix) {
            comment_content = rest.trim();
            break;
        }
    }

    let directive = comment_content.strip_prefix("dsguard:")?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules_str = &allow_content[..paren_end];

    let rules: HashSet<String> = rules_str
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = if let Some(reason_part) = rest.strip_prefix("reason=") {
        let reason_part = reason_part.trim();
        if reason_part.starts_with('"') && reason_part.len() > 1 {
            let end = reason_part[1..].find('"').map(|i| i + 1)?;
            Some(reason_part[1..end].to_string())
        } else {
            None
        }
    } else {
        None
    };

    Some(SuppressionDirective { rules, reason })
}
