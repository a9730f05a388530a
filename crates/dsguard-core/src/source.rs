//! Textual model of a JSX/TS source file.
//!
//! This is a deliberately lightweight, line-oriented view: comments and
//! string-literal interiors are masked out, and imports and JSX opening
//! tags are extracted with their positions. Rules match against the masked
//! text, so occurrences inside comments or strings never trigger.

use regex::Regex;
use std::sync::OnceLock;

/// A single import statement extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column of the module source string (1-indexed).
    pub column: usize,
    /// Module source path (e.g., `styled-components`, `../theme`).
    pub source: String,
}

/// A JSX opening tag extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsxTag {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column of the `<` (1-indexed).
    pub column: usize,
    /// Element or component name (e.g., `div`, `ThemeProvider`, `Foo.Item`).
    pub name: String,
}

/// One line of source with its masked counterpart.
#[derive(Debug, Clone)]
pub struct SourceLine {
    /// Original line text.
    pub raw: String,
    /// Line text with comments and string interiors blanked to spaces.
    ///
    /// Quote characters and code structure are preserved, so column
    /// positions line up with `raw`.
    pub masked: String,
}

/// Result of scanning a single source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Per-line raw and masked text.
    pub lines: Vec<SourceLine>,
    /// All import statements found.
    pub imports: Vec<ImportRecord>,
    /// All JSX opening tags found (in masked text).
    pub tags: Vec<JsxTag>,
}

/// Lexer state carried across characters (and, for block comments and
/// template literals, across lines).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Code,
    BlockComment,
    Str(char),
    Template,
}

impl SourceFile {
    /// Parses source text into the masked line model.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let (masked, stripped) = mask(content);

        let lines: Vec<SourceLine> = content
            .lines()
            .zip(masked.lines())
            .map(|(raw, masked)| SourceLine {
                raw: raw.to_string(),
                masked: masked.to_string(),
            })
            .collect();

        let imports = extract_imports(&stripped);
        let tags = extract_tags(&masked);

        Self {
            lines,
            imports,
            tags,
        }
    }

    /// Returns the trimmed raw text of a line (1-indexed), for snippets.
    #[must_use]
    pub fn snippet(&self, line: usize) -> String {
        self.lines
            .get(line.saturating_sub(1))
            .map(|l| l.raw.trim().to_string())
            .unwrap_or_default()
    }

    /// Returns true if any JSX opening tag with the given name exists.
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }
}

/// Masks `content` twice over:
///
/// - `masked`: comments and string interiors blanked to spaces
/// - `stripped`: comments blanked, string contents kept (for import paths)
///
/// Both outputs preserve line structure and byte columns.
fn mask(content: &str) -> (String, String) {
    let chars: Vec<char> = content.chars().collect();
    let mut masked = String::with_capacity(content.len());
    let mut stripped = String::with_capacity(content.len());
    let mut state = LexState::Code;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if c == '\n' {
            // Single-quote strings do not span lines; an unterminated one
            // ends at the newline.
            if matches!(state, LexState::Str(_)) {
                state = LexState::Code;
            }
            masked.push('\n');
            stripped.push('\n');
            i += 1;
            continue;
        }

        match state {
            LexState::Code => {
                if c == '/' && next == Some('/') {
                    while i < chars.len() && chars[i] != '\n' {
                        masked.push(' ');
                        stripped.push(' ');
                        i += 1;
                    }
                    continue;
                } else if c == '/' && next == Some('*') {
                    state = LexState::BlockComment;
                    masked.push_str("  ");
                    stripped.push_str("  ");
                    i += 2;
                    continue;
                } else if c == '\'' || c == '"' {
                    state = LexState::Str(c);
                    masked.push(c);
                    stripped.push(c);
                } else if c == '`' {
                    state = LexState::Template;
                    masked.push('`');
                    stripped.push('`');
                } else {
                    masked.push(c);
                    stripped.push(c);
                }
            }
            LexState::BlockComment => {
                if c == '*' && next == Some('/') {
                    state = LexState::Code;
                    masked.push_str("  ");
                    stripped.push_str("  ");
                    i += 2;
                    continue;
                }
                masked.push(' ');
                stripped.push(' ');
            }
            LexState::Str(quote) => {
                if c == '\\' && next.is_some() && next != Some('\n') {
                    masked.push_str("  ");
                    stripped.push(c);
                    stripped.push(chars[i + 1]);
                    i += 2;
                    continue;
                }
                if c == quote {
                    state = LexState::Code;
                    masked.push(c);
                    stripped.push(c);
                } else {
                    masked.push(' ');
                    stripped.push(c);
                }
            }
            LexState::Template => {
                if c == '\\' && next.is_some() && next != Some('\n') {
                    masked.push_str("  ");
                    stripped.push(c);
                    stripped.push(chars[i + 1]);
                    i += 2;
                    continue;
                }
                if c == '`' {
                    state = LexState::Code;
                    masked.push('`');
                    stripped.push('`');
                } else {
                    masked.push(' ');
                    stripped.push(c);
                }
            }
        }

        i += 1;
    }

    (masked, stripped)
}

#[allow(clippy::unwrap_used)] // patterns are compile-time constants
fn import_regexes() -> &'static [Regex; 3] {
    static REGEXES: OnceLock<[Regex; 3]> = OnceLock::new();
    REGEXES.get_or_init(|| {
        [
            // import x from 'y' / import 'y' / export { a } from 'y'
            Regex::new(r#"^\s*(?:import|export)\b[^"']*["']([^"']+)["']"#).unwrap(),
            // closing line of a multi-line import: `} from 'y'`
            Regex::new(r#"^\s*\}?\s*from\s+["']([^"']+)["']"#).unwrap(),
            // require('y')
            Regex::new(r#"\brequire\s*\(\s*["']([^"']+)["']\s*\)"#).unwrap(),
        ]
    })
}

/// Extracts import statements from comment-stripped (strings kept) text.
fn extract_imports(stripped: &str) -> Vec<ImportRecord> {
    let mut imports = Vec::new();

    for (idx, line) in stripped.lines().enumerate() {
        for re in import_regexes() {
            if let Some(caps) = re.captures(line) {
                if let Some(m) = caps.get(1) {
                    imports.push(ImportRecord {
                        line: idx + 1,
                        column: m.start() + 1,
                        source: m.as_str().to_string(),
                    });
                }
                // One import statement per line is enough for this model.
                break;
            }
        }
    }

    imports
}

/// Extracts JSX opening tags from masked text.
///
/// A tag is a `<` immediately followed by a letter, where the preceding
/// character is not an identifier character. That last condition keeps
/// comparisons (`a<b`) and generics (`Array<string>`) out.
fn extract_tags(masked: &str) -> Vec<JsxTag> {
    let mut tags = Vec::new();

    for (idx, line) in masked.lines().enumerate() {
        let chars: Vec<char> = line.chars().collect();
        for (col, &c) in chars.iter().enumerate() {
            if c != '<' {
                continue;
            }
            let Some(&first) = chars.get(col + 1) else {
                continue;
            };
            if !first.is_ascii_alphabetic() {
                continue;
            }
            if col > 0 {
                let prev = chars[col - 1];
                if prev.is_ascii_alphanumeric() || prev == '_' || prev == '$' {
                    continue;
                }
            }

            let mut name = String::new();
            for &nc in &chars[col + 1..] {
                if nc.is_ascii_alphanumeric() || nc == '_' || nc == '.' || nc == '-' {
                    name.push(nc);
                } else {
                    break;
                }
            }

            tags.push(JsxTag {
                line: idx + 1,
                column: col + 1,
                name,
            });
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_line_comments() {
        let file = SourceFile::parse("const a = 1; // <div>\n");
        assert!(!file.lines[0].masked.contains("<div>"));
        assert!(file.lines[0].masked.starts_with("const a = 1; "));
        assert!(file.tags.is_empty());
    }

    #[test]
    fn masks_block_comments_across_lines() {
        let src = "/* start\n<div>\nend */\nconst x = 1;\n";
        let file = SourceFile::parse(src);
        assert!(file.tags.is_empty());
        assert_eq!(file.lines[3].masked, "const x = 1;");
    }

    #[test]
    fn masks_jsx_comments() {
        let file = SourceFile::parse("{/* <div> is fine here */}\n");
        assert!(file.tags.is_empty());
    }

    #[test]
    fn masks_string_interiors_but_keeps_quotes() {
        let file = SourceFile::parse("const s = \"<div>\";\n");
        assert!(file.tags.is_empty());
        assert_eq!(file.lines[0].masked, "const s = \"     \";");
    }

    #[test]
    fn masks_template_literals_across_lines() {
        let src = "const t = `first\n<div>\nlast`;\nconst u = 2;\n";
        let file = SourceFile::parse(src);
        assert!(file.tags.is_empty());
        assert_eq!(file.lines[3].masked, "const u = 2;");
    }

    #[test]
    fn handles_escaped_quotes() {
        let file = SourceFile::parse(r#"const s = "a \" <div>";"#);
        assert!(file.tags.is_empty());
    }

    #[test]
    fn extracts_jsx_tags_with_positions() {
        let src = "export function App() {\n  return <div className=\"x\" />;\n}\n";
        let file = SourceFile::parse(src);
        assert_eq!(file.tags.len(), 1);
        assert_eq!(file.tags[0].name, "div");
        assert_eq!(file.tags[0].line, 2);
        assert_eq!(file.tags[0].column, 10);
    }

    #[test]
    fn extracts_component_and_member_tags() {
        let src = "<ThemeProvider>\n  <Menu.Item />\n</ThemeProvider>\n";
        let file = SourceFile::parse(src);
        let names: Vec<&str> = file.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["ThemeProvider", "Menu.Item"]);
        assert!(file.has_tag("ThemeProvider"));
    }

    #[test]
    fn closing_tags_are_not_extracted() {
        let file = SourceFile::parse("</div>\n");
        assert!(file.tags.is_empty());
    }

    #[test]
    fn generics_and_comparisons_are_not_tags() {
        let file = SourceFile::parse("const xs: Array<string> = [];\nif (a<b) {}\n");
        assert!(file.tags.is_empty());
    }

    #[test]
    fn extracts_default_import() {
        let file = SourceFile::parse("import styled from 'styled-components';\n");
        assert_eq!(file.imports.len(), 1);
        assert_eq!(file.imports[0].source, "styled-components");
        assert_eq!(file.imports[0].line, 1);
    }

    #[test]
    fn extracts_side_effect_and_export_imports() {
        let src = "import './global.css';\nexport { Button } from './button';\n";
        let file = SourceFile::parse(src);
        let sources: Vec<&str> = file.imports.iter().map(|i| i.source.as_str()).collect();
        assert_eq!(sources, vec!["./global.css", "./button"]);
    }

    #[test]
    fn extracts_multiline_import_closing_line() {
        let src = "import {\n  Button,\n  Card,\n} from '@acme/ui';\n";
        let file = SourceFile::parse(src);
        assert_eq!(file.imports.len(), 1);
        assert_eq!(file.imports[0].source, "@acme/ui");
        assert_eq!(file.imports[0].line, 4);
    }

    #[test]
    fn extracts_require_call() {
        let file = SourceFile::parse("const theme = require('@emotion/styled');\n");
        assert_eq!(file.imports.len(), 1);
        assert_eq!(file.imports[0].source, "@emotion/styled");
    }

    #[test]
    fn commented_imports_are_ignored() {
        let file = SourceFile::parse("// import styled from 'styled-components';\n");
        assert!(file.imports.is_empty());
    }

    #[test]
    fn snippet_returns_trimmed_line() {
        let file = SourceFile::parse("  return <div />;\n");
        assert_eq!(file.snippet(1), "return <div />;");
        assert_eq!(file.snippet(99), "");
    }
}
