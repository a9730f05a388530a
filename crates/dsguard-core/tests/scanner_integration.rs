//! End-to-end scanner tests over real temporary file trees.

use dsguard_core::{
    ComplianceReport, Config, FileContext, Location, Rule, Scanner, Severity, SourceFile,
    Violation,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Flags every `<div>` opening tag. Stand-in for a real rule so these
/// tests only depend on scanner mechanics.
struct FlagDivs;

impl Rule for FlagDivs {
    fn name(&self) -> &'static str {
        "flag-divs"
    }
    fn code(&self) -> &'static str {
        "T001"
    }

    fn check(&self, ctx: &FileContext, source: &SourceFile) -> Vec<Violation> {
        source
            .tags
            .iter()
            .filter(|t| t.name == "div")
            .map(|t| {
                Violation::new(
                    self.code(),
                    self.name(),
                    self.default_severity(),
                    Location::new(ctx.relative_path.clone(), t.line, t.column),
                    "raw <div> element",
                )
                .with_snippet(source.snippet(t.line))
            })
            .collect()
    }
}

fn scan(root: &Path) -> ComplianceReport {
    scan_with_config(root, Config::default())
}

fn scan_with_config(root: &Path, config: Config) -> ComplianceReport {
    Scanner::builder()
        .root(root)
        .rule(FlagDivs)
        .config(config)
        .build()
        .expect("build scanner")
        .scan()
        .expect("scan")
}

#[test]
fn clean_tree_passes_with_zero_violations() {
    let tmp = TempDir::new().expect("tempdir");
    fs::write(tmp.path().join("App.tsx"), "export const App = () => <Box />;\n")
        .expect("write");

    let report = scan(tmp.path());
    assert!(report.passed());
    assert_eq!(report.violations.len(), 0);
    assert_eq!(report.files_scanned, 1);
}

#[test]
fn single_div_yields_single_violation_with_location() {
    let tmp = TempDir::new().expect("tempdir");
    fs::write(
        tmp.path().join("App.tsx"),
        "export function App() {\n  return <div />;\n}\n",
    )
    .expect("write");

    let report = scan(tmp.path());
    assert_eq!(report.violations.len(), 1);
    let v = &report.violations[0];
    assert_eq!(v.location.file, Path::new("App.tsx"));
    assert_eq!(v.location.line, 2);
    assert_eq!(v.snippet, "return <div />;");
    assert!(!report.passed());
}

#[test]
fn violations_are_ordered_by_file_then_line() {
    let tmp = TempDir::new().expect("tempdir");
    fs::write(tmp.path().join("b.tsx"), "<div />\n").expect("write");
    fs::write(tmp.path().join("a.tsx"), "<span />\n<div />\n<div />\n").expect("write");

    let report = scan(tmp.path());
    let locations: Vec<(String, usize)> = report
        .violations
        .iter()
        .map(|v| (v.location.file.display().to_string(), v.location.line))
        .collect();
    assert_eq!(
        locations,
        vec![
            ("a.tsx".to_string(), 2),
            ("a.tsx".to_string(), 3),
            ("b.tsx".to_string(), 1),
        ]
    );
}

#[test]
fn suppression_removes_exactly_one_violation() {
    let tmp = TempDir::new().expect("tempdir");
    fs::write(
        tmp.path().join("App.tsx"),
        "{/* dsguard: allow(flag-divs) */}\n<div />\n<div />\n",
    )
    .expect("write");

    let report = scan(tmp.path());
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].location.line, 3);
}

#[test]
fn scan_is_idempotent_over_unchanged_tree() {
    let tmp = TempDir::new().expect("tempdir");
    fs::write(tmp.path().join("a.tsx"), "<div />\n").expect("write");
    fs::write(tmp.path().join("b.tsx"), "<div style={{}} />\n").expect("write");

    let first = scan(tmp.path()).format_report();
    let second = scan(tmp.path()).format_report();
    assert_eq!(first, second);
}

#[test]
fn unreadable_file_becomes_warning_not_abort() {
    let tmp = TempDir::new().expect("tempdir");
    // Invalid UTF-8 payload with a tracked extension.
    fs::write(tmp.path().join("blob.tsx"), [0xff, 0xfe, 0x00, 0x9f]).expect("write");
    fs::write(tmp.path().join("ok.tsx"), "<div />\n").expect("write");

    let report = scan(tmp.path());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].path, Path::new("blob.tsx"));
    // The readable file was still checked.
    assert_eq!(report.files_scanned, 1);
    assert_eq!(report.violations.len(), 1);
}

#[cfg(unix)]
#[test]
fn unreadable_directory_becomes_warning_not_abort() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().expect("tempdir");
    fs::write(tmp.path().join("ok.tsx"), "<div />\n").expect("write");
    let locked = tmp.path().join("locked");
    fs::create_dir(&locked).expect("mkdir");
    fs::write(locked.join("hidden.tsx"), "<div />\n").expect("write");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");

    // Permission bits don't bind root; nothing to observe in that case.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("restore");
        return;
    }

    let report = scan(tmp.path());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("restore");

    // The readable file was still checked and the failure surfaced once.
    assert_eq!(report.files_scanned, 1);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].path, Path::new("locked"));
}

#[test]
fn excluded_directories_are_skipped() {
    let tmp = TempDir::new().expect("tempdir");
    let vendored = tmp.path().join("node_modules").join("pkg");
    fs::create_dir_all(&vendored).expect("mkdir");
    fs::write(vendored.join("index.tsx"), "<div />\n").expect("write");
    fs::write(tmp.path().join("App.tsx"), "<Box />\n").expect("write");

    let report = scan(tmp.path());
    assert!(report.passed());
    assert_eq!(report.files_scanned, 1);
}

#[test]
fn untracked_extensions_are_ignored() {
    let tmp = TempDir::new().expect("tempdir");
    fs::write(tmp.path().join("notes.md"), "<div />\n").expect("write");

    let report = scan(tmp.path());
    assert_eq!(report.files_scanned, 0);
    assert!(report.passed());
}

#[test]
fn disabled_rule_is_not_run() {
    let tmp = TempDir::new().expect("tempdir");
    fs::write(tmp.path().join("App.tsx"), "<div />\n").expect("write");

    let config = Config::parse("[rules.flag-divs]\nenabled = false\n").expect("config");
    let report = scan_with_config(tmp.path(), config);
    assert!(report.passed());
    assert!(report.violations.is_empty());
}

#[test]
fn severity_override_downgrades_to_warning() {
    let tmp = TempDir::new().expect("tempdir");
    fs::write(tmp.path().join("App.tsx"), "<div />\n").expect("write");

    let config = Config::parse("[rules.flag-divs]\nseverity = \"warning\"\n").expect("config");
    let report = scan_with_config(tmp.path(), config);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].severity, Severity::Warning);
    // Warnings never fail the run.
    assert!(report.passed());
}
