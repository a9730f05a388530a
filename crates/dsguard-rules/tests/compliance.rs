//! End-to-end compliance checks over realistic project trees.

use dsguard_core::{ComplianceReport, Config, Scanner, Severity};
use dsguard_rules::Preset;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_tree(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    for (rel, content) in files {
        let path = tmp.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(&path, content).expect("write");
    }
    tmp
}

fn scan(root: &Path, preset: Preset) -> ComplianceReport {
    scan_with_config(root, preset, Config::default())
}

fn scan_with_config(root: &Path, preset: Preset, config: Config) -> ComplianceReport {
    let mut builder = Scanner::builder().root(root).config(config.clone());
    for rule in preset.rules(&config) {
        builder = builder.rule_box(rule);
    }
    for rule in preset.project_rules(&config) {
        builder = builder.project_rule_box(rule);
    }
    builder.build().expect("build scanner").scan().expect("scan")
}

const COMPLIANT_APP: &str = "\
import { AppErrorBoundary, ThemeProvider, IntlProvider } from '@acme/design-system';

export default function App({ Component, pageProps }) {
  return (
    <AppErrorBoundary>
      <ThemeProvider>
        <IntlProvider>
          <Component {...pageProps} />
        </IntlProvider>
      </ThemeProvider>
    </AppErrorBoundary>
  );
}
";

const COMPLIANT_PAGE: &str = "\
import { Box, Text } from '@acme/design-system';

export default function Home() {
  return (
    <Box padding=\"md\">
      <Text>Welcome</Text>
    </Box>
  );
}
";

#[test]
fn fully_compliant_project_passes() {
    let tmp = write_tree(&[
        ("pages/_app.tsx", COMPLIANT_APP),
        ("pages/index.tsx", COMPLIANT_PAGE),
    ]);

    let report = scan(tmp.path(), Preset::Recommended);
    assert!(report.passed(), "report:\n{}", report.format_report());
    assert!(report.violations.is_empty());
    assert!(report.format_report().contains("PASS"));
}

#[test]
fn missing_theme_provider_is_a_single_error() {
    let app = "\
import { AppErrorBoundary, IntlProvider } from '@acme/design-system';

export default function App({ Component, pageProps }) {
  return (
    <AppErrorBoundary>
      <IntlProvider>
        <Component {...pageProps} />
      </IntlProvider>
    </AppErrorBoundary>
  );
}
";
    let tmp = write_tree(&[("pages/_app.tsx", app), ("pages/index.tsx", COMPLIANT_PAGE)]);

    let report = scan(tmp.path(), Preset::Recommended);
    assert!(!report.passed());
    let errors: Vec<_> = report
        .violations
        .iter()
        .filter(|v| v.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].rule, "missing-theme-provider");
    assert_eq!(errors[0].location.file, Path::new("pages/_app.tsx"));
    assert!(report.format_report().contains("FAIL"));
}

#[test]
fn raw_div_fails_with_location_and_suppression_clears_it() {
    let page_with_div = "\
import { Box } from '@acme/design-system';

export default function Home() {
  return <div className=\"legacy\" />;
}
";
    let tmp = write_tree(&[
        ("pages/_app.tsx", COMPLIANT_APP),
        ("pages/index.tsx", page_with_div),
    ]);

    let report = scan(tmp.path(), Preset::Recommended);
    assert!(!report.passed());
    assert_eq!(report.violations.len(), 1);
    let v = &report.violations[0];
    assert_eq!(v.rule, "no-raw-html");
    assert_eq!(v.location.file, Path::new("pages/index.tsx"));
    assert_eq!(v.location.line, 4);

    // The same tree with a suppression directive passes.
    let suppressed = "\
import { Box } from '@acme/design-system';

export default function Home() {
  {/* dsguard: allow(no-raw-html) reason=\"legacy markup, tracked in UI-412\" */}
  return <div className=\"legacy\" />;
}
";
    let tmp = write_tree(&[
        ("pages/_app.tsx", COMPLIANT_APP),
        ("pages/index.tsx", suppressed),
    ]);
    let report = scan(tmp.path(), Preset::Recommended);
    assert!(report.passed(), "report:\n{}", report.format_report());
}

#[test]
fn restricted_import_is_flagged() {
    let page = "\
import styled from 'styled-components';

export const Card = styled.section`padding: 8px;`;
";
    let tmp = write_tree(&[("pages/_app.tsx", COMPLIANT_APP), ("src/Card.ts", page)]);

    let report = scan(tmp.path(), Preset::Recommended);
    assert!(!report.passed());
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].rule, "no-restricted-imports");
    assert_eq!(report.violations[0].location.line, 1);
}

#[test]
fn missing_locale_provider_warns_but_passes() {
    let app = "\
import { AppErrorBoundary, ThemeProvider } from '@acme/design-system';

export default function App({ Component, pageProps }) {
  return (
    <AppErrorBoundary>
      <ThemeProvider>
        <Component {...pageProps} />
      </ThemeProvider>
    </AppErrorBoundary>
  );
}
";
    let tmp = write_tree(&[("pages/_app.tsx", app)]);

    let report = scan(tmp.path(), Preset::Recommended);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].rule, "missing-locale-provider");
    assert_eq!(report.violations[0].severity, Severity::Warning);
    assert!(report.passed());
    assert!(report.format_report().contains("PASS"));
}

#[test]
fn project_without_entry_point_yields_one_finding() {
    let tmp = write_tree(&[("src/components/Button.tsx", COMPLIANT_PAGE)]);

    let report = scan(tmp.path(), Preset::Recommended);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].rule, "entry-point-not-found");
    assert!(!report.passed());
}

#[test]
fn strict_preset_checks_test_files_and_locale() {
    let app = "\
import { AppErrorBoundary, ThemeProvider } from '@acme/design-system';

export default function App({ Component, pageProps }) {
  return (
    <AppErrorBoundary>
      <ThemeProvider>
        <Component {...pageProps} />
      </ThemeProvider>
    </AppErrorBoundary>
  );
}
";
    let test_file = "test('renders', () => { render(<div />); });\n";
    let tmp = write_tree(&[
        ("pages/_app.tsx", app),
        ("src/Button.test.tsx", test_file),
    ]);

    // Recommended exempts test files and treats the locale provider as a
    // warning.
    let recommended = scan(tmp.path(), Preset::Recommended);
    assert!(recommended.passed());

    // Strict flags the raw div in the test file and promotes the locale
    // provider to an error.
    let strict = scan(tmp.path(), Preset::Strict);
    assert!(!strict.passed());
    let rules: Vec<&str> = strict.violations.iter().map(|v| v.rule.as_str()).collect();
    assert!(rules.contains(&"no-raw-html"));
    assert!(rules.contains(&"missing-locale-provider"));
    assert!(strict
        .violations
        .iter()
        .all(|v| v.severity == Severity::Error));
}

#[test]
fn report_output_is_deterministic() {
    let tmp = write_tree(&[
        ("pages/_app.tsx", COMPLIANT_APP),
        ("src/a.tsx", "<div />\n"),
        ("src/b.tsx", "import styled from 'styled-components';\n"),
    ]);

    let first = scan(tmp.path(), Preset::Recommended).format_report();
    let second = scan(tmp.path(), Preset::Recommended).format_report();
    assert_eq!(first, second);

    // Violations grouped by rule appear in rule-code order.
    let html_pos = first.find("no-raw-html").expect("html finding");
    let import_pos = first.find("no-restricted-imports").expect("import finding");
    assert!(html_pos < import_pos);
}

#[test]
fn configured_denylist_applies_through_preset() {
    let config = Config::parse(
        "[rules.no-raw-html]\nelements = [\"marquee\"]\n",
    )
    .expect("config");
    let tmp = write_tree(&[
        ("pages/_app.tsx", COMPLIANT_APP),
        ("src/Banner.tsx", "<div>\n<marquee>hi</marquee>\n</div>\n"),
    ]);

    let report = scan_with_config(tmp.path(), Preset::Recommended, config);
    let html: Vec<_> = report
        .violations
        .iter()
        .filter(|v| v.rule == "no-raw-html")
        .collect();
    assert_eq!(html.len(), 1);
    assert!(html[0].message.contains("<marquee>"));
}
