//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# dsguard configuration
# See https://github.com/example/dsguard for documentation

# Preset: "recommended", "strict", or "minimal"
preset = "recommended"

[scanner]
# Root directory to scan (default: current directory)
# root = "./src"

# Glob patterns to exclude from scanning
exclude = [
    "**/node_modules/**",
    "**/dist/**",
    "**/.next/**",
]

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.no-raw-html]
enabled = true
# severity = "warning"  # Override default severity
allow_in_tests = true
# elements = ["div", "span", "button"]  # Replace the default denylist

[rules.no-restricted-imports]
enabled = true
# prefixes = ["styled-components", "@emotion/"]

# [rules.missing-theme-provider]
# components = ["ThemeProvider", "DesignSystemProvider"]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("dsguard.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created dsguard.toml");
    println!("\nNext steps:");
    println!("  1. Edit dsguard.toml to configure rules");
    println!("  2. Run: dsguard check");

    Ok(())
}
