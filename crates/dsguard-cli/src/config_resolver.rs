//! Locates and loads the effective `dsguard` configuration.
//!
//! A `--config` path is taken as given. Otherwise the project directory is
//! searched for `dsguard.toml` (the dotfile spelling is a fallback), then
//! the global directory for a `config.toml`. When nothing matches, built-in
//! defaults apply. The global directory is `$DSGUARD_CONFIG_DIR` when set,
//! `~/.dsguard` otherwise.

use anyhow::{Context, Result};
use dsguard_core::Config;
use std::fmt;
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_NAMES: &[&str] = &["dsguard.toml", ".dsguard.toml"];
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Where the effective configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A `--config` path, taken as given without an existence check.
    Explicit(PathBuf),
    /// A config file found next to the scanned project.
    Project(PathBuf),
    /// The global fallback under the user's config directory.
    Global(PathBuf),
    /// Built-in defaults; no file anywhere.
    Default,
}

impl ConfigSource {
    /// Loads the configuration this source points at.
    ///
    /// An explicit path that does not exist is an error here, not during
    /// resolution, so the message can say which file was asked for.
    pub fn load(&self) -> Result<Config> {
        match self {
            Self::Default => Ok(Config::default()),
            Self::Explicit(path) | Self::Project(path) | Self::Global(path) => {
                Config::from_file(path)
                    .with_context(|| format!("failed to load config from {}", path.display()))
            }
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "config override at {}", p.display()),
            Self::Project(p) => write!(f, "project config at {}", p.display()),
            Self::Global(p) => write!(f, "global config at {}", p.display()),
            Self::Default => f.write_str("built-in defaults"),
        }
    }
}

/// Resolves the configuration source for a scan of `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_from(project_dir, explicit, global_dir().as_deref())
}

/// Resolution core, with the global directory injected so tests never
/// depend on the process environment.
fn resolve_from(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<&Path>,
) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    let project = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file());
    if let Some(path) = project {
        return ConfigSource::Project(path);
    }

    let global = global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file());
    match global {
        Some(path) => ConfigSource::Global(path),
        None => ConfigSource::Default,
    }
}

fn global_dir() -> Option<PathBuf> {
    std::env::var_os("DSGUARD_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".dsguard")))
}
