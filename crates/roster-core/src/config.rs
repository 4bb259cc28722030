//! Store locations and their configuration sources.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Where the two store files live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Student records file.
    #[serde(default = "default_student_file")]
    pub student_file: PathBuf,
    /// Admin credential file.
    #[serde(default = "default_admin_file")]
    pub admin_file: PathBuf,
}

fn default_student_file() -> PathBuf {
    PathBuf::from("students.json")
}
fn default_admin_file() -> PathBuf {
    PathBuf::from("admin.json")
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            student_file: default_student_file(),
            admin_file: default_admin_file(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `roster.toml` in the current directory
/// 2. `~/.config/roster/config.toml`
///
/// Environment variable overrides: `ROSTER_STUDENT_FILE`, `ROSTER_ADMIN_FILE`.
pub fn load_config() -> Result<RosterConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<RosterConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("roster.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => parse_config_file(&path)?,
        None => RosterConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<RosterConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<RosterConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn apply_env_overrides(config: &mut RosterConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(file) = lookup("ROSTER_STUDENT_FILE").filter(|v| !v.is_empty()) {
        config.student_file = PathBuf::from(file);
    }
    if let Some(file) = lookup("ROSTER_ADMIN_FILE").filter(|v| !v.is_empty()) {
        config.admin_file = PathBuf::from(file);
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("roster"))
}
