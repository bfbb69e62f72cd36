use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct DriverConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub input: InputConfig,
}

impl DriverConfig {
    pub fn load() -> Result<Self> {
        match resolve_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(DriverConfig::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse TOML from {}", path.display()))
    }
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("WORDTRIE_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|base| base.join("wordtrie").join("config.toml"))
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_flush_per_command")]
    pub flush_per_command: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            flush_per_command: default_flush_per_command(),
        }
    }
}

fn default_flush_per_command() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `Best extension of ca is car` style lines.
    #[default]
    Text,
    /// One tagged JSON object per line.
    Jsonl,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct InputConfig {
    #[serde(default)]
    pub on_invalid: InvalidWordPolicy,
}

/// What to do with a word containing characters outside `a`–`z`.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvalidWordPolicy {
    /// Log it and carry on with the next command.
    #[default]
    Skip,
    /// Stop the session with an error.
    Abort,
}
