//! Wrapper configuration stored at `~/.kimi/jim.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Wrapper configuration (TOML).
///
/// The file is optional and intended to be edited by humans. Missing fields
/// default to sensible values; a missing file is the default configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WrapperConfig {
    /// Kimi CLI installation root. When set, discovery is skipped entirely.
    pub kimi_root: Option<PathBuf>,

    /// GSD agent configuration file passed via `--agent-file`.
    /// Defaults to `~/.kimi/gsd-agent.yaml`.
    pub agent_file: Option<PathBuf>,

    /// Wall-clock budget for the Python syntax check, in seconds.
    pub validation_timeout_secs: u64,

    /// Wall-clock budget for the `uv tool dir` fallback query, in seconds.
    pub tool_query_timeout_secs: u64,

    /// Truncate captured helper-process stdout/stderr beyond this many bytes.
    pub output_limit_bytes: usize,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            kimi_root: None,
            agent_file: None,
            validation_timeout_secs: 30,
            tool_query_timeout_secs: 10,
            output_limit_bytes: 100_000,
        }
    }
}

impl WrapperConfig {
    pub fn validate(&self) -> Result<()> {
        if self.validation_timeout_secs == 0 {
            return Err(anyhow!("validation_timeout_secs must be > 0"));
        }
        if self.tool_query_timeout_secs == 0 {
            return Err(anyhow!("tool_query_timeout_secs must be > 0"));
        }
        if self.output_limit_bytes == 0 {
            return Err(anyhow!("output_limit_bytes must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `WrapperConfig::default()`.
pub fn load_config(path: &Path) -> Result<WrapperConfig> {
    if !path.exists() {
        let cfg = WrapperConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: WrapperConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// The user's home directory, when resolvable.
pub fn home_dir() -> Option<PathBuf> {
    directories::UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Default config file location (`~/.kimi/jim.toml`).
pub fn default_config_path() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".kimi").join("jim.toml"))
}

/// Load config from the default location, or defaults if the home directory
/// cannot be resolved.
pub fn load_default_config() -> Result<WrapperConfig> {
    match default_config_path() {
        Some(path) => load_config(&path),
        None => Ok(WrapperConfig::default()),
    }
}
