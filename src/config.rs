use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::paths::expand_tilde;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// External programs and the fixed arguments they are started with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ranker: String,
    pub ranker_args: Vec<String>,
    pub picker: String,
    pub picker_args: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ranker: "fasd".to_string(),
            ranker_args: vec!["-dl".to_string()],
            picker: "fzf".to_string(),
            picker_args: vec!["--no-multi".to_string()],
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let proj = directories::ProjectDirs::from("", "", "fm-jump")
        .context("could not determine config directory")?;
    Ok(proj.config_dir().join("config.toml"))
}

/// Load `explicit` if given, otherwise the default location. Only the
/// default location may be absent.
pub fn load_config_or_default(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("config not found at {}", path.display());
        }
        return load_config(path);
    }

    let path = default_config_path()?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    load_config(&path)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<Config> {
    let mut config: Config = toml::from_str(contents).context("failed to parse config TOML")?;

    if config.tools.ranker.trim().is_empty() {
        bail!("tools.ranker must not be empty");
    }
    if config.tools.picker.trim().is_empty() {
        bail!("tools.picker must not be empty");
    }

    config.tools.ranker = expand_tilde(&config.tools.ranker).display().to_string();
    config.tools.picker = expand_tilde(&config.tools.picker).display().to_string();

    Ok(config)
}
