/// Config file loading and creation for the poolseed CLI.
///
/// Config lives at ~/.config/poolseed/config.toml.
/// All fields are optional; CLI args override config values.
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PoolseedConfig {
    pub max_rounds: Option<usize>,
    pub pools: Option<usize>,
    pub delimiter: Option<String>,
    pub show_roster: Option<bool>,
    pub json: Option<bool>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# poolseed configuration
# All values here can be overridden by CLI flags.

# Cap on club conflict-resolution rounds
# max_rounds = 10000

# Fixed number of pools (default: chosen from the roster size)
# pools = 6

# Field delimiter of roster files
# delimiter = \",\"

# Print the competitor list before the pools
# show_roster = true

# Emit JSON instead of the text report
# json = false
";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("HOME environment variable not set")]
    NoHome,

    #[error("Failed to read config at {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse config at {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },

    #[error("Config file already exists at {0}")]
    Exists(PathBuf),

    #[error("Failed to write config to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// ~/.config/poolseed/config.toml, if HOME is set.
pub fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".config").join("poolseed").join("config.toml"))
}

pub fn parse_config(content: &str) -> Result<PoolseedConfig, toml::de::Error> {
    toml::from_str(content)
}

/// A missing file yields the all-`None` config.
pub fn load_config(path: &Path) -> Result<PoolseedConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(PoolseedConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the commented template to `path`, creating parent directories.
/// Never overwrites an existing file.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::Exists(path.to_path_buf()));
    }
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_err)
}

/// Create the default config at [`default_config_path`].
pub fn create_default_config() -> Result<PathBuf, ConfigError> {
    let path = default_config_path().ok_or(ConfigError::NoHome)?;
    write_default_config(&path)?;
    Ok(path)
}
