use crate::metadata::METADATA_FILE_NAME;
use crate::version::BuildNumberScheme;
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "SET_VERSION_CONFIG";

const DEFAULT_PREFIX: &str = "5010000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the relative paths below are resolved against. The current
    /// directory when unset.
    pub base_dir: Option<PathBuf>,
    pub metadata_file: String,
    pub header_file: String,
    pub primary_rc: String,
    pub updater_rc: String,
    pub build_number: BuildNumberConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildNumberConfig {
    pub scheme: BuildNumberScheme,
    /// Only used by the `prefixed` scheme.
    pub prefix: String,
}

impl Default for BuildNumberConfig {
    fn default() -> Self {
        Self {
            scheme: BuildNumberScheme::default(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: None,
            metadata_file: METADATA_FILE_NAME.to_string(),
            header_file: "../SourceFiles/core/version.h".to_string(),
            primary_rc: "../Resources/winrc/Telegram.rc".to_string(),
            updater_rc: "../Resources/winrc/Updater.rc".to_string(),
            build_number: BuildNumberConfig::default(),
        }
    }
}

/// Concrete locations of every file a run touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampPaths {
    pub metadata: PathBuf,
    pub header: PathBuf,
    pub primary_rc: PathBuf,
    pub updater_rc: PathBuf,
}

impl Config {
    /// Loads the file named by `SET_VERSION_CONFIG`, which must exist, or
    /// else the per-user config when there is one.
    pub fn load() -> Result<Self> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            debug!("Using config from {}={}", CONFIG_PATH_ENV, path.display());
            return Self::load_from_path(&path);
        }

        Self::load_or_default(&get_config_path()?)
    }

    /// Loads `path` if it exists. Otherwise returns the built-in defaults
    /// without writing anything.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        Self::load_from_path(path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Resolves the configured file names against `base_dir`, or against
    /// the current directory when no base is set.
    pub fn paths(&self) -> Result<StampPaths> {
        let base = match &self.base_dir {
            Some(dir) => dir.clone(),
            None => env::current_dir().context("Failed to determine current directory")?,
        };
        Ok(self.paths_in(&base))
    }

    pub fn paths_in(&self, base: &Path) -> StampPaths {
        StampPaths {
            metadata: base.join(normalize(&self.metadata_file)),
            header: base.join(normalize(&self.header_file)),
            primary_rc: base.join(normalize(&self.primary_rc)),
            updater_rc: base.join(normalize(&self.updater_rc)),
        }
    }
}

/// Accepts either separator in configured paths.
#[cfg(not(windows))]
fn normalize(raw: &str) -> PathBuf {
    PathBuf::from(raw.replace('\\', "/"))
}

#[cfg(windows)]
fn normalize(raw: &str) -> PathBuf {
    PathBuf::from(raw)
}

fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("org", "materialgram", "set_version")
        .ok_or_else(|| anyhow!("Failed to determine config directory"))?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}
