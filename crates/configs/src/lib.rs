use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::Deserialize;

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const DATA_FILE_ENV: &str = "PET_HEALTH_DATA_FILE";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_file: default_data_file(), pretty: default_pretty() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: LogFormat::default(), filter: default_filter() }
    }
}

fn default_data_file() -> PathBuf { PathBuf::from("data.json") }
fn default_pretty() -> bool { true }
fn default_filter() -> String { "info".to_string() }

pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| anyhow!("cannot read {path}: {e}"))?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Like `load_and_validate`, but a config file that does not exist yields
    /// the defaults. Any other problem (unreadable, bad TOML, invalid values)
    /// is an error. The flag reports whether the file was found.
    pub fn load_or_default() -> Result<(Self, bool)> {
        Self::load_path_or_default(&config_path())
    }

    pub fn load_path_or_default(path: &str) -> Result<(Self, bool)> {
        let (mut cfg, found) = match std::fs::read_to_string(path) {
            Ok(content) => (load_from_str(&content)?, true),
            Err(e) if e.kind() == ErrorKind::NotFound => (AppConfig::default(), false),
            Err(e) => return Err(anyhow!("cannot read {path}: {e}")),
        };
        cfg.normalize_and_validate()?;
        Ok((cfg, found))
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.storage.normalize_from_env();
        self.storage.validate()?;
        self.logging.normalize();
        Ok(())
    }
}

impl StorageConfig {
    /// A non-empty `PET_HEALTH_DATA_FILE` overrides the configured path.
    pub fn normalize_from_env(&mut self) {
        if let Ok(path) = std::env::var(DATA_FILE_ENV) {
            if !path.trim().is_empty() {
                self.data_file = PathBuf::from(path);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(anyhow!("storage.data_file must not be empty"));
        }
        if self.data_file.file_name().is_none() {
            return Err(anyhow!("storage.data_file must name a file: {}", self.data_file.display()));
        }
        Ok(())
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.filter.trim().is_empty() {
            self.filter = default_filter();
        }
    }
}
