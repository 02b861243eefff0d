use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use super::interpolation::{
    interpolate_toml,
    InterpolationError,
};
use super::schema::NoticeConfig;

pub const CONFIG_PATH_ENV: &str = "LARK_NOTICE_CONFIG_PATH";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] InterpolationError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type ConfigLoadResult<T> = Result<T, ConfigLoadError>;

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn discover_config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            tracing::debug!("Using config path from {}: {}", CONFIG_PATH_ENV, path);
            return PathBuf::from(path);
        }

        let local = PathBuf::from("lark-notice.toml");
        if local.exists() {
            tracing::debug!("Using working directory config: {}", local.display());
            return local;
        }

        let fallback = NoticeConfig::default_config_dir().join("config.toml");
        tracing::debug!("Using fallback config path: {}", fallback.display());
        fallback
    }

    pub fn load_default() -> ConfigLoadResult<NoticeConfig> {
        let path = Self::discover_config_path();
        Self::load(&path)
    }

    pub fn load(path: &Path) -> ConfigLoadResult<NoticeConfig> {
        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn load_or_create(path: &Path) -> ConfigLoadResult<NoticeConfig> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = NoticeConfig::default();
            Self::save(&config, path)?;
            tracing::info!("Created default config at {:?}", path);
            Ok(config)
        }
    }

    /// Parses a config and expands `${VAR}` references in every string value.
    pub fn parse(content: &str) -> ConfigLoadResult<NoticeConfig> {
        let mut value: toml::Value = toml::from_str(content)?;

        interpolate_toml(&mut value)?;

        let config: NoticeConfig = value.try_into().map_err(|e| {
            ConfigLoadError::InvalidConfig(format!("Failed to deserialize config: {}", e))
        })?;

        tracing::debug!(robots = config.robots.len(), "Loaded config");

        Ok(config)
    }

    /// Parses a config without interpolation, as written in the file.
    pub fn parse_raw(content: &str) -> ConfigLoadResult<NoticeConfig> {
        let config: NoticeConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn to_toml(config: &NoticeConfig) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(config)
    }

    pub fn save(config: &NoticeConfig, path: &Path) -> ConfigLoadResult<()> {
        let toml_str = Self::to_toml(config).map_err(|e| {
            ConfigLoadError::InvalidConfig(format!("Failed to serialize config: {}", e))
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, toml_str)?;
        Ok(())
    }
}
