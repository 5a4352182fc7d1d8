//! `config.toml` settings.
//!
//! Only deployment details live here. Grid geometry and batch size are fixed
//! in [`crate::capture`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

const MIN_DISPLAY_SCALE: f32 = 1.0;
const MAX_DISPLAY_SCALE: f32 = 6.0;

/// Settings loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub collaborator: CollaboratorSettings,
    #[serde(default)]
    pub canvas: CanvasSettings,
}

/// Where the trainer/predictor service listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboratorSettings {
    /// Scheme and host, without a trailing slash.
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for CollaboratorSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl CollaboratorSettings {
    /// `host:port`, the URL every request is posted to.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host.trim_end_matches('/'), self.port)
    }
}

/// On-screen presentation of the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSettings {
    /// Screen points per logical unit. Clamped to a usable range on load.
    #[serde(default = "default_display_scale")]
    pub display_scale: f32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            display_scale: default_display_scale(),
        }
    }
}

fn default_host() -> String {
    "http://localhost".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_display_scale() -> f32 {
    2.0
}

impl AppConfig {
    fn normalized(mut self) -> Self {
        let scale = self.canvas.display_scale;
        self.canvas.display_scale = if scale.is_finite() {
            scale.clamp(MIN_DISPLAY_SCALE, MAX_DISPLAY_SCALE)
        } else {
            default_display_scale()
        };
        self
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No suitable config directory found: {0}")]
    NoConfigDir(#[from] app_dirs::AppDirError),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    load_from(&config_path()?)
}

/// Load a specific file; a missing file yields defaults.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<AppConfig>(&text)
        .map(AppConfig::normalized)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
}

/// Write the configuration, overwriting any previous contents.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    let data = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, data).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
