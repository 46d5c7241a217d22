use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "vitae.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output: OutputSettings,
    pub schema: SchemaSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub dir: PathBuf,
    pub json: bool,
    pub yaml: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            json: true,
            yaml: true,
        }
    }
}

/// Optional JSON Schema override; the generated schema is used otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaSettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

/// Load settings from an explicit path, which must exist, or from `vitae.toml` in the
/// working directory when present. Falls back to defaults otherwise.
pub fn load_settings(explicit: Option<&Path>) -> SettingsResult<Settings> {
    match explicit {
        Some(path) if !path.exists() => Err(SettingsError::NotFound(path.to_path_buf())),
        Some(path) => read_settings(path),
        None => {
            let path = Path::new(DEFAULT_SETTINGS_FILE);
            if path.exists() {
                read_settings(path)
            } else {
                Ok(Settings::default())
            }
        }
    }
}

fn read_settings(path: &Path) -> SettingsResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
}
