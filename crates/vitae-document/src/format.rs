use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::{DocumentError, Result};

/// On-disk representation of a résumé document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detect the format from the file extension (`.json`, `.yaml`, `.yml`).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
        match extension.as_deref() {
            Some("json") => Ok(DocumentFormat::Json),
            Some("yaml") | Some("yml") => Ok(DocumentFormat::Yaml),
            _ => Err(DocumentError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
        }
    }

    /// `<stem>.<extension>`; dots already present in the stem are kept.
    pub fn path_for(self, stem: &Path) -> PathBuf {
        let mut name = OsString::from(stem.as_os_str());
        name.push(".");
        name.push(self.extension());
        PathBuf::from(name)
    }

    pub fn parse(self, contents: &str) -> Result<Value> {
        match self {
            DocumentFormat::Json => Ok(serde_json::from_str(contents)?),
            DocumentFormat::Yaml => Ok(serde_yaml::from_str(contents)?),
        }
    }

    pub fn render(self, value: &Value) -> Result<String> {
        match self {
            DocumentFormat::Json => {
                let mut encoded = serde_json::to_string_pretty(value)?;
                encoded.push('\n');
                Ok(encoded)
            }
            DocumentFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
