// Tue Jan 13 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::memory::Address;

pub const DEFAULT_SCAN_ADDRESS: u64 = 0x014c_e740;
pub const DEFAULT_SCAN_LENGTH: usize = 4096;
pub const DEFAULT_CATEGORY: &str = "CheckMemory";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub address: u64,
    pub length: usize,
    pub category: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_SCAN_ADDRESS,
            length: DEFAULT_SCAN_LENGTH,
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub prefix: String,
    pub level: String,
    pub echo_stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            prefix: "d3d8_struct_scan".to_string(),
            level: "debug".to_string(),
            echo_stderr: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON config. Missing keys take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        if !ext.eq_ignore_ascii_case("json") {
            return Err(ConfigError::UnsupportedFormat(ext.to_string()));
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_scan_range(mut self, address: u64, length: usize) -> Self {
        self.scan.address = address;
        self.scan.length = length;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.scan.category = category.into();
        self
    }

    pub fn scan_address(&self) -> Address {
        Address::new(self.scan.address)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.length == 0 {
            return Err(ConfigError::Invalid("scan.length must be > 0".to_string()));
        }
        if self.scan.address == 0 {
            return Err(ConfigError::Invalid("scan.address must not be null".to_string()));
        }
        if self.scan.address.checked_add(self.scan.length as u64).is_none() {
            return Err(ConfigError::Invalid(format!(
                "scan range 0x{:x} + {} overflows the address space",
                self.scan.address, self.scan.length
            )));
        }
        if self.scan.category.trim().is_empty() {
            return Err(ConfigError::Invalid("scan.category must not be empty".to_string()));
        }
        if self.logging.prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.prefix must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scan.address, 0x014c_e740);
        assert_eq!(config.scan.length, 4096);
        assert_eq!(config.scan.category, "CheckMemory");
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        fs::write(&path, r#"{ "scan": { "length": 64 } }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.scan.length, 64);
        assert_eq!(config.scan.address, DEFAULT_SCAN_ADDRESS);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config::new().with_scan_range(0x0040_0000, 256).with_category("Present");

        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        assert!(Config::new().with_scan_range(0x1000, 0).validate().is_err());
        assert!(Config::new().with_scan_range(0, 16).validate().is_err());
        assert!(Config::new().with_scan_range(u64::MAX - 4, 16).validate().is_err());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load(dir.path().join("missing.json")),
            Err(ConfigError::NotFound(_))
        ));

        let toml = dir.path().join("config.toml");
        fs::write(&toml, "").unwrap();
        assert!(matches!(Config::load(&toml), Err(ConfigError::UnsupportedFormat(_))));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Parse(_))));
    }
}
