use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{
    CADENCE_MS, DEFAULT_BACKEND_URL, IDEAL_HEIGHT, IDEAL_WIDTH, INFO_POLL_MS, JPEG_QUALITY,
    REQUEST_TIMEOUT_MS,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Client settings, persisted as JSON. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub backend_url: String,
    pub cadence_ms: u64,
    pub info_poll_ms: u64,
    pub jpeg_quality: u8,
    pub camera_device: String,
    /// ffmpeg input format for the camera (e.g. `v4l2`, `avfoundation`,
    /// `dshow`). `None` lets ffmpeg detect the format, which suits files and URLs.
    pub camera_format: Option<String>,
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub request_timeout_ms: u64,
    pub discard_stale_responses: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            cadence_ms: CADENCE_MS,
            info_poll_ms: INFO_POLL_MS,
            jpeg_quality: JPEG_QUALITY,
            camera_device: default_camera_device().to_string(),
            camera_format: default_camera_format().map(str::to_string),
            ideal_width: IDEAL_WIDTH,
            ideal_height: IDEAL_HEIGHT,
            request_timeout_ms: REQUEST_TIMEOUT_MS,
            discard_stale_responses: true,
        }
    }
}

impl ClientConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("FaceWatch").join("config.json"))
    }

    /// Loads from the default location, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring config: {e}");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Writes to the default location and returns the path written.
    pub fn save(&self) -> std::io::Result<PathBuf> {
        let path = Self::default_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no config directory")
        })?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend_url.trim().is_empty() {
            return Err(ConfigError::Invalid("backend_url must not be empty".into()));
        }
        if self.cadence_ms == 0 || self.info_poll_ms == 0 {
            return Err(ConfigError::Invalid(
                "cadence_ms and info_poll_ms must be positive".into(),
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::Invalid(format!(
                "jpeg_quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.cadence_ms)
    }

    pub fn info_poll_interval(&self) -> Duration {
        Duration::from_millis(self.info_poll_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_camera_device() -> &'static str {
    #[cfg(target_os = "macos")]
    {
        "0"
    }
    #[cfg(target_os = "windows")]
    {
        "video=Integrated Camera"
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        "/dev/video0"
    }
}

fn default_camera_format() -> Option<&'static str> {
    #[cfg(target_os = "macos")]
    {
        Some("avfoundation")
    }
    #[cfg(target_os = "windows")]
    {
        Some("dshow")
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        Some("v4l2")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_client_cadence() {
        let config = ClientConfig::default();
        assert_eq!(config.backend_url, "http://localhost:5000");
        assert_eq!(config.cadence(), Duration::from_secs(1));
        assert_eq!(config.info_poll_interval(), Duration::from_secs(10));
        assert_eq!(config.jpeg_quality, 80);
        assert_eq!((config.ideal_width, config.ideal_height), (640, 480));
        assert!(config.discard_stale_responses);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.json");
        let config = ClientConfig {
            backend_url: "http://10.0.0.2:5000".into(),
            cadence_ms: 500,
            ..ClientConfig::default()
        };
        config.save_to(&path).unwrap();

        let loaded = ClientConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{"backend_url":"http://example:8080"}"#).unwrap();

        let loaded = ClientConfig::load_from(&path).unwrap();
        assert_eq!(loaded.backend_url, "http://example:8080");
        assert_eq!(loaded.cadence_ms, CADENCE_MS);
        assert_eq!(loaded.info_poll_ms, INFO_POLL_MS);
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let err = ClientConfig::load_from(&tmp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_malformed_json_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = ClientConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_cadence() {
        let config = ClientConfig {
            cadence_ms: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_quality() {
        let config = ClientConfig {
            jpeg_quality: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
