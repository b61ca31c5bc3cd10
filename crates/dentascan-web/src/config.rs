//! Configuration types for the DentaScan web server.
//!
//! This module provides all configuration structures used to control the
//! server, including where the segmentation service lives, the bind
//! address, and the optional scan archive backend.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DentascanError, Result};

/// The default config file name.
const CONFIG_FILE_NAME: &str = "dentascan.json";

/// Environment variable that overrides the segmentation service base URL.
pub const API_URL_ENV: &str = "DENTASCAN_API_URL";

/// Default base URL for the segmentation service.
fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

/// Default timeout in seconds for health probes.
const fn default_health_timeout() -> u64 {
    5
}

/// Default timeout in seconds for prediction requests.
const fn default_submit_timeout() -> u64 {
    60
}

/// Default host the server binds to.
fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Default port the server binds to.
const fn default_port() -> u16 {
    8080
}

/// Default storage bucket for archived scan images.
fn default_storage_bucket() -> String {
    "scans".to_string()
}

/// Main configuration for the DentaScan web server.
///
/// Controls the segmentation service endpoint and timeouts, the HTTP bind
/// address, and the optional archive backend credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Segmentation service endpoint and timeouts.
    #[serde(default)]
    pub inference: InferenceConfig,

    /// HTTP server bind settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Scan archive backend credentials. Absent unless a deployment has a
    /// backend to store scans in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive: Option<ArchiveConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inference: InferenceConfig::default(),
            server: ServerConfig::default(),
            archive: None,
        }
    }
}

/// Where the segmentation service lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    /// Base URL of the segmentation service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout in seconds for health probes.
    #[serde(default = "default_health_timeout")]
    pub health_timeout_secs: u64,

    /// Timeout in seconds for prediction requests.
    #[serde(default = "default_submit_timeout")]
    pub submit_timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            health_timeout_secs: default_health_timeout(),
            submit_timeout_secs: default_submit_timeout(),
        }
    }
}

impl InferenceConfig {
    /// Returns the health probe timeout as a [`Duration`].
    #[must_use]
    pub const fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    /// Returns the prediction request timeout as a [`Duration`].
    #[must_use]
    pub const fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }
}

/// HTTP server bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Host the server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the server binds to.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Returns the `host:port` address the server should bind to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Scan archive backend credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveConfig {
    /// Base URL of the archive backend project.
    pub base_url: String,

    /// Public (anon) API key for the archive backend.
    pub anon_key: String,

    /// Storage bucket uploaded scan images are kept in.
    #[serde(default = "default_storage_bucket")]
    pub storage_bucket: String,
}

impl Config {
    /// Loads configuration from the current working directory.
    ///
    /// Looks for `dentascan.json` in the current directory. If found, loads
    /// and validates it; otherwise returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// resulting configuration fails validation.
    pub fn load() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            DentascanError::config_parse(
                "<current directory>",
                format!("cannot determine current directory: {e}"),
            )
        })?;
        Self::load_from_dir(&current_dir)
    }

    /// Loads configuration from `dentascan.json` in the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// resulting configuration fails validation.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        Self::load_from_file(&config_path)
    }

    /// Loads configuration from the given file path.
    ///
    /// A missing file is not an error; the defaults are used instead. After
    /// parsing, the `DENTASCAN_API_URL` environment variable (if set)
    /// overrides the segmentation service base URL, and the result is
    /// validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// resulting configuration fails validation.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let mut config = Self::default();
                config.apply_env_override(std::env::var(API_URL_ENV).ok());
                config.validate()?;
                return Ok(config);
            }
            Err(e) => {
                return Err(DentascanError::config_parse(
                    path,
                    format!("failed to read file: {e}"),
                ));
            }
        };

        let mut config: Self = serde_json::from_str(&contents)
            .map_err(|e| DentascanError::config_parse(path, e.to_string()))?;
        config.apply_env_override(std::env::var(API_URL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Replaces the segmentation service base URL when an override is set.
    fn apply_env_override(&mut self, override_url: Option<String>) {
        if let Some(url) = override_url {
            if !url.trim().is_empty() {
                self.inference.base_url = url;
            }
        }
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigValidationError` describing the first invalid value
    /// found, with a suggestion for fixing it.
    pub fn validate(&self) -> Result<()> {
        if self.inference.base_url.trim().is_empty() {
            return Err(DentascanError::config_validation(
                "inference.baseUrl must not be empty",
                "Set inference.baseUrl to the segmentation service address in your dentascan.json",
            ));
        }

        if !self.inference.base_url.starts_with("http://")
            && !self.inference.base_url.starts_with("https://")
        {
            return Err(DentascanError::config_validation(
                "inference.baseUrl must start with http:// or https://",
                "Use a full URL like http://localhost:5000 in your dentascan.json",
            ));
        }

        if self.inference.health_timeout_secs == 0 {
            return Err(DentascanError::config_validation(
                "inference.healthTimeoutSecs must be greater than 0",
                "Set inference.healthTimeoutSecs to at least 1 second in your dentascan.json",
            ));
        }

        if self.inference.submit_timeout_secs == 0 {
            return Err(DentascanError::config_validation(
                "inference.submitTimeoutSecs must be greater than 0",
                "Set inference.submitTimeoutSecs to at least 1 second in your dentascan.json",
            ));
        }

        if self.inference.submit_timeout_secs < self.inference.health_timeout_secs {
            return Err(DentascanError::config_validation(
                "inference.submitTimeoutSecs must be at least inference.healthTimeoutSecs",
                "Raise inference.submitTimeoutSecs or lower inference.healthTimeoutSecs in your dentascan.json",
            ));
        }

        if self.server.host.trim().is_empty() {
            return Err(DentascanError::config_validation(
                "server.host must not be empty",
                "Set server.host to a bind address like 127.0.0.1 in your dentascan.json",
            ));
        }

        if self.server.port == 0 {
            return Err(DentascanError::config_validation(
                "server.port must be greater than 0",
                "Set server.port to a port like 8080 in your dentascan.json",
            ));
        }

        if let Some(archive) = &self.archive {
            if !archive.base_url.starts_with("http://")
                && !archive.base_url.starts_with("https://")
            {
                return Err(DentascanError::config_validation(
                    "archive.baseUrl must start with http:// or https://",
                    "Use the full project URL of your archive backend in your dentascan.json",
                ));
            }

            if archive.anon_key.trim().is_empty() {
                return Err(DentascanError::config_validation(
                    "archive.anonKey must not be empty when archive is configured",
                    "Provide the project anon key in your dentascan.json or remove the archive section",
                ));
            }

            if archive.storage_bucket.trim().is_empty() {
                return Err(DentascanError::config_validation(
                    "archive.storageBucket must not be empty",
                    "Name the storage bucket scans are uploaded to in your dentascan.json",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = Config::default();

        assert_eq!(config.inference.base_url, "http://localhost:5000");
        assert_eq!(config.inference.health_timeout_secs, 5);
        assert_eq!(config.inference.submit_timeout_secs, 60);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert!(config.archive.is_none());
    }

    #[test]
    fn test_default_config_passes_validation() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_timeout_helpers_convert_to_durations() {
        let config = Config::default();

        assert_eq!(config.inference.health_timeout(), Duration::from_secs(5));
        assert_eq!(config.inference.submit_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_bind_address() {
        let config = Config::default();
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");

        let custom = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
        };
        assert_eq!(custom.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_config_deserialization_with_defaults() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.inference.base_url, "http://localhost:5000");
        assert_eq!(config.server.port, 8080);
        assert!(config.archive.is_none());
    }

    #[test]
    fn test_config_deserialization_with_overrides() {
        let json = r#"{
            "inference": {
                "baseUrl": "http://segmenter:9000",
                "submitTimeoutSecs": 120
            },
            "server": {
                "port": 3000
            },
            "archive": {
                "baseUrl": "https://example.supabase.co",
                "anonKey": "public-anon-key"
            }
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.inference.base_url, "http://segmenter:9000");
        assert_eq!(config.inference.submit_timeout_secs, 120);
        // Check that other fields got their defaults
        assert_eq!(config.inference.health_timeout_secs, 5);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);

        let archive = config.archive.unwrap();
        assert_eq!(archive.base_url, "https://example.supabase.co");
        assert_eq!(archive.anon_key, "public-anon-key");
        assert_eq!(archive.storage_bucket, "scans");
    }

    #[test]
    fn test_load_from_file_valid_json() {
        use std::io::Write;

        let temp_dir = std::env::temp_dir();
        let config_path = temp_dir.join("test_dentascan_valid.json");

        // Write a valid config file
        let json = r#"{
            "inference": { "baseUrl": "http://10.0.0.5:5000" },
            "server": { "port": 9090 }
        }"#;
        let mut file = std::fs::File::create(&config_path).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        // Load and verify
        let config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config.inference.base_url, "http://10.0.0.5:5000");
        assert_eq!(config.server.port, 9090);
        // Default values should be applied for missing fields
        assert_eq!(config.inference.submit_timeout_secs, 60);

        // Cleanup
        std::fs::remove_file(&config_path).ok();
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        use std::io::Write;

        let temp_dir = std::env::temp_dir();
        let config_path = temp_dir.join("test_dentascan_invalid.json");

        // Write invalid JSON
        let mut file = std::fs::File::create(&config_path).unwrap();
        file.write_all(b"{ not valid json }").unwrap();

        // Load should fail with ConfigParseError
        let result = Config::load_from_file(&config_path);
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(
            matches!(&err, DentascanError::ConfigParseError { path, message } if *path == config_path && !message.is_empty()),
            "Expected ConfigParseError with correct path, got: {err:?}"
        );

        // Cleanup
        std::fs::remove_file(&config_path).ok();
    }

    #[test]
    fn test_load_from_file_nonexistent_returns_default() {
        let nonexistent_path = PathBuf::from("/nonexistent/path/dentascan.json");
        let config = Config::load_from_file(&nonexistent_path).unwrap();

        // Should return default config
        assert_eq!(config.inference.base_url, "http://localhost:5000");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_from_dir_finds_dentascan_json() {
        use std::io::Write;

        let temp_dir = std::env::temp_dir().join("test_dentascan_dir");
        std::fs::create_dir_all(&temp_dir).unwrap();

        let config_path = temp_dir.join("dentascan.json");
        let json = r#"{"server": {"host": "0.0.0.0"}}"#;
        let mut file = std::fs::File::create(&config_path).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        // Load from directory
        let config = Config::load_from_dir(&temp_dir).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");

        // Cleanup
        std::fs::remove_file(&config_path).ok();
        std::fs::remove_dir(&temp_dir).ok();
    }

    #[test]
    fn test_load_from_dir_no_config_returns_default() {
        let temp_dir = std::env::temp_dir().join("test_dentascan_empty_dir");
        std::fs::create_dir_all(&temp_dir).unwrap();

        // Directory exists but no dentascan.json
        let config = Config::load_from_dir(&temp_dir).unwrap();
        assert_eq!(config.inference.base_url, "http://localhost:5000");

        // Cleanup
        std::fs::remove_dir(&temp_dir).ok();
    }

    #[test]
    fn test_load_from_file_validates_after_parsing() {
        use std::io::Write;

        let temp_dir = std::env::temp_dir();
        let config_path = temp_dir.join("test_dentascan_zero_timeout.json");

        let json = r#"{"inference": {"healthTimeoutSecs": 0}}"#;
        let mut file = std::fs::File::create(&config_path).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let result = Config::load_from_file(&config_path);
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            DentascanError::ConfigValidationError { .. }
        ));

        // Cleanup
        std::fs::remove_file(&config_path).ok();
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let mut config = Config::default();
        config.inference.base_url = "   ".to_string();

        let err = config.validate().unwrap_err();
        assert!(matches!(
            &err,
            DentascanError::ConfigValidationError { message, .. }
                if message.contains("inference.baseUrl must not be empty")
        ));
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let mut config = Config::default();
        config.inference.base_url = "ftp://segmenter".to_string();

        let err = config.validate().unwrap_err();
        assert!(matches!(
            &err,
            DentascanError::ConfigValidationError { message, .. }
                if message.contains("http:// or https://")
        ));
    }

    #[test]
    fn test_validate_rejects_zero_timeouts() {
        let mut config = Config::default();
        config.inference.health_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.inference.submit_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_submit_timeout_below_health_timeout() {
        let mut config = Config::default();
        config.inference.health_timeout_secs = 10;
        config.inference.submit_timeout_secs = 5;

        let err = config.validate().unwrap_err();
        assert!(matches!(
            &err,
            DentascanError::ConfigValidationError { suggestion, .. }
                if suggestion.contains("Raise inference.submitTimeoutSecs")
        ));
    }

    #[test]
    fn test_validate_rejects_bad_server_settings() {
        let mut config = Config::default();
        config.server.host = String::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_checks_archive_when_present() {
        let mut config = Config::default();
        config.archive = Some(ArchiveConfig {
            base_url: "https://example.supabase.co".to_string(),
            anon_key: String::new(),
            storage_bucket: "scans".to_string(),
        });

        let err = config.validate().unwrap_err();
        assert!(matches!(
            &err,
            DentascanError::ConfigValidationError { message, .. }
                if message.contains("archive.anonKey")
        ));
    }

    #[test]
    fn test_env_override_replaces_base_url() {
        let mut config = Config::default();
        config.apply_env_override(Some("http://10.0.0.9:5000".to_string()));
        assert_eq!(config.inference.base_url, "http://10.0.0.9:5000");
    }

    #[test]
    fn test_env_override_ignores_unset_and_blank_values() {
        let mut config = Config::default();
        config.apply_env_override(None);
        assert_eq!(config.inference.base_url, "http://localhost:5000");

        config.apply_env_override(Some("   ".to_string()));
        assert_eq!(config.inference.base_url, "http://localhost:5000");
    }
}
