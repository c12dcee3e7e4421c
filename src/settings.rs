//! Settings management for matrix-fx
//!
//! Handles loading/saving of the XML settings file in the user config
//! directory.

use quick_xml::de::from_str;
use quick_xml::se::to_string;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use crate::api::ServerConfig;
use crate::telemetry::LogConfig;

/// Lowest accepted frame rate
pub const MIN_FPS: u32 = 1;
/// Highest accepted frame rate
pub const MAX_FPS: u32 = 240;
/// Largest accepted matrix width or height
pub const MAX_MATRIX_DIMENSION: u32 = 4096;

fn default_matrix_width() -> u32 {
    48
}

fn default_matrix_height() -> u32 {
    16
}

fn default_target_fps() -> u32 {
    60
}

fn default_api_server_enabled() -> bool {
    true
}

fn default_api_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_api_port() -> u16 {
    crate::api::server::DEFAULT_API_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Host settings stored in settings.xml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "MatrixFxSettings")]
pub struct Settings {
    /// Matrix width in pixels
    #[serde(rename = "matrixWidth", default = "default_matrix_width")]
    pub matrix_width: u32,

    /// Matrix height in pixels
    #[serde(rename = "matrixHeight", default = "default_matrix_height")]
    pub matrix_height: u32,

    /// Render loop rate (1-240)
    #[serde(rename = "targetFps", default = "default_target_fps")]
    pub target_fps: u32,

    /// Whether the HTTP control API is started
    #[serde(rename = "apiServerEnabled", default = "default_api_server_enabled")]
    pub api_server_enabled: bool,

    /// Address the control API binds to
    #[serde(rename = "apiBindAddress", default = "default_api_bind_address")]
    pub api_bind_address: String,

    #[serde(rename = "apiPort", default = "default_api_port")]
    pub api_port: u16,

    /// Print a coarse ANSI preview of each frame to the terminal
    #[serde(rename = "previewEnabled", default)]
    pub preview_enabled: bool,

    /// Default tracing filter when no env override is set
    #[serde(rename = "logLevel", default = "default_log_level")]
    pub log_level: String,

    /// Optional log file path
    #[serde(rename = "logFile", default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            matrix_width: default_matrix_width(),
            matrix_height: default_matrix_height(),
            target_fps: default_target_fps(),
            api_server_enabled: default_api_server_enabled(),
            api_bind_address: default_api_bind_address(),
            api_port: default_api_port(),
            preview_enabled: false,
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

impl Settings {
    /// Default settings file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("MatrixFx");
            p.push("settings.xml");
            p
        })
    }

    /// Load settings from the config directory, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from_file(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid settings file");
                Self::default()
            }
        }
    }

    /// Load settings from an XML file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        let mut settings: Self = from_str(&contents)?;
        settings.clamp_fps();
        settings.clamp_dimensions();
        Ok(settings)
    }

    /// Save settings to an XML file, creating parent directories
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let xml = to_string(self)?;
        let formatted = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", xml);
        fs::write(path, formatted)?;
        Ok(())
    }

    /// Clamp FPS to valid range (1-240)
    pub fn clamp_fps(&mut self) {
        self.target_fps = self.target_fps.clamp(MIN_FPS, MAX_FPS);
    }

    /// Clamp matrix size to 1-4096 on each axis
    pub fn clamp_dimensions(&mut self) {
        self.matrix_width = self.matrix_width.clamp(1, MAX_MATRIX_DIMENSION);
        self.matrix_height = self.matrix_height.clamp(1, MAX_MATRIX_DIMENSION);
    }

    /// Control server address, falling back to all interfaces on a bad address
    pub fn server_config(&self) -> ServerConfig {
        let bind_address = self.api_bind_address.parse::<IpAddr>().unwrap_or_else(|_| {
            tracing::warn!(
                address = %self.api_bind_address,
                "Invalid apiBindAddress, using 0.0.0.0"
            );
            ServerConfig::default().bind_address
        });

        ServerConfig {
            bind_address,
            port: self.api_port,
        }
    }

    /// Logging setup derived from these settings
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            file_enabled: self.log_file.is_some(),
            file_path: self.log_file.as_ref().map(PathBuf::from),
            default_level: self.log_level.clone(),
            ..LogConfig::default()
        }
    }
}

/// Settings-related errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::DeError),
    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::SeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.matrix_width, 48);
        assert_eq!(settings.matrix_height, 16);
        assert_eq!(settings.target_fps, 60);
        assert!(settings.api_server_enabled);
        assert_eq!(settings.api_port, 8080);
        assert!(!settings.preview_enabled);
        assert_eq!(settings.log_level, "info");
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn test_fps_clamping() {
        let mut settings = Settings::default();
        settings.target_fps = 300;
        settings.clamp_fps();
        assert_eq!(settings.target_fps, 240);

        settings.target_fps = 0;
        settings.clamp_fps();
        assert_eq!(settings.target_fps, 1);
    }

    #[test]
    fn test_dimension_clamping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.xml");
        fs::write(
            &path,
            "<MatrixFxSettings><matrixWidth>70000</matrixWidth><matrixHeight>0</matrixHeight></MatrixFxSettings>",
        )
        .unwrap();

        let loaded = Settings::load_from_file(&path).unwrap();
        assert_eq!(loaded.matrix_width, MAX_MATRIX_DIMENSION);
        assert_eq!(loaded.matrix_height, 1);

        let mut settings = Settings {
            matrix_width: 64,
            matrix_height: 32,
            ..Settings::default()
        };
        settings.clamp_dimensions();
        assert_eq!((settings.matrix_width, settings.matrix_height), (64, 32));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.xml");

        let settings = Settings {
            matrix_width: 64,
            api_port: 9090,
            preview_enabled: true,
            log_file: Some("matrix.log".to_string()),
            ..Settings::default()
        };
        settings.save_to_file(&path).unwrap();

        let loaded = Settings::load_from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.xml");
        fs::write(
            &path,
            "<MatrixFxSettings><apiPort>7000</apiPort><targetFps>500</targetFps></MatrixFxSettings>",
        )
        .unwrap();

        let loaded = Settings::load_from_file(&path).unwrap();
        assert_eq!(loaded.api_port, 7000);
        assert_eq!(loaded.target_fps, 240);
        assert_eq!(loaded.matrix_width, 48);
        assert!(loaded.api_server_enabled);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.xml");
        fs::write(&path, "<MatrixFxSettings><apiPort>not a port</apiPort></MatrixFxSettings>").unwrap();

        assert!(matches!(
            Settings::load_from_file(&path),
            Err(SettingsError::XmlParse(_))
        ));
        assert!(matches!(
            Settings::load_from_file(&dir.path().join("missing.xml")),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_server_config() {
        let mut settings = Settings {
            api_bind_address: "127.0.0.1".to_string(),
            api_port: 8181,
            ..Settings::default()
        };
        let config = settings.server_config();
        assert_eq!(config.bind_address, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.port, 8181);

        settings.api_bind_address = "not-an-ip".to_string();
        assert_eq!(settings.server_config().bind_address, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    #[test]
    fn test_log_config() {
        let settings = Settings {
            log_level: "debug".to_string(),
            log_file: Some("out.log".to_string()),
            ..Settings::default()
        };
        let config = settings.log_config();
        assert_eq!(config.default_level, "debug");
        assert!(config.file_enabled);
        assert_eq!(config.file_path, Some(PathBuf::from("out.log")));
    }
}
