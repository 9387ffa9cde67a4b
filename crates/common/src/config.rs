//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where gardens are stored.
    pub gardens_dir: PathBuf,

    /// Default collage settings.
    pub compose: ComposeDefaults,

    /// Default timelapse settings.
    pub timelapse: TimelapseDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default collage parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeDefaults {
    /// Square canvas side in logical pixels.
    pub canvas_side: u32,

    /// JPEG quality for exported collages (1-100).
    pub jpeg_quality: u8,

    /// Default gutter between photos in pixels.
    pub spacing: u32,

    /// Default background color as hex string (for example `#ffffff`).
    pub background: String,
}

/// Default timelapse parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelapseDefaults {
    /// Square canvas side in pixels.
    pub canvas_side: u32,

    /// Output frame rate.
    pub fps: u32,

    /// Seconds each photo stays on screen.
    pub seconds_per_photo: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "bloomlog=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gardens_dir: dirs_default_gardens(),
            compose: ComposeDefaults::default(),
            timelapse: TimelapseDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ComposeDefaults {
    fn default() -> Self {
        Self {
            canvas_side: 1200,
            jpeg_quality: 90,
            spacing: 10,
            background: "#ffffff".to_string(),
        }
    }
}

impl Default for TimelapseDefaults {
    fn default() -> Self {
        Self {
            canvas_side: 1080,
            fps: 30,
            seconds_per_photo: 0.5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("bloomlog").join("config.json")
}

/// Default gardens directory.
fn dirs_default_gardens() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("bloomlog").join("gardens")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.compose.canvas_side, 1200);
        assert_eq!(config.timelapse.fps, 30);
        assert!(config.compose.jpeg_quality <= 100);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.compose.spacing, config.compose.spacing);
        assert_eq!(parsed.logging.level, "info");
    }
}
