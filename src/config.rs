use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use crate::engine::gain::{DEFAULT_GAIN, MAX_GAIN, MIN_GAIN};

/// Frames per render quantum when nothing else is configured.
pub const DEFAULT_RENDER_QUANTUM: usize = 128;
/// Seconds the slider takes to reach a new gain.
pub const DEFAULT_GAIN_RAMP_SECONDS: f32 = 0.1;
/// Longest gain ramp a config file may ask for.
pub const MAX_GAIN_RAMP_SECONDS: f32 = 10.0;

/// Read-only session settings. Nothing here is ever written back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Case-insensitive substring of the output device name.
    pub output_device: Option<String>,
    pub render_quantum: usize,
    pub gain_ramp_seconds: f32,
    pub initial_gain: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            output_device: None,
            render_quantum: DEFAULT_RENDER_QUANTUM,
            gain_ramp_seconds: DEFAULT_GAIN_RAMP_SECONDS,
            initial_gain: DEFAULT_GAIN,
        }
    }
}

impl SessionConfig {
    /// Load from the user config directory, falling back to defaults when
    /// there is no config file.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let config: SessionConfig = serde_json::from_reader(file)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::info!("loaded session config from {}", path.display());
        Ok(config.sanitized())
    }

    fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("square-keyboard");
        path.push("config.json");
        Some(path)
    }

    fn sanitized(mut self) -> Self {
        self.render_quantum = self.render_quantum.max(1);
        self.initial_gain = self.initial_gain.clamp(MIN_GAIN, MAX_GAIN);
        if !self.gain_ramp_seconds.is_finite() || self.gain_ramp_seconds < 0.0 {
            self.gain_ramp_seconds = 0.0;
        }
        self.gain_ramp_seconds = self.gain_ramp_seconds.min(MAX_GAIN_RAMP_SECONDS);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn load_str(contents: &str) -> Result<SessionConfig> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, contents).unwrap();
        SessionConfig::load_from(&path)
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = load_str(r#"{ "output_device": "USB" }"#).unwrap();

        assert_eq!(config.output_device.as_deref(), Some("USB"));
        assert_eq!(config.render_quantum, DEFAULT_RENDER_QUANTUM);
        assert_eq!(config.gain_ramp_seconds, DEFAULT_GAIN_RAMP_SECONDS);
        assert_eq!(config.initial_gain, DEFAULT_GAIN);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config =
            load_str(r#"{ "render_quantum": 0, "gain_ramp_seconds": -2.0, "initial_gain": 4.0 }"#).unwrap();

        assert_eq!(config.render_quantum, 1);
        assert_eq!(config.gain_ramp_seconds, 0.0);
        assert_eq!(config.initial_gain, MAX_GAIN);
    }

    #[test]
    fn huge_ramp_is_capped() {
        let config = load_str(r#"{ "gain_ramp_seconds": 1e30 }"#).unwrap();
        assert_eq!(config.gain_ramp_seconds, MAX_GAIN_RAMP_SECONDS);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(load_str("{ render_quantum: ").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(SessionConfig::load_from(&dir.path().join("absent.json")).is_err());
    }
}
