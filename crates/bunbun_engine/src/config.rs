use std::path::Path;
use std::time::Duration;

use bunbun_core::physics_2d::PhysicsConfig;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::services::Color;

/// Engine settings, read from TOML. Every field has a default, so an empty
/// file is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `"auto"` to run as fast as the event loop allows, or frames per second.
    pub fps: String,
    pub debug_enabled: bool,
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Cap on fixed updates per frame; the backlog beyond it is dropped.
    pub max_steps_per_frame: u32,
    pub clear_color: Color,
    /// Directory asset paths are resolved against.
    pub asset_root: String,
    pub first_level: String,
    pub physics: PhysicsConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fps: "auto".to_string(),
            debug_enabled: false,
            title: "BunBun".to_string(),
            width: 1280,
            height: 720,
            max_steps_per_frame: 5,
            clear_color: [0.9, 0.9, 0.9, 1.0],
            asset_root: ".".to_string(),
            first_level: "assets/levels/intro.json".to_string(),
            physics: PhysicsConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.frame_rate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// `None` for `"auto"`.
    pub fn frame_rate(&self) -> Result<Option<u64>, ConfigError> {
        let fps = self.fps.trim();
        if fps.eq_ignore_ascii_case("auto") {
            return Ok(None);
        }
        match fps.parse::<u64>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(ConfigError::Fps(self.fps.clone())),
        }
    }

    pub fn target_frame_time(&self) -> Option<Duration> {
        self.frame_rate()
            .ok()
            .flatten()
            .map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_all_defaults() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn overrides_nested_physics_settings() {
        let config = EngineConfig::from_toml_str(
            r#"
            fps = "60"
            debug_enabled = true

            [physics]
            relaxation_count = 30
            "#,
        )
        .unwrap();

        assert!(config.debug_enabled);
        assert_eq!(config.frame_rate().unwrap(), Some(60));
        assert_eq!(config.physics.relaxation_count, 30);
        assert_eq!(config.physics.position_correction_rate, 0.8);
        assert_eq!(
            config.target_frame_time(),
            Some(Duration::from_secs_f64(1.0 / 60.0))
        );
    }

    #[test]
    fn auto_fps_has_no_target() {
        let config = EngineConfig::default();
        assert_eq!(config.frame_rate().unwrap(), None);
        assert_eq!(config.target_frame_time(), None);
    }

    #[test]
    fn rejects_bad_fps() {
        let err = EngineConfig::from_toml_str(r#"fps = "fast""#).unwrap_err();
        assert!(matches!(err, ConfigError::Fps(s) if s == "fast"));
        assert!(EngineConfig::from_toml_str(r#"fps = "0""#).is_err());
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            EngineConfig::from_toml_str("width = \"wide\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
