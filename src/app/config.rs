//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::camera::CameraConfig;

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in logical pixels
    pub width: f64,
    /// Window height in logical pixels
    pub height: f64,
    /// Whether the window should be fullscreen
    pub fullscreen: bool,
    /// Whether the window should be resizable
    pub resizable: bool,
    /// Whether the window should be decorated (has title bar, borders, etc.)
    pub decorated: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "frame-ui demo".to_string(),
            width: 800.0,
            height: 600.0,
            fullscreen: false,
            resizable: true,
            decorated: true,
        }
    }
}

/// Widget timers, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Hold time before text box editing keys repeat
    pub text_repeat_threshold_ms: u64,
    /// Time between text box repeats
    pub text_repeat_interval_ms: u64,
    /// Hold time before list arrow keys repeat
    pub list_repeat_threshold_ms: u64,
    /// Time between list repeats
    pub list_repeat_interval_ms: u64,
    /// Caret blink half period
    pub blink_period_ms: u64,
}

impl TimingConfig {
    pub fn text_repeat(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.text_repeat_threshold_ms),
            Duration::from_millis(self.text_repeat_interval_ms.max(1)),
        )
    }

    pub fn list_repeat(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.list_repeat_threshold_ms),
            Duration::from_millis(self.list_repeat_interval_ms.max(1)),
        )
    }

    pub fn blink_period(&self) -> Duration {
        Duration::from_millis(self.blink_period_ms.max(1))
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            text_repeat_threshold_ms: 400,
            text_repeat_interval_ms: 50,
            list_repeat_threshold_ms: 300,
            list_repeat_interval_ms: 100,
            blink_period_ms: 400,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Window configuration
    pub window: WindowConfig,
    /// Initial camera setup
    pub camera: CameraConfig,
    /// Widget timers
    pub timing: TimingConfig,
}

impl AppConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix APP_ (e.g., APP_WINDOW__WIDTH=1920)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    ///
    /// Missing sections and fields take their default values.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(dir) = Self::find_config_dir() {
            let profile_path = dir.join(profile);
            builder = builder.add_source(File::from(profile_path.as_path()).required(false));
        } else {
            builder =
                builder.add_source(File::with_name(&format!("config/{}", profile)).required(false));
        }

        // Use __ as separator for nested fields (e.g., APP_CAMERA__ZOOM_SPEED)
        builder = builder.add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.set_override("profile", profile)?.build()?;

        config.try_deserialize()
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<std::path::PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = std::path::PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads configuration using the APP_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }

    /// Built-in values, used when no configuration can be loaded
    pub fn builtin(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::load("release").unwrap_or_else(|_| Self::builtin("release"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_deserializes_to_defaults() {
        let config: AppConfig = Config::builder()
            .set_override("profile", "test")
            .and_then(|builder| builder.build())
            .and_then(|config| config.try_deserialize())
            .unwrap();
        assert_eq!(config, AppConfig::builtin("test"));
        assert_eq!(config.camera.drag_buttons, vec![1]);
    }

    #[test]
    fn test_partial_sections_keep_remaining_defaults() {
        let config: AppConfig = Config::builder()
            .set_override("window.width", 1024.0)
            .and_then(|builder| builder.set_override("camera.min_scale", 0.5))
            .and_then(|builder| builder.set_override("timing.blink_period_ms", 250))
            .and_then(|builder| builder.build())
            .and_then(|config| config.try_deserialize())
            .unwrap();
        assert_eq!(config.window.width, 1024.0);
        assert_eq!(config.window.height, 600.0);
        assert_eq!(config.camera.min_scale, Some(0.5));
        assert_eq!(config.camera.max_scale, None);
        assert_eq!(config.timing.blink_period(), Duration::from_millis(250));
        assert_eq!(
            config.timing.text_repeat(),
            (Duration::from_millis(400), Duration::from_millis(50))
        );
    }

    #[test]
    fn test_zero_timings_stay_usable() {
        let timing = TimingConfig {
            text_repeat_interval_ms: 0,
            list_repeat_interval_ms: 0,
            blink_period_ms: 0,
            ..TimingConfig::default()
        };
        assert_eq!(timing.blink_period(), Duration::from_millis(1));
        assert_eq!(timing.text_repeat().1, Duration::from_millis(1));
        assert_eq!(timing.list_repeat().1, Duration::from_millis(1));
        let _ = crate::widgets::TextBox::new(glam::Vec2::ZERO, glam::Vec2::new(100.0, 30.0))
            .with_blink_period(timing.blink_period());
    }
}
