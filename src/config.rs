//! Driver configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `grainfall.ron` in the working directory, or an explicit file
//! 3. Environment variables prefixed with `GRAINFALL_`
//!
//! Example environment variable: `GRAINFALL_SANDBOX__WIDTH=160`

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use grainfall_core::world::{BrushSize, SandboxConfig};
use serde::{Deserialize, Serialize};

/// Top-level driver configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub sandbox: SandboxConfig,

    #[serde(default)]
    pub brush: BrushConfig,

    #[serde(default)]
    pub capture: CaptureConfig,

    #[serde(default)]
    pub run: RunConfig,
}

/// Painting defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BrushConfig {
    /// Starting brush radius, clamped to the allowed range
    #[serde(default)]
    pub size: BrushSize,
}

/// Image and animation output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Pixels per cell edge
    pub cell_size: u32,
    /// Playback rate of recorded GIFs
    pub gif_fps: u16,
    /// Record a GIF frame every N simulation frames
    pub capture_every: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            cell_size: 4,
            gif_fps: 30,
            capture_every: 2,
        }
    }
}

/// What a headless run does
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Frames to simulate
    pub frames: u64,
    /// Preset name or path to a RON scenario file
    pub scenario: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 300,
            scenario: "hourglass".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration, reading `path` instead of `grainfall.ron` when given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = AppConfig::default();

        let mut builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("sandbox.width", i64::from(defaults.sandbox.width))?
            .set_default("sandbox.height", i64::from(defaults.sandbox.height))?
            .set_default(
                "sandbox.fire_lifetime_min",
                i64::from(defaults.sandbox.fire_lifetime_min),
            )?
            .set_default(
                "sandbox.fire_lifetime_max",
                i64::from(defaults.sandbox.fire_lifetime_max),
            )?
            .set_default(
                "sandbox.fire_extinguish_chance",
                f64::from(defaults.sandbox.fire_extinguish_chance),
            )?
            .set_default(
                "sandbox.smoke_dissipate_chance",
                f64::from(defaults.sandbox.smoke_dissipate_chance),
            )?
            .set_default("sandbox.fire_spread", "moore")?
            .set_default("brush.size", i64::from(defaults.brush.size.radius()))?
            .set_default("capture.cell_size", i64::from(defaults.capture.cell_size))?
            .set_default("capture.gif_fps", i64::from(defaults.capture.gif_fps))?
            .set_default(
                "capture.capture_every",
                i64::from(defaults.capture.capture_every),
            )?
            .set_default("run.frames", defaults.run.frames as i64)?
            .set_default("run.scenario", defaults.run.scenario.as_str())?;

        // Layer 2: Config file (the default one is optional, an explicit one is not)
        builder = match path {
            Some(path) => builder.add_source(File::from(path).format(FileFormat::Ron).required(true)),
            None => builder.add_source(
                File::with_name("grainfall")
                    .format(FileFormat::Ron)
                    .required(false),
            ),
        };

        // Layer 3: Environment variables (GRAINFALL_SANDBOX__WIDTH, etc.)
        let config = builder
            .add_source(
                Environment::with_prefix("GRAINFALL")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("Failed to build configuration")?;

        let app: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        app.validate()?;

        log::debug!("Loaded configuration: {app:?}");
        Ok(app)
    }

    /// Reject settings the driver cannot run with
    pub fn validate(&self) -> Result<()> {
        self.sandbox
            .validate()
            .context("Invalid sandbox configuration")?;
        if self.capture.cell_size == 0 {
            anyhow::bail!("capture.cell_size must be at least 1");
        }
        if self.capture.gif_fps == 0 {
            anyhow::bail!("capture.gif_fps must be at least 1");
        }
        if self.capture.capture_every == 0 {
            anyhow::bail!("capture.capture_every must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grainfall_core::world::FireSpread;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.sandbox.width, 100);
        assert_eq!(config.sandbox.height, 75);
        assert_eq!(config.brush.size.radius(), 3);
        assert_eq!(config.capture.cell_size, 4);
        assert_eq!(config.run.scenario, "hourglass");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_with_defaults() {
        // Should load defaults when no config file exists
        let config = AppConfig::load(None).expect("Failed to load config");
        assert_eq!(config.sandbox.fire_lifetime_min, 30);
        assert_eq!(config.sandbox.fire_lifetime_max, 100);
        assert_eq!(config.sandbox.fire_spread, FireSpread::Moore);
        assert_eq!(config.capture.capture_every, 2);
    }

    #[test]
    fn test_load_explicit_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!(
            "grainfall-config-test-{}.ron",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{
                "sandbox": { "width": 40, "fire_spread": "von_neumann", "seed": 7 },
                "brush": { "size": 99 },
                "run": { "frames": 12 },
            }"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).expect("Failed to load config");
        std::fs::remove_file(&path).ok();

        assert_eq!(config.sandbox.width, 40);
        assert_eq!(config.sandbox.height, 75);
        assert_eq!(config.sandbox.fire_spread, FireSpread::VonNeumann);
        assert_eq!(config.sandbox.seed, Some(7));
        assert_eq!(config.brush.size.radius(), 30);
        assert_eq!(config.run.frames, 12);
        assert_eq!(config.run.scenario, "hourglass");
    }

    #[test]
    fn test_environment_overrides_with_single_underscore_prefix() {
        // Only this test touches the capture section through the environment
        std::env::set_var("GRAINFALL_CAPTURE__GIF_FPS", "12");
        let config = AppConfig::load(None);
        std::env::remove_var("GRAINFALL_CAPTURE__GIF_FPS");

        let config = config.expect("Failed to load config");
        assert_eq!(config.capture.gif_fps, 12);
        assert_eq!(config.capture.cell_size, 4);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("grainfall-no-such-config.ron");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_zero_cell_size_rejected() {
        let mut config = AppConfig::default();
        config.capture.cell_size = 0;
        assert!(config.validate().is_err());
    }
}
