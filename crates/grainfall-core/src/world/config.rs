//! Sandbox configuration

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::WorldError;

const MOORE_OFFSETS: [IVec2; 8] = [
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

const VON_NEUMANN_OFFSETS: [IVec2; 4] = [
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(0, -1),
    IVec2::new(0, 1),
];

/// Which neighbours a burning cell can ignite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireSpread {
    /// All eight surrounding cells
    #[default]
    Moore,
    /// Only the four orthogonal neighbours
    VonNeumann,
}

impl FireSpread {
    pub fn offsets(self) -> &'static [IVec2] {
        match self {
            FireSpread::Moore => &MOORE_OFFSETS,
            FireSpread::VonNeumann => &VON_NEUMANN_OFFSETS,
        }
    }
}

/// Parameters fixed at sandbox construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Grid width in cells
    pub width: u32,
    /// Grid height in cells
    pub height: u32,
    /// Shortest fire lifetime in frames (inclusive)
    pub fire_lifetime_min: u32,
    /// Longest fire lifetime in frames (inclusive)
    pub fire_lifetime_max: u32,
    /// Per-frame chance that a burning cell goes out early
    pub fire_extinguish_chance: f32,
    /// Per-frame chance that blocked smoke disappears
    pub smoke_dissipate_chance: f32,
    pub fire_spread: FireSpread,
    /// RNG seed; `None` seeds from system entropy
    pub seed: Option<u64>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 75,
            fire_lifetime_min: 30,
            fire_lifetime_max: 100,
            fire_extinguish_chance: 0.02,
            smoke_dissipate_chance: 0.01,
            fire_spread: FireSpread::Moore,
            seed: None,
        }
    }
}

impl SandboxConfig {
    /// Default rules on a grid of the given size
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), WorldError> {
        if self.width == 0 || self.height == 0 {
            return Err(WorldError::InvalidConfig(format!(
                "grid must have at least one cell, got {}x{}",
                self.width, self.height
            )));
        }
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(WorldError::InvalidConfig(format!(
                "grid {}x{} exceeds the addressable range",
                self.width, self.height
            )));
        }
        if self.fire_lifetime_min == 0 || self.fire_lifetime_min > self.fire_lifetime_max {
            return Err(WorldError::InvalidConfig(format!(
                "fire lifetime range {}..={} is empty or starts at zero",
                self.fire_lifetime_min, self.fire_lifetime_max
            )));
        }
        for (name, chance) in [
            ("fire_extinguish_chance", self.fire_extinguish_chance),
            ("smoke_dissipate_chance", self.smoke_dissipate_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(WorldError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {chance}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SandboxConfig::default();
        assert_eq!(config.width, 100);
        assert_eq!(config.height, 75);
        assert_eq!(config.fire_lifetime_min, 30);
        assert_eq!(config.fire_lifetime_max, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_sized_grid_rejected() {
        let config = SandboxConfig::with_size(0, 10);
        assert!(matches!(
            config.validate(),
            Err(WorldError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_inverted_lifetime_range_rejected() {
        let config = SandboxConfig {
            fire_lifetime_min: 50,
            fire_lifetime_max: 10,
            ..SandboxConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let config = SandboxConfig {
            smoke_dissipate_chance: 1.5,
            ..SandboxConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SandboxConfig {
            fire_extinguish_chance: -0.1,
            ..SandboxConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fire_spread_offsets() {
        assert_eq!(FireSpread::Moore.offsets().len(), 8);
        assert_eq!(FireSpread::VonNeumann.offsets().len(), 4);
        assert!(!FireSpread::Moore.offsets().contains(&IVec2::ZERO));
        for offset in FireSpread::VonNeumann.offsets() {
            assert_eq!(offset.x.abs() + offset.y.abs(), 1);
        }
    }
}
