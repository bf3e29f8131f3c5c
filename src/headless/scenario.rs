//! Scripted painting scenarios
//!
//! A scenario is a grid size plus a list of brush strokes, each applied at a
//! given frame. Scenarios load from RON files or come from built-in presets.

use std::path::Path;

use anyhow::{Context, Result};
use glam::IVec2;
use grainfall_core::simulation::Material;
use serde::{Deserialize, Serialize};

/// Names accepted by [`Scenario::preset`]
pub const PRESETS: [&str; 3] = ["hourglass", "bonfire", "basin"];

/// One brush stroke
///
/// Without `to` the stroke is a single dab; with `to` the brush is dragged
/// in a straight line from `(x, y)` to `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Frame before which the stroke is painted
    pub frame: u64,
    pub x: i32,
    pub y: i32,
    pub material: Material,
    /// Brush radius, clamped to the brush range; the configured brush when absent
    #[serde(default)]
    pub radius: Option<u32>,
    #[serde(default)]
    pub to: Option<(i32, i32)>,
}

impl Stroke {
    pub fn dab(frame: u64, x: i32, y: i32, material: Material, radius: u32) -> Self {
        Self {
            frame,
            x,
            y,
            material,
            radius: Some(radius),
            to: None,
        }
    }

    pub fn line(frame: u64, from: (i32, i32), to: (i32, i32), material: Material, radius: u32) -> Self {
        Self {
            frame,
            x: from.0,
            y: from.1,
            material,
            radius: Some(radius),
            to: Some(to),
        }
    }

    /// Brush centers this stroke touches, one per cell along the line
    pub fn centers(&self) -> Vec<IVec2> {
        let start = IVec2::new(self.x, self.y);
        let Some((tx, ty)) = self.to else {
            return vec![start];
        };

        let (x0, y0) = (i64::from(self.x), i64::from(self.y));
        let (dx, dy) = (i64::from(tx) - x0, i64::from(ty) - y0);
        let steps = dx.abs().max(dy.abs());
        if steps == 0 {
            return vec![start];
        }

        // Every interpolated point lies between the endpoints, so it fits in i32
        (0..=steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                IVec2::new(
                    (x0 + (dx as f64 * t).round() as i64) as i32,
                    (y0 + (dy as f64 * t).round() as i64) as i32,
                )
            })
            .collect()
    }

    /// Endpoints of the stroke: the start, and the end of a line
    fn endpoints(&self) -> impl Iterator<Item = (i32, i32)> {
        std::iter::once((self.x, self.y)).chain(self.to)
    }
}

/// Top-level scenario definition loaded from RON files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Grid width in cells
    pub width: u32,

    /// Grid height in cells
    pub height: u32,

    /// Overrides the configured seed when set
    #[serde(default)]
    pub seed: Option<u64>,

    pub strokes: Vec<Stroke>,
}

impl Scenario {
    /// Load scenario from RON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;

        let scenario = ron::from_str(&content)
            .with_context(|| format!("Failed to parse RON scenario: {}", path.display()))?;

        Ok(scenario)
    }

    /// Save scenario to RON file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let ron = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize scenario to RON")?;

        std::fs::write(path.as_ref(), ron).with_context(|| {
            format!("Failed to write scenario file: {}", path.as_ref().display())
        })?;

        Ok(())
    }

    /// Reject strokes that start or end outside the grid
    pub fn validate(&self) -> Result<()> {
        let inside = |(x, y): (i32, i32)| {
            u32::try_from(x).is_ok_and(|x| x < self.width)
                && u32::try_from(y).is_ok_and(|y| y < self.height)
        };
        for (i, stroke) in self.strokes.iter().enumerate() {
            if let Some((x, y)) = stroke.endpoints().find(|&p| !inside(p)) {
                anyhow::bail!(
                    "Stroke {i} of scenario '{}' reaches ({x}, {y}), outside the {}x{} grid",
                    self.name,
                    self.width,
                    self.height
                );
            }
        }
        Ok(())
    }

    /// A preset by name, or a RON file at that path
    pub fn resolve(name_or_path: &str) -> Result<Self> {
        match Self::preset(name_or_path) {
            Some(scenario) => Ok(scenario),
            None => Self::from_file(name_or_path).with_context(|| {
                format!(
                    "'{name_or_path}' is neither a preset ({}) nor a readable scenario file",
                    PRESETS.join(", ")
                )
            }),
        }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "hourglass" => Some(Self::hourglass()),
            "bonfire" => Some(Self::bonfire()),
            "basin" => Some(Self::basin()),
            _ => None,
        }
    }

    /// Sand poured into a wooden funnel
    pub fn hourglass() -> Self {
        Self {
            name: "hourglass".to_string(),
            description: "Sand piles up in a funnel and trickles through the neck".to_string(),
            width: 100,
            height: 75,
            seed: None,
            strokes: vec![
                Stroke::line(0, (18, 28), (47, 52), Material::Wood, 1),
                Stroke::line(0, (82, 28), (53, 52), Material::Wood, 1),
                Stroke::line(0, (0, 74), (99, 74), Material::Wood, 1),
                Stroke::dab(0, 50, 12, Material::Sand, 9),
                Stroke::dab(90, 40, 8, Material::Sand, 6),
                Stroke::dab(90, 60, 8, Material::Sand, 6),
            ],
        }
    }

    /// A wood pile set alight, then doused
    pub fn bonfire() -> Self {
        Self {
            name: "bonfire".to_string(),
            description: "Fire spreads through a wood pile, smoke rises, water falls".to_string(),
            width: 100,
            height: 75,
            seed: None,
            strokes: vec![
                Stroke::line(0, (10, 72), (90, 72), Material::Wood, 1),
                Stroke::dab(0, 50, 64, Material::Wood, 7),
                Stroke::dab(10, 50, 56, Material::Fire, 1),
                Stroke::dab(150, 30, 6, Material::Water, 5),
                Stroke::dab(150, 70, 6, Material::Water, 5),
            ],
        }
    }

    /// Water poured into a wooden basin
    pub fn basin() -> Self {
        Self {
            name: "basin".to_string(),
            description: "Water fills a wooden basin and levels out".to_string(),
            width: 100,
            height: 75,
            seed: None,
            strokes: vec![
                Stroke::line(0, (20, 35), (20, 70), Material::Wood, 1),
                Stroke::line(0, (20, 70), (80, 70), Material::Wood, 1),
                Stroke::line(0, (80, 70), (80, 35), Material::Wood, 1),
                Stroke::dab(0, 50, 10, Material::Water, 6),
                Stroke::dab(40, 40, 10, Material::Water, 6),
                Stroke::dab(80, 60, 10, Material::Water, 6),
                Stroke::dab(200, 50, 5, Material::Sand, 3),
            ],
        }
    }
}
