//! Plays a scenario against a sandbox without a window

use std::fmt;

use anyhow::{Context, Result};
use grainfall_core::simulation::Material;
use grainfall_core::world::{BrushSize, FrameStats, Sandbox, SandboxConfig};

use super::scenario::{Scenario, Stroke};
use crate::tools::ToolBox;

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub scenario: String,
    pub frames: u64,
    pub strokes_applied: usize,
    pub stats: FrameStats,
    /// Live particle count per tracked material at the end
    pub counts: Vec<(Material, usize)>,
}

impl RunReport {
    pub fn count(&self, material: Material) -> usize {
        self.counts
            .iter()
            .find(|(m, _)| *m == material)
            .map_or(0, |(_, n)| *n)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} frames, {} strokes",
            self.scenario, self.frames, self.strokes_applied
        )?;
        writeln!(
            f,
            "  moves {}, ignitions {}, burned out {}, smoke dissipated {}",
            self.stats.particles_moved,
            self.stats.ignitions,
            self.stats.extinguished,
            self.stats.dissipated
        )?;
        let counts: Vec<String> = self
            .counts
            .iter()
            .map(|(material, n)| format!("{material} {n}"))
            .collect();
        write!(f, "  particles: {}", counts.join(", "))
    }
}

/// Applies a scenario's strokes on schedule while stepping the sandbox
pub struct ScenarioRunner {
    sandbox: Sandbox,
    name: String,
    /// Strokes sorted by frame
    strokes: Vec<Stroke>,
    next_stroke: usize,
    tools: ToolBox,
    /// Brush for strokes that do not set their own radius
    default_brush: BrushSize,
    stats: FrameStats,
}

impl ScenarioRunner {
    /// Build a sandbox of the scenario's size using `base` for everything else
    pub fn new(scenario: Scenario, base: &SandboxConfig, brush: BrushSize) -> Result<Self> {
        scenario.validate()?;
        let config = SandboxConfig {
            width: scenario.width,
            height: scenario.height,
            seed: scenario.seed.or(base.seed),
            ..base.clone()
        };
        let sandbox = Sandbox::from_config(config)
            .with_context(|| format!("Cannot build sandbox for scenario '{}'", scenario.name))?;

        let mut strokes = scenario.strokes;
        strokes.sort_by_key(|stroke| stroke.frame);

        log::info!(
            "Scenario '{}': {}x{}, {} strokes",
            scenario.name,
            scenario.width,
            scenario.height,
            strokes.len()
        );

        Ok(Self {
            sandbox,
            name: scenario.name,
            strokes,
            next_stroke: 0,
            tools: ToolBox::new(brush),
            default_brush: brush,
            stats: FrameStats::default(),
        })
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Paint every stroke due at the current frame, then advance one frame
    pub fn tick(&mut self) {
        let frame = self.sandbox.frame();
        while let Some(stroke) = self.strokes.get(self.next_stroke) {
            if stroke.frame > frame {
                break;
            }
            let brush = stroke.radius.map_or(self.default_brush, BrushSize::new);
            self.tools.select(stroke.material);
            self.tools.set_brush(brush);
            for center in stroke.centers() {
                self.tools.paint(&mut self.sandbox, center.x, center.y);
            }
            log::debug!(
                "Frame {frame}: painted {} at ({}, {}) r={}",
                stroke.material,
                stroke.x,
                stroke.y,
                brush.radius()
            );
            self.next_stroke += 1;
        }

        let mut frame_stats = FrameStats::default();
        self.sandbox.step_with_stats(&mut frame_stats);
        self.stats.merge(&frame_stats);
    }

    /// Run `frames` frames, calling `on_frame` after each one
    pub fn run<F>(&mut self, frames: u64, mut on_frame: F) -> Result<RunReport>
    where
        F: FnMut(&Sandbox) -> Result<()>,
    {
        let progress_every = (frames / 10).max(1);
        for i in 1..=frames {
            self.tick();
            on_frame(&self.sandbox)?;
            if i % progress_every == 0 {
                log::info!(
                    "Frame {}/{}: {} particles",
                    i,
                    frames,
                    self.sandbox.active().total()
                );
            }
        }

        let skipped = self.strokes.len() - self.next_stroke;
        if skipped > 0 {
            log::warn!("{skipped} strokes scheduled after the last frame were never painted");
        }

        self.sandbox
            .check_consistency()
            .context("Active-particle index drifted from the grid")?;

        Ok(self.report())
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            scenario: self.name.clone(),
            frames: self.sandbox.frame(),
            strokes_applied: self.next_stroke,
            stats: self.stats,
            counts: Material::TRACKED
                .iter()
                .map(|&m| (m, self.sandbox.particle_count(m)))
                .collect(),
        }
    }
}
