//! Sandbox - owns the grid and active-particle index and is the only way to
//! mutate either

use glam::IVec2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use super::brush::in_disc;
use super::ca_update::CellularAutomataUpdater;
use super::{ActiveParticles, Grid, NoopStats, SandboxConfig, SimStats, WorldError, WorldRng};
use crate::simulation::Material;

/// A bounded particle sandbox
///
/// The [`Grid`] is the source of truth for what occupies a cell; the
/// [`ActiveParticles`] index mirrors it so each frame only visits cells that
/// can change. [`place`](Self::place), [`remove`](Self::remove) and
/// [`swap`](Self::swap) keep the two in step.
pub struct Sandbox<R: WorldRng = Xoshiro256StarStar> {
    pub(crate) grid: Grid,
    pub(crate) active: ActiveParticles,
    pub(crate) config: SandboxConfig,
    pub(crate) rng: R,
    frame: u64,
}

impl Sandbox<Xoshiro256StarStar> {
    /// Sandbox with default rules, seeded from system entropy
    pub fn new(width: u32, height: u32) -> Self {
        Self::build(
            SandboxConfig::with_size(width, height),
            Xoshiro256StarStar::from_entropy(),
        )
    }

    /// Sandbox with default rules and a reproducible RNG
    pub fn with_seed(width: u32, height: u32, seed: u64) -> Self {
        let config = SandboxConfig {
            seed: Some(seed),
            ..SandboxConfig::with_size(width, height)
        };
        Self::build(config, Xoshiro256StarStar::seed_from_u64(seed))
    }

    /// Sandbox from a validated configuration, seeded from `config.seed` if set
    pub fn from_config(config: SandboxConfig) -> Result<Self, WorldError> {
        let rng = match config.seed {
            Some(seed) => Xoshiro256StarStar::seed_from_u64(seed),
            None => Xoshiro256StarStar::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: WorldRng> Sandbox<R> {
    /// Sandbox driven by a caller-supplied random source
    pub fn with_rng(config: SandboxConfig, rng: R) -> Result<Self, WorldError> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: SandboxConfig, rng: R) -> Self {
        log::debug!(
            "Creating {}x{} sandbox (fire lifetime {}..={}, spread {:?})",
            config.width,
            config.height,
            config.fire_lifetime_min,
            config.fire_lifetime_max,
            config.fire_spread
        );
        Self {
            grid: Grid::new(config.width, config.height),
            active: ActiveParticles::new(),
            config,
            rng,
            frame: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Number of frames stepped so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Read-only view of the grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Read-only view of the active-particle index
    pub fn active(&self) -> &ActiveParticles {
        &self.active
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.grid.in_bounds(IVec2::new(x, y))
    }

    /// Material at `(x, y)`, or `None` outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<Material> {
        self.grid.get(IVec2::new(x, y))
    }

    pub fn try_get(&self, x: i32, y: i32) -> Result<Material, WorldError> {
        self.grid.try_get(IVec2::new(x, y))
    }

    /// Remaining lifetime of the fire at `(x, y)`
    pub fn fire_lifetime(&self, x: i32, y: i32) -> Option<u32> {
        self.active.lifetime(IVec2::new(x, y))
    }

    /// Number of live particles of `material`
    pub fn particle_count(&self, material: Material) -> usize {
        if material == Material::Empty {
            self.grid.count(Material::Empty)
        } else {
            self.active.len(material)
        }
    }

    /// Put `material` at `(x, y)`, replacing whatever was there.
    ///
    /// Out-of-bounds coordinates are ignored. Fire receives a fresh random
    /// lifetime; placing `Empty` erases the cell.
    pub fn place(&mut self, x: i32, y: i32, material: Material) {
        self.place_at(IVec2::new(x, y), material);
    }

    /// Like [`place`](Self::place), but for a raw material tag from an
    /// external source. Unknown tags are rejected without touching the grid.
    pub fn place_tag(&mut self, x: i32, y: i32, tag: u8) -> Result<(), WorldError> {
        let material = Material::try_from(tag).map_err(|e| {
            log::warn!("Rejected placement at ({x}, {y}): {e}");
            WorldError::from(e)
        })?;
        self.place(x, y, material);
        Ok(())
    }

    /// Clear `(x, y)` to `Empty`; out-of-bounds coordinates are ignored
    pub fn remove(&mut self, x: i32, y: i32) {
        self.remove_at(IVec2::new(x, y));
    }

    /// Exchange the contents of two cells, carrying their index entries
    /// (and any fire lifetime) along. Ignored unless both are in bounds.
    pub fn swap(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.swap_at(IVec2::new(x1, y1), IVec2::new(x2, y2));
    }

    /// Place `material` on every in-bounds cell of the disc of `radius`
    /// around `(cx, cy)`.
    ///
    /// Only the part of the disc that overlaps the grid is visited, so the
    /// center may lie anywhere, including far outside the grid.
    pub fn place_area(&mut self, cx: i32, cy: i32, material: Material, radius: u32) {
        let (cx, cy, r) = (i64::from(cx), i64::from(cy), i64::from(radius));
        let max_x = i64::from(self.width()) - 1;
        let max_y = i64::from(self.height()) - 1;

        for y in (cy - r).max(0)..=(cy + r).min(max_y) {
            for x in (cx - r).max(0)..=(cx + r).min(max_x) {
                if in_disc(x - cx, y - cy, radius) {
                    // Both coordinates are clipped to the grid, so they fit in i32
                    self.place_at(IVec2::new(x as i32, y as i32), material);
                }
            }
        }
    }

    /// Erase every cell
    pub fn clear(&mut self) {
        self.grid.fill(Material::Empty);
        self.active.clear();
        log::debug!("Sandbox cleared at frame {}", self.frame);
    }

    /// Advance the simulation by one frame
    pub fn step(&mut self) {
        self.step_with_stats(&mut NoopStats);
    }

    /// Advance one frame, reporting events to `stats`
    pub fn step_with_stats(&mut self, stats: &mut dyn SimStats) {
        CellularAutomataUpdater::step(self, stats);
        self.frame += 1;
        log::trace!(
            "Frame {}: {} live particles",
            self.frame,
            self.active.total()
        );
    }

    /// Call `f(x, y, material)` for every non-empty cell, for rendering.
    ///
    /// Reads the active-particle index, so the cost is proportional to the
    /// number of particles rather than the grid area. Order is unspecified.
    pub fn for_each_occupied_cell<F>(&self, mut f: F)
    where
        F: FnMut(i32, i32, Material),
    {
        for (pos, material) in self.active.iter() {
            f(pos.x, pos.y, material);
        }
    }

    /// Every non-empty cell, sorted row-major
    pub fn occupied_cells(&self) -> Vec<(IVec2, Material)> {
        let mut cells: Vec<_> = self.active.iter().collect();
        cells.sort_unstable_by_key(|(pos, _)| (pos.y, pos.x));
        cells
    }

    /// Verify that the index holds exactly the tracked cells of the grid
    pub fn check_consistency(&self) -> Result<(), WorldError> {
        let mut tracked = 0;
        for (pos, material) in self.grid.iter() {
            if material.is_tracked() {
                tracked += 1;
                if !self.active.contains(pos, material) {
                    return Err(WorldError::Inconsistent {
                        x: pos.x,
                        y: pos.y,
                        detail: format!("{material} cell missing from the index"),
                    });
                }
            }
        }

        if tracked != self.active.total() {
            let stray = self
                .active
                .iter()
                .find(|&(pos, material)| self.grid.get(pos) != Some(material));
            let (pos, material) = stray.unwrap_or((IVec2::ZERO, Material::Empty));
            return Err(WorldError::Inconsistent {
                x: pos.x,
                y: pos.y,
                detail: format!(
                    "index tracks {} cells but grid holds {tracked} (stray {material} entry)",
                    self.active.total()
                ),
            });
        }

        Ok(())
    }

    pub(crate) fn place_at(&mut self, pos: IVec2, material: Material) {
        let Some(current) = self.grid.get(pos) else {
            return;
        };

        // Drop any stale entry first, e.g. when fire spreads onto tracked wood
        self.active.detach(pos, current);
        self.grid.set(pos, material);

        let lifetime = if material == Material::Fire {
            self.rng
                .gen_lifetime(self.config.fire_lifetime_min, self.config.fire_lifetime_max)
        } else {
            0
        };
        self.active.attach(pos, material, lifetime);
    }

    pub(crate) fn remove_at(&mut self, pos: IVec2) {
        let Some(current) = self.grid.get(pos) else {
            return;
        };
        self.active.detach(pos, current);
        self.grid.set(pos, Material::Empty);
    }

    pub(crate) fn swap_at(&mut self, a: IVec2, b: IVec2) {
        let (Some(a_material), Some(b_material)) = (self.grid.get(a), self.grid.get(b)) else {
            return;
        };
        if a == b {
            return;
        }
        self.grid.swap(a, b);
        self.active.exchange(a, a_material, b, b_material);
    }
}
