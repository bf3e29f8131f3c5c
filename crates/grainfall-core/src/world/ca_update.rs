//! Cellular automata update logic - per-material movement and reactions

use ahash::AHashSet;
use glam::IVec2;

use super::{Sandbox, SimStats, WorldRng};
use crate::simulation::Material;

/// Row offset towards the bottom of the grid
const DOWN: IVec2 = IVec2::new(0, 1);
/// Row offset towards the top of the grid
const UP: IVec2 = IVec2::new(0, -1);

type UpdateFn<R> = fn(&mut Sandbox<R>, IVec2, &mut dyn SimStats) -> Option<IVec2>;

/// Cellular automata updater - advances every active particle once per frame
pub struct CellularAutomataUpdater;

impl CellularAutomataUpdater {
    /// Run one frame: sand, then water, then fire, then smoke
    pub fn step<R: WorldRng>(sandbox: &mut Sandbox<R>, stats: &mut dyn SimStats) {
        Self::run_pass(sandbox, Material::Sand, stats, Self::update_sand);
        Self::run_pass(sandbox, Material::Water, stats, Self::update_water);
        Self::run_pass(sandbox, Material::Fire, stats, Self::update_fire);
        Self::run_pass(sandbox, Material::Smoke, stats, Self::update_smoke);
    }

    /// Evaluate every particle of `material` against a snapshot of its
    /// coordinates taken before the pass starts.
    ///
    /// Falling materials are visited bottom row first, everything else top
    /// row first. A cell that already received a moved particle this pass,
    /// or no longer holds `material`, is skipped.
    fn run_pass<R: WorldRng>(
        sandbox: &mut Sandbox<R>,
        material: Material,
        stats: &mut dyn SimStats,
        update: UpdateFn<R>,
    ) {
        let mut snapshot = sandbox.active.snapshot(material);
        if matches!(material, Material::Sand | Material::Water) {
            snapshot.reverse();
        }

        let mut arrived: AHashSet<IVec2> = AHashSet::new();
        for pos in snapshot {
            if arrived.contains(&pos) || sandbox.grid.get(pos) != Some(material) {
                continue;
            }
            if let Some(dest) = update(sandbox, pos, stats) {
                arrived.insert(dest);
            }
        }
    }

    /// Update sand (falls, slides diagonally, sinks through water)
    pub fn update_sand<R: WorldRng>(
        sandbox: &mut Sandbox<R>,
        pos: IVec2,
        stats: &mut dyn SimStats,
    ) -> Option<IVec2> {
        let sinks_into = |m: Option<Material>| matches!(m, Some(Material::Empty | Material::Water));

        let below = pos + DOWN;
        if sinks_into(sandbox.grid.get(below)) {
            return Self::move_to(sandbox, pos, below, stats);
        }

        let dx = sandbox.rng.gen_direction();
        let diagonal = pos + IVec2::new(dx, 1);
        if sinks_into(sandbox.grid.get(diagonal)) {
            return Self::move_to(sandbox, pos, diagonal, stats);
        }

        None
    }

    /// Update water (falls, then spreads sideways into empty space)
    pub fn update_water<R: WorldRng>(
        sandbox: &mut Sandbox<R>,
        pos: IVec2,
        stats: &mut dyn SimStats,
    ) -> Option<IVec2> {
        let below = pos + DOWN;
        if sandbox.grid.get(below) == Some(Material::Empty) {
            return Self::move_to(sandbox, pos, below, stats);
        }

        let dx = sandbox.rng.gen_direction();
        let side = pos + IVec2::new(dx, 0);
        if sandbox.grid.get(side) == Some(Material::Empty) {
            return Self::move_to(sandbox, pos, side, stats);
        }

        None
    }

    /// Update fire (ignites neighbouring wood, burns down, leaves smoke)
    pub fn update_fire<R: WorldRng>(
        sandbox: &mut Sandbox<R>,
        pos: IVec2,
        stats: &mut dyn SimStats,
    ) -> Option<IVec2> {
        for &offset in sandbox.config.fire_spread.offsets() {
            let neighbor = pos + offset;
            if sandbox.grid.get(neighbor) == Some(Material::Wood) {
                sandbox.place_at(neighbor, Material::Fire);
                stats.record_ignition();
            }
        }

        let burnt_out = sandbox.active.burn(pos).is_none_or(|remaining| remaining == 0);
        let extinguish_chance = sandbox.config.fire_extinguish_chance;
        if burnt_out || sandbox.rng.check_probability(extinguish_chance) {
            sandbox.remove_at(pos);
            stats.record_extinguished();

            let above = pos + UP;
            if sandbox.grid.get(above) == Some(Material::Empty) {
                sandbox.place_at(above, Material::Smoke);
            }
        }

        None
    }

    /// Update smoke (rises, drifts sideways, occasionally vanishes)
    pub fn update_smoke<R: WorldRng>(
        sandbox: &mut Sandbox<R>,
        pos: IVec2,
        stats: &mut dyn SimStats,
    ) -> Option<IVec2> {
        let above = pos + UP;
        if sandbox.grid.get(above) == Some(Material::Empty) {
            return Self::move_to(sandbox, pos, above, stats);
        }

        let dissipate_chance = sandbox.config.smoke_dissipate_chance;
        if sandbox.rng.check_probability(dissipate_chance) {
            sandbox.remove_at(pos);
            stats.record_dissipated();
            return None;
        }

        let dx = sandbox.rng.gen_direction();
        let side = pos + IVec2::new(dx, 0);
        if sandbox.grid.get(side) == Some(Material::Empty) {
            return Self::move_to(sandbox, pos, side, stats);
        }

        None
    }

    fn move_to<R: WorldRng>(
        sandbox: &mut Sandbox<R>,
        from: IVec2,
        to: IVec2,
        stats: &mut dyn SimStats,
    ) -> Option<IVec2> {
        sandbox.swap_at(from, to);
        stats.record_particle_moved();
        Some(to)
    }
}
