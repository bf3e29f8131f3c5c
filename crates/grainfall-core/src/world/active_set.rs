//! Active-particle index
//!
//! Redundant acceleration structure next to the [`Grid`](super::Grid): one
//! coordinate set per tracked material, plus a remaining-lifetime counter
//! for every burning cell. Only the sandbox mutation API writes to it.

use ahash::{AHashMap, AHashSet};
use glam::IVec2;

use crate::simulation::Material;

#[derive(Clone, Debug, Default)]
pub struct ActiveParticles {
    sand: AHashSet<IVec2>,
    water: AHashSet<IVec2>,
    wood: AHashSet<IVec2>,
    smoke: AHashSet<IVec2>,
    /// Burning cells and their remaining lifetime in frames
    fire: AHashMap<IVec2, u32>,
}

impl ActiveParticles {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, material: Material) -> Option<&AHashSet<IVec2>> {
        match material {
            Material::Sand => Some(&self.sand),
            Material::Water => Some(&self.water),
            Material::Wood => Some(&self.wood),
            Material::Smoke => Some(&self.smoke),
            Material::Empty | Material::Fire => None,
        }
    }

    fn set_mut(&mut self, material: Material) -> Option<&mut AHashSet<IVec2>> {
        match material {
            Material::Sand => Some(&mut self.sand),
            Material::Water => Some(&mut self.water),
            Material::Wood => Some(&mut self.wood),
            Material::Smoke => Some(&mut self.smoke),
            Material::Empty | Material::Fire => None,
        }
    }

    /// Record `pos` as holding `material`.
    ///
    /// `lifetime` is only stored for fire.
    pub(crate) fn attach(&mut self, pos: IVec2, material: Material, lifetime: u32) {
        if material == Material::Fire {
            self.fire.insert(pos, lifetime);
        } else if let Some(set) = self.set_mut(material) {
            set.insert(pos);
        }
    }

    /// Drop `pos` from the collection for `material`, returning the fire
    /// lifetime it carried (zero for everything else)
    pub(crate) fn detach(&mut self, pos: IVec2, material: Material) -> u32 {
        if material == Material::Fire {
            self.fire.remove(&pos).unwrap_or(0)
        } else {
            if let Some(set) = self.set_mut(material) {
                set.remove(&pos);
            }
            0
        }
    }

    /// Bookkeeping for a grid swap of `a` (holding `a_material`) and `b`
    /// (holding `b_material`). Fire lifetimes travel with their particle.
    pub(crate) fn exchange(
        &mut self,
        a: IVec2,
        a_material: Material,
        b: IVec2,
        b_material: Material,
    ) {
        let a_lifetime = self.detach(a, a_material);
        let b_lifetime = self.detach(b, b_material);
        self.attach(b, a_material, a_lifetime);
        self.attach(a, b_material, b_lifetime);
    }

    /// Count down one frame of a fire's lifetime, returning what remains.
    ///
    /// `None` if `pos` is not burning.
    pub(crate) fn burn(&mut self, pos: IVec2) -> Option<u32> {
        self.fire.get_mut(&pos).map(|lifetime| {
            *lifetime = lifetime.saturating_sub(1);
            *lifetime
        })
    }

    pub(crate) fn clear(&mut self) {
        self.sand.clear();
        self.water.clear();
        self.wood.clear();
        self.smoke.clear();
        self.fire.clear();
    }

    pub fn contains(&self, pos: IVec2, material: Material) -> bool {
        match material {
            Material::Fire => self.fire.contains_key(&pos),
            m => self.set(m).is_some_and(|set| set.contains(&pos)),
        }
    }

    /// Remaining lifetime of the fire at `pos`
    pub fn lifetime(&self, pos: IVec2) -> Option<u32> {
        self.fire.get(&pos).copied()
    }

    /// Number of tracked cells holding `material`
    pub fn len(&self, material: Material) -> usize {
        match material {
            Material::Fire => self.fire.len(),
            m => self.set(m).map_or(0, |set| set.len()),
        }
    }

    /// Number of tracked cells across all materials
    pub fn total(&self) -> usize {
        Material::TRACKED.iter().map(|&m| self.len(m)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Copy of the coordinates tracked for `material`, sorted row-major
    /// (top row first, left to right)
    pub fn snapshot(&self, material: Material) -> Vec<IVec2> {
        let mut coords: Vec<IVec2> = match material {
            Material::Fire => self.fire.keys().copied().collect(),
            m => self
                .set(m)
                .map(|set| set.iter().copied().collect())
                .unwrap_or_default(),
        };
        coords.sort_unstable_by_key(|pos| (pos.y, pos.x));
        coords
    }

    /// Every tracked coordinate with its material, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Material)> + '_ {
        self.sand
            .iter()
            .map(|&pos| (pos, Material::Sand))
            .chain(self.water.iter().map(|&pos| (pos, Material::Water)))
            .chain(self.wood.iter().map(|&pos| (pos, Material::Wood)))
            .chain(self.fire.keys().map(|&pos| (pos, Material::Fire)))
            .chain(self.smoke.iter().map(|&pos| (pos, Material::Smoke)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_and_detach() {
        let mut active = ActiveParticles::new();
        let pos = IVec2::new(3, 4);

        active.attach(pos, Material::Sand, 0);
        assert!(active.contains(pos, Material::Sand));
        assert!(!active.contains(pos, Material::Water));
        assert_eq!(active.total(), 1);

        assert_eq!(active.detach(pos, Material::Sand), 0);
        assert!(!active.contains(pos, Material::Sand));
        assert!(active.is_empty());
    }

    #[test]
    fn test_len_counts_each_material() {
        let mut active = ActiveParticles::new();
        active.attach(IVec2::new(0, 0), Material::Sand, 0);
        active.attach(IVec2::new(1, 0), Material::Sand, 0);
        active.attach(IVec2::new(2, 0), Material::Wood, 0);
        active.attach(IVec2::new(3, 0), Material::Fire, 9);

        assert_eq!(active.len(Material::Sand), 2);
        assert_eq!(active.len(Material::Wood), 1);
        assert_eq!(active.len(Material::Fire), 1);
        assert_eq!(active.len(Material::Water), 0);
        assert_eq!(active.len(Material::Empty), 0);
        assert_eq!(active.total(), 4);
    }

    #[test]
    fn test_empty_is_never_tracked() {
        let mut active = ActiveParticles::new();
        active.attach(IVec2::ZERO, Material::Empty, 0);
        assert!(active.is_empty());
        assert!(!active.contains(IVec2::ZERO, Material::Empty));
    }

    #[test]
    fn test_fire_keeps_lifetime() {
        let mut active = ActiveParticles::new();
        let pos = IVec2::new(1, 1);
        active.attach(pos, Material::Fire, 42);
        assert_eq!(active.lifetime(pos), Some(42));
        assert_eq!(active.detach(pos, Material::Fire), 42);
        assert_eq!(active.lifetime(pos), None);
    }

    #[test]
    fn test_burn_counts_down_and_saturates() {
        let mut active = ActiveParticles::new();
        let pos = IVec2::new(1, 1);
        active.attach(pos, Material::Fire, 2);

        assert_eq!(active.burn(pos), Some(1));
        assert_eq!(active.burn(pos), Some(0));
        assert_eq!(active.burn(pos), Some(0));
        assert_eq!(active.burn(IVec2::new(5, 5)), None);
    }

    #[test]
    fn test_exchange_moves_tracked_into_untracked() {
        let mut active = ActiveParticles::new();
        let a = IVec2::new(2, 2);
        let b = IVec2::new(2, 3);
        active.attach(a, Material::Sand, 0);

        active.exchange(a, Material::Sand, b, Material::Empty);

        assert!(!active.contains(a, Material::Sand));
        assert!(active.contains(b, Material::Sand));
        assert_eq!(active.total(), 1);
    }

    #[test]
    fn test_exchange_between_two_tracked_materials() {
        let mut active = ActiveParticles::new();
        let a = IVec2::new(2, 2);
        let b = IVec2::new(2, 3);
        active.attach(a, Material::Sand, 0);
        active.attach(b, Material::Water, 0);

        active.exchange(a, Material::Sand, b, Material::Water);

        assert!(active.contains(b, Material::Sand));
        assert!(active.contains(a, Material::Water));
        assert_eq!(active.total(), 2);
    }

    #[test]
    fn test_exchange_transfers_fire_lifetime() {
        let mut active = ActiveParticles::new();
        let a = IVec2::new(0, 0);
        let b = IVec2::new(1, 0);
        active.attach(a, Material::Fire, 17);
        active.attach(b, Material::Fire, 80);

        active.exchange(a, Material::Fire, b, Material::Fire);
        assert_eq!(active.lifetime(a), Some(80));
        assert_eq!(active.lifetime(b), Some(17));

        active.exchange(b, Material::Fire, IVec2::new(2, 0), Material::Empty);
        assert_eq!(active.lifetime(IVec2::new(2, 0)), Some(17));
        assert_eq!(active.lifetime(b), None);
    }

    #[test]
    fn test_snapshot_is_sorted_row_major() {
        let mut active = ActiveParticles::new();
        for pos in [IVec2::new(5, 2), IVec2::new(1, 2), IVec2::new(9, 0)] {
            active.attach(pos, Material::Water, 0);
        }
        assert_eq!(
            active.snapshot(Material::Water),
            vec![IVec2::new(9, 0), IVec2::new(1, 2), IVec2::new(5, 2)]
        );
        assert!(active.snapshot(Material::Empty).is_empty());
    }

    #[test]
    fn test_iter_covers_every_collection() {
        let mut active = ActiveParticles::new();
        for (i, material) in Material::TRACKED.iter().enumerate() {
            active.attach(IVec2::new(i as i32, 0), *material, 50);
        }

        let mut seen: Vec<_> = active.iter().collect();
        seen.sort_by_key(|(pos, _)| pos.x);
        let materials: Vec<_> = seen.into_iter().map(|(_, m)| m).collect();
        assert_eq!(materials, Material::TRACKED.to_vec());
    }
}
