//! Grid - the authoritative cell array

use glam::IVec2;

use super::WorldError;
use crate::simulation::Material;

/// Fixed-size 2-D array of materials
///
/// Row-major storage, index = y * width + x. Row 0 is the top of the sandbox.
/// Writes are crate-private: everything outside the crate goes through
/// [`Sandbox`](super::Sandbox) so the active-particle index stays in sync.
#[derive(Clone, Debug)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Material>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);
        let area = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Material::Empty; area],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    #[inline]
    fn index(&self, pos: IVec2) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// Material at `pos`, or `None` outside the grid
    pub fn get(&self, pos: IVec2) -> Option<Material> {
        self.index(pos).map(|i| self.cells[i])
    }

    pub fn try_get(&self, pos: IVec2) -> Result<Material, WorldError> {
        self.get(pos).ok_or(WorldError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            width: self.width,
            height: self.height,
        })
    }

    /// Overwrite a cell; out-of-bounds writes are ignored
    pub(crate) fn set(&mut self, pos: IVec2, material: Material) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = material;
        }
    }

    /// Exchange two cells; ignored unless both are in bounds
    pub(crate) fn swap(&mut self, a: IVec2, b: IVec2) {
        if let (Some(ia), Some(ib)) = (self.index(a), self.index(b)) {
            self.cells.swap(ia, ib);
        }
    }

    pub(crate) fn fill(&mut self, material: Material) {
        self.cells.fill(material);
    }

    /// Iterate every cell in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Material)> + '_ {
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(i, &material)| {
            let i = i as i32;
            (IVec2::new(i % width, i / width), material)
        })
    }

    /// Number of cells holding `material`
    pub fn count(&self, material: Material) -> usize {
        self.cells.iter().filter(|&&m| m == material).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(8, 4);
        assert_eq!(grid.width(), 8);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.count(Material::Empty), 32);
    }

    #[test]
    fn test_bounds() {
        let grid = Grid::new(8, 4);
        assert!(grid.in_bounds(IVec2::new(0, 0)));
        assert!(grid.in_bounds(IVec2::new(7, 3)));
        assert!(!grid.in_bounds(IVec2::new(8, 0)));
        assert!(!grid.in_bounds(IVec2::new(0, 4)));
        assert!(!grid.in_bounds(IVec2::new(-1, 2)));
        assert!(!grid.in_bounds(IVec2::new(2, -1)));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::new(8, 4);
        assert_eq!(grid.get(IVec2::new(8, 0)), None);
        assert_eq!(
            grid.try_get(IVec2::new(-1, 0)),
            Err(WorldError::OutOfBounds {
                x: -1,
                y: 0,
                width: 8,
                height: 4
            })
        );
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = Grid::new(8, 4);
        grid.set(IVec2::new(3, 2), Material::Sand);
        assert_eq!(grid.get(IVec2::new(3, 2)), Some(Material::Sand));
        assert_eq!(grid.try_get(IVec2::new(2, 3)), Ok(Material::Empty));
    }

    #[test]
    fn test_set_out_of_bounds_is_ignored() {
        let mut grid = Grid::new(4, 4);
        grid.set(IVec2::new(4, 0), Material::Sand);
        grid.set(IVec2::new(0, -1), Material::Sand);
        assert_eq!(grid.count(Material::Sand), 0);
    }

    #[test]
    fn test_no_wraparound() {
        let mut grid = Grid::new(4, 4);
        // (4, 0) would alias (0, 1) in a naive row-major index
        grid.set(IVec2::new(4, 0), Material::Water);
        assert_eq!(grid.get(IVec2::new(0, 1)), Some(Material::Empty));
    }

    #[test]
    fn test_swap() {
        let mut grid = Grid::new(4, 4);
        grid.set(IVec2::new(1, 1), Material::Sand);
        grid.swap(IVec2::new(1, 1), IVec2::new(1, 2));
        assert_eq!(grid.get(IVec2::new(1, 1)), Some(Material::Empty));
        assert_eq!(grid.get(IVec2::new(1, 2)), Some(Material::Sand));

        grid.swap(IVec2::new(1, 2), IVec2::new(1, 4));
        assert_eq!(grid.get(IVec2::new(1, 2)), Some(Material::Sand));
    }

    #[test]
    fn test_iter_yields_coordinates_row_major() {
        let mut grid = Grid::new(3, 2);
        grid.set(IVec2::new(2, 1), Material::Wood);
        let cells: Vec<_> = grid.iter().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[1].0, IVec2::new(1, 0));
        assert_eq!(cells[5], (IVec2::new(2, 1), Material::Wood));
    }
}
