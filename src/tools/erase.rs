//! Eraser tool

use grainfall_core::simulation::Material;
use grainfall_core::world::{BrushSize, Sandbox};

use super::Tool;

/// Eraser tool that clears a disc to `Empty`
pub struct EraseTool;

impl Tool for EraseTool {
    fn name(&self) -> &str {
        "Eraser"
    }

    fn apply(&self, sandbox: &mut Sandbox, x: i32, y: i32, brush: BrushSize) {
        sandbox.place_area(x, y, Material::Empty, brush.radius());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erase_clears_particles_and_fire() {
        let mut sandbox = Sandbox::with_seed(10, 10, 4);
        sandbox.place_area(5, 5, Material::Water, 3);
        sandbox.place(5, 5, Material::Fire);

        EraseTool.apply(&mut sandbox, 5, 5, BrushSize::new(3));

        assert!(sandbox.active().is_empty());
        assert_eq!(sandbox.fire_lifetime(5, 5), None);
        sandbox.check_consistency().unwrap();
    }
}
