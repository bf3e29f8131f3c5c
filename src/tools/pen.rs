//! Pen tool for painting materials

use grainfall_core::simulation::Material;
use grainfall_core::world::{BrushSize, Sandbox};

use super::Tool;

/// Pen tool that paints a disc of one material
pub struct PenTool {
    material: Material,
}

impl PenTool {
    /// Create a new pen tool for the given material
    pub fn new(material: Material) -> Self {
        Self { material }
    }

    /// Set the material this pen paints
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub fn material(&self) -> Material {
        self.material
    }
}

impl Default for PenTool {
    fn default() -> Self {
        Self::new(Material::Sand)
    }
}

impl Tool for PenTool {
    fn name(&self) -> &str {
        "Pen"
    }

    fn apply(&self, sandbox: &mut Sandbox, x: i32, y: i32, brush: BrushSize) {
        sandbox.place_area(x, y, self.material, brush.radius());
    }
}
