//! Painting tools and the tool box that switches between them

mod erase;
mod pen;

pub use erase::EraseTool;
pub use pen::PenTool;

use grainfall_core::simulation::Material;
use grainfall_core::world::{BrushSize, Sandbox};

/// Trait for painting tools
pub trait Tool {
    /// Tool display name
    fn name(&self) -> &str;

    /// Apply tool centered on cell `(x, y)` with the given brush
    fn apply(&self, sandbox: &mut Sandbox, x: i32, y: i32, brush: BrushSize);
}

/// Current tool and brush
///
/// Picking `Empty` switches to the eraser; any other material arms the pen.
pub struct ToolBox {
    pen: PenTool,
    eraser: EraseTool,
    erasing: bool,
    brush: BrushSize,
}

impl ToolBox {
    pub fn new(brush: BrushSize) -> Self {
        Self {
            pen: PenTool::default(),
            eraser: EraseTool,
            erasing: false,
            brush,
        }
    }

    pub fn brush(&self) -> BrushSize {
        self.brush
    }

    /// Material the active tool paints
    pub fn material(&self) -> Material {
        if self.erasing {
            Material::Empty
        } else {
            self.pen.material()
        }
    }

    pub fn active_tool(&self) -> &dyn Tool {
        if self.erasing { &self.eraser } else { &self.pen }
    }

    /// Switch to the pen for `material`, or the eraser for `Empty`
    pub fn select(&mut self, material: Material) {
        self.erasing = material == Material::Empty;
        if !self.erasing {
            self.pen.set_material(material);
        }
        log::debug!("Selected {} ({material})", self.active_tool().name());
    }

    pub fn set_brush(&mut self, brush: BrushSize) {
        self.brush = brush;
    }

    /// Paint with the active tool at cell `(x, y)`
    pub fn paint(&self, sandbox: &mut Sandbox, x: i32, y: i32) {
        self.active_tool().apply(sandbox, x, y, self.brush);
    }
}

impl Default for ToolBox {
    fn default() -> Self {
        Self::new(BrushSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_switches_between_pen_and_eraser() {
        let mut tools = ToolBox::default();
        assert_eq!(tools.material(), Material::Sand);
        assert_eq!(tools.active_tool().name(), "Pen");

        tools.select(Material::Fire);
        assert_eq!(tools.material(), Material::Fire);

        tools.select(Material::Empty);
        assert_eq!(tools.active_tool().name(), "Eraser");
        assert_eq!(tools.material(), Material::Empty);

        // Back to the pen keeps the newly chosen material
        tools.select(Material::Water);
        assert_eq!(tools.active_tool().name(), "Pen");
        assert_eq!(tools.material(), Material::Water);
    }

    #[test]
    fn test_brush_stays_clamped() {
        let mut tools = ToolBox::new(BrushSize::new(0));
        assert_eq!(tools.brush().radius(), 1);

        tools.set_brush(BrushSize::new(4_000_000_000));
        assert_eq!(tools.brush().radius(), 30);
    }

    #[test]
    fn test_paint_uses_active_tool() {
        let mut sandbox = Sandbox::with_seed(16, 16, 9);
        let mut tools = ToolBox::new(BrushSize::new(2));

        tools.select(Material::Wood);
        tools.paint(&mut sandbox, 8, 8);
        assert_eq!(sandbox.particle_count(Material::Wood), 13);

        tools.select(Material::Empty);
        tools.paint(&mut sandbox, 8, 8);
        assert!(sandbox.active().is_empty());
    }
}
