//! CPU-based pixel buffer renderer for headless capture
//!
//! Draws each occupied cell as a `cell_size` square in its material color.

use std::path::Path;

use anyhow::{Context, Result};
use grainfall_core::simulation::Materials;
use grainfall_core::world::{Sandbox, WorldRng};
use image::{ImageBuffer, Rgba};

/// Background shown for empty cells
const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// CPU-based renderer that outputs to a pixel buffer
pub struct PixelRenderer {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Pixels per cell edge
    pub cell_size: usize,
    /// RGBA pixel buffer (4 bytes per pixel)
    pub buffer: Vec<u8>,
}

impl PixelRenderer {
    /// Create a renderer for a `grid_width` x `grid_height` sandbox
    pub fn new(grid_width: usize, grid_height: usize, cell_size: usize) -> Self {
        let cell_size = cell_size.max(1);
        let width = grid_width * cell_size;
        let height = grid_height * cell_size;
        Self {
            width,
            height,
            cell_size,
            buffer: vec![0u8; width * height * 4],
        }
    }

    /// Renderer sized to fit `sandbox`
    pub fn for_sandbox<R: WorldRng>(sandbox: &Sandbox<R>, cell_size: usize) -> Self {
        Self::new(
            sandbox.width() as usize,
            sandbox.height() as usize,
            cell_size,
        )
    }

    /// Redraw the whole buffer from the sandbox's occupied cells
    pub fn render<R: WorldRng>(&mut self, sandbox: &Sandbox<R>, materials: &Materials) {
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&BACKGROUND);
        }

        sandbox.for_each_occupied_cell(|x, y, material| {
            let color = materials.get(material).color;
            self.fill_cell(x, y, color);
        });
    }

    /// Fill the square of cell `(x, y)`; cells outside the image are skipped
    fn fill_cell(&mut self, x: i32, y: i32, color: [u8; 4]) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        let x0 = x * self.cell_size;
        let y0 = y * self.cell_size;
        for py in y0..(y0 + self.cell_size).min(self.height) {
            for px in x0..(x0 + self.cell_size).min(self.width) {
                self.set_pixel(px, py, color);
            }
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: [u8; 4]) {
        let idx = (y * self.width + x) * 4;
        self.buffer[idx..idx + 4].copy_from_slice(&color);
    }

    /// RGBA value at pixel `(x, y)`
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.buffer[idx..idx + 4]);
        Some(rgba)
    }

    /// Get the pixel buffer as RGB (without alpha) for GIF encoding
    pub fn get_rgb_buffer(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.width * self.height * 3);
        for chunk in self.buffer.chunks_exact(4) {
            rgb.extend_from_slice(&chunk[..3]);
        }
        rgb
    }

    /// Save the current buffer as a PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let img: ImageBuffer<Rgba<u8>, _> = ImageBuffer::from_raw(
            u32::try_from(self.width).context("Image too wide")?,
            u32::try_from(self.height).context("Image too tall")?,
            self.buffer.clone(),
        )
        .ok_or_else(|| anyhow::anyhow!("Failed to create image buffer"))?;

        img.save(path)
            .with_context(|| format!("Failed to write PNG: {}", path.display()))?;
        Ok(())
    }
}
