//! GIF capture of sandbox runs
//!
//! Collects rendered frames and encodes them as an animated GIF.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use gif::{Encoder, Frame, Repeat};

use super::PixelRenderer;

/// Captures frames and encodes them as GIF
pub struct GifCapture {
    /// Collected frames (RGB data)
    frames: Vec<Vec<u8>>,
    width: u16,
    height: u16,
    /// Delay between frames in centiseconds (100ths of a second)
    frame_delay: u16,
    /// Record one frame out of every `stride`
    stride: u64,
}

impl GifCapture {
    /// Capture of `width` x `height` pixel frames played back at `fps`
    pub fn new(width: u16, height: u16, fps: u16) -> Self {
        let frame_delay = if fps > 0 { (100 / fps).max(1) } else { 10 };

        Self {
            frames: Vec::new(),
            width,
            height,
            frame_delay,
            stride: 1,
        }
    }

    /// Capture sized to a renderer's output
    pub fn for_renderer(renderer: &PixelRenderer, fps: u16) -> Result<Self> {
        let width = u16::try_from(renderer.width).context("Frame too wide for GIF")?;
        let height = u16::try_from(renderer.height).context("Frame too tall for GIF")?;
        Ok(Self::new(width, height, fps))
    }

    /// Only record every `stride`-th simulation frame
    pub fn with_stride(mut self, stride: u32) -> Self {
        self.stride = u64::from(stride.max(1));
        self
    }

    /// Whether simulation frame `frame` falls on the stride
    pub fn wants_frame(&self, frame: u64) -> bool {
        frame % self.stride == 0
    }

    /// Capture a frame from a pixel renderer
    pub fn capture_frame(&mut self, renderer: &PixelRenderer) {
        self.frames.push(renderer.get_rgb_buffer());
    }

    /// Get the number of captured frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Clear all captured frames
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Save captured frames as an animated GIF
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if self.frames.is_empty() {
            anyhow::bail!("No frames to save");
        }

        let file = File::create(path.as_ref()).context("Failed to create GIF file")?;

        let mut encoder = Encoder::new(file, self.width, self.height, &[])
            .context("Failed to create GIF encoder")?;

        encoder
            .set_repeat(Repeat::Infinite)
            .context("Failed to set GIF repeat")?;

        for frame_data in &self.frames {
            let mut frame = Frame::from_rgb(self.width, self.height, frame_data);
            frame.delay = self.frame_delay;

            encoder
                .write_frame(&frame)
                .context("Failed to write GIF frame")?;
        }

        log::info!(
            "Wrote {} GIF frames to {}",
            self.frames.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}
