//! Headless scenario playback
//!
//! Runs scripted scenarios without a window:
//! - Scenario scripts (RON files or built-in presets)
//! - Pixel buffer rendering for PNG and GIF output
//! - A runner that paints strokes on schedule and collects statistics

mod gif_capture;
mod pixel_renderer;
mod runner;
mod scenario;

pub use gif_capture::GifCapture;
pub use pixel_renderer::PixelRenderer;
pub use runner::{RunReport, ScenarioRunner};
pub use scenario::{PRESETS, Scenario, Stroke};
