//! # Grainfall - falling-sand particle sandbox
//!
//! Driver crate around [`grainfall_core`]: layered configuration, painting
//! tools and headless scenario playback with PNG/GIF output.

pub mod config;
pub mod headless;
pub mod tools;

pub use config::AppConfig;

/// Common imports for internal use
pub mod prelude {
    pub use grainfall_core::simulation::{Material, MaterialType, Materials};
    pub use grainfall_core::world::{BrushSize, FrameStats, Sandbox, SandboxConfig};
    pub use glam::IVec2;
}
