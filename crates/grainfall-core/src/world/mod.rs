//! Sandbox state - grid, active particles, mutation API and update rules

mod active_set;
pub mod brush;
mod ca_update;
pub mod config;
mod error;
mod grid;
pub mod rng_trait;
mod sandbox;
pub mod stats;

pub use active_set::ActiveParticles;
pub use brush::{BrushSize, MAX_BRUSH_RADIUS, MIN_BRUSH_RADIUS, disc_offsets};
pub use config::{FireSpread, SandboxConfig};
pub use error::WorldError;
pub use grid::Grid;
pub use rng_trait::WorldRng;
pub use sandbox::Sandbox;
pub use stats::{FrameStats, NoopStats, SimStats};
