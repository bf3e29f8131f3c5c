//! # grainfall-core
//!
//! The simulation core of the grainfall particle sandbox: a bounded grid of
//! material cells, the index of live particles kept in sync with it, and the
//! per-material rules that advance the sandbox one frame at a time.

pub mod world;

// Re-export the material definitions so front ends need a single dependency
pub mod simulation {
    pub use grainfall_simulation::*;
}
