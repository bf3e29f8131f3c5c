//! Errors surfaced by the sandbox

use crate::simulation::MaterialError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    /// Coordinate outside `[0, width) x [0, height)`
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    /// Placement request carrying a material the sandbox does not know
    #[error(transparent)]
    InvalidMaterial(#[from] MaterialError),

    #[error("invalid sandbox configuration: {0}")]
    InvalidConfig(String),

    /// Grid and active-particle index disagree about a cell
    #[error("active index out of sync at ({x}, {y}): {detail}")]
    Inconsistent { x: i32, y: i32, detail: String },
}
