//! Material definitions for grainfall
//!
//! This crate provides the foundational data types shared by the simulation
//! core and its front ends:
//! - The `Material` cell type and its tag/name/hotkey parsing
//! - Material behaviour classes (`MaterialType`)
//! - Display and behaviour properties (`MaterialDef`, `Materials`)

mod materials;

pub use materials::{Material, MaterialDef, MaterialError, MaterialType, Materials};
