//! Material definitions and registry

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors produced when decoding a material from external input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MaterialError {
    /// Numeric tag outside the known material range
    #[error("invalid material tag {0}")]
    InvalidMaterial(u8),
    /// Name that does not match any material
    #[error("unknown material name '{0}'")]
    UnknownName(String),
}

/// The content of a single grid cell
///
/// `Empty` is a material like any other: every cell always holds exactly one
/// value.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    #[default]
    Empty = 0,
    Sand = 1,
    Water = 2,
    Wood = 3,
    Fire = 4,
    Smoke = 5,
}

impl Material {
    /// Every material, in tag order
    pub const ALL: [Material; 6] = [
        Material::Empty,
        Material::Sand,
        Material::Water,
        Material::Wood,
        Material::Fire,
        Material::Smoke,
    ];

    /// Materials that carry an entry in the active-particle index
    pub const TRACKED: [Material; 5] = [
        Material::Sand,
        Material::Water,
        Material::Wood,
        Material::Fire,
        Material::Smoke,
    ];

    /// Numeric tag of this material
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Lowercase display name
    pub fn name(self) -> &'static str {
        match self {
            Material::Empty => "empty",
            Material::Sand => "sand",
            Material::Water => "water",
            Material::Wood => "wood",
            Material::Fire => "fire",
            Material::Smoke => "smoke",
        }
    }

    /// Whether this material is recorded in the active-particle index.
    ///
    /// Wood never moves, but it is tracked so renderers can enumerate it
    /// without scanning the whole grid.
    pub fn is_tracked(self) -> bool {
        self != Material::Empty
    }

    /// Keyboard mapping used by interactive front ends
    pub fn from_hotkey(key: char) -> Option<Material> {
        match key {
            '0' => Some(Material::Empty),
            '1' => Some(Material::Sand),
            '2' => Some(Material::Water),
            '3' => Some(Material::Wood),
            '4' => Some(Material::Fire),
            '5' => Some(Material::Smoke),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Material {
    type Error = MaterialError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Material::ALL
            .get(usize::from(tag))
            .copied()
            .ok_or(MaterialError::InvalidMaterial(tag))
    }
}

impl FromStr for Material {
    type Err = MaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" | "air" | "erase" => Ok(Material::Empty),
            "sand" => Ok(Material::Sand),
            "water" => Ok(Material::Water),
            "wood" => Ok(Material::Wood),
            "fire" => Ok(Material::Fire),
            "smoke" => Ok(Material::Smoke),
            _ => Err(MaterialError::UnknownName(s.to_string())),
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a material behaves physically
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialType {
    /// Nothing there
    Empty,
    /// Falls, piles up (sand)
    Powder,
    /// Flows, seeks level (water)
    Liquid,
    /// Doesn't move (wood)
    Solid,
    /// Burns out over time (fire)
    Energy,
    /// Rises, disperses (smoke)
    Gas,
}

/// Definition of a material's properties
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaterialDef {
    pub material: Material,
    pub name: String,
    pub material_type: MaterialType,

    /// Display color (RGBA)
    pub color: [u8; 4],

    /// Whether adjacent fire converts this material into fire
    pub flammable: bool,
}

impl MaterialDef {
    fn new(material: Material, material_type: MaterialType, color: [u8; 4]) -> Self {
        Self {
            material,
            name: material.name().to_string(),
            material_type,
            color,
            flammable: false,
        }
    }

    fn flammable(mut self) -> Self {
        self.flammable = true;
        self
    }
}

/// Registry of all materials
pub struct Materials {
    materials: Vec<MaterialDef>,
}

impl Materials {
    pub fn new() -> Self {
        let mut materials = Self {
            materials: Vec::with_capacity(Material::ALL.len()),
        };
        materials.register_defaults();
        materials
    }

    fn register_defaults(&mut self) {
        self.register(MaterialDef::new(
            Material::Empty,
            MaterialType::Empty,
            [0, 0, 0, 0],
        ));
        self.register(MaterialDef::new(
            Material::Sand,
            MaterialType::Powder,
            [194, 178, 128, 255],
        ));
        self.register(MaterialDef::new(
            Material::Water,
            MaterialType::Liquid,
            [64, 164, 223, 255],
        ));
        self.register(
            MaterialDef::new(Material::Wood, MaterialType::Solid, [101, 67, 33, 255]).flammable(),
        );
        self.register(MaterialDef::new(
            Material::Fire,
            MaterialType::Energy,
            [255, 69, 0, 255],
        ));
        self.register(MaterialDef::new(
            Material::Smoke,
            MaterialType::Gas,
            [105, 105, 105, 255],
        ));

        log::debug!("Registered {} materials", self.materials.len());
    }

    fn register(&mut self, def: MaterialDef) {
        let index = usize::from(def.material.tag());
        debug_assert_eq!(index, self.materials.len(), "materials registered out of tag order");
        self.materials.push(def);
    }

    /// Get the definition of a material
    pub fn get(&self, material: Material) -> &MaterialDef {
        &self.materials[usize::from(material.tag())]
    }

    /// Iterate all definitions in tag order
    pub fn iter(&self) -> impl Iterator<Item = &MaterialDef> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for Materials {
    fn default() -> Self {
        Self::new()
    }
}
