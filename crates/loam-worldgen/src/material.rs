//! Tile material kinds and the material catalog.
//!
//! The catalog is the only source of truth for whether a kind is walkable
//! (non-solid) and how many cosmetic variants it has. Nothing branches on
//! sprite names.

use serde::{Deserialize, Serialize};

/// Kind of material a tile is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    /// Grass-topped surface block
    Grass,
    /// Dirt
    Dirt,
    /// Stone
    Stone,
    /// Sand (desert surface and subsurface)
    Sand,
    /// Snow (tundra surface and subsurface)
    Snow,
    /// Tall grass ground cover
    TallGrass,
    /// Dead grass ground cover
    DeadGrass,
    /// Oak trunk
    OakLog,
    /// Oak leaves
    OakLeaf,
    /// Birch trunk
    BirchLog,
    /// Birch leaves
    BirchLeaf,
    /// Coal ore
    Coal,
    /// Iron ore
    Iron,
    /// Gold ore
    Gold,
    /// Diamond ore
    Diamond,
}

impl MaterialKind {
    /// Every material kind.
    pub const ALL: [Self; 15] = [
        Self::Grass,
        Self::Dirt,
        Self::Stone,
        Self::Sand,
        Self::Snow,
        Self::TallGrass,
        Self::DeadGrass,
        Self::OakLog,
        Self::OakLeaf,
        Self::BirchLog,
        Self::BirchLeaf,
        Self::Coal,
        Self::Iron,
        Self::Gold,
        Self::Diamond,
    ];

    /// Snake-case name, matching the serialized form.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grass => "grass",
            Self::Dirt => "dirt",
            Self::Stone => "stone",
            Self::Sand => "sand",
            Self::Snow => "snow",
            Self::TallGrass => "tall_grass",
            Self::DeadGrass => "dead_grass",
            Self::OakLog => "oak_log",
            Self::OakLeaf => "oak_leaf",
            Self::BirchLog => "birch_log",
            Self::BirchLeaf => "birch_leaf",
            Self::Coal => "coal",
            Self::Iron => "iron",
            Self::Gold => "gold",
            Self::Diamond => "diamond",
        }
    }

    /// Whether this kind is an ore.
    #[must_use]
    pub const fn is_ore(self) -> bool {
        matches!(self, Self::Coal | Self::Iron | Self::Gold | Self::Diamond)
    }

    /// Built-in catalog entry for this kind.
    #[must_use]
    pub const fn builtin_info(self) -> MaterialInfo {
        match self {
            Self::TallGrass | Self::DeadGrass => MaterialInfo::walkable(2),
            Self::OakLog | Self::BirchLog => MaterialInfo::walkable(1),
            Self::OakLeaf | Self::BirchLeaf => MaterialInfo::walkable(2),
            Self::Stone => MaterialInfo::solid(3),
            Self::Dirt | Self::Sand | Self::Snow => MaterialInfo::solid(2),
            Self::Grass | Self::Coal | Self::Iron | Self::Gold | Self::Diamond => {
                MaterialInfo::solid(1)
            },
        }
    }
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-kind rendering and collision attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialInfo {
    /// Number of interchangeable visual variants (at least 1)
    pub variants: u8,
    /// Walkable kinds produce non-solid tiles
    pub walkable: bool,
}

impl MaterialInfo {
    /// A solid material with `variants` visual variants.
    #[must_use]
    pub const fn solid(variants: u8) -> Self {
        Self {
            variants,
            walkable: false,
        }
    }

    /// A walk-through material with `variants` visual variants.
    #[must_use]
    pub const fn walkable(variants: u8) -> Self {
        Self {
            variants,
            walkable: true,
        }
    }
}

impl Default for MaterialInfo {
    fn default() -> Self {
        Self::solid(1)
    }
}

/// Catalog entry as it appears in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialEntry {
    /// Material kind
    pub kind: MaterialKind,
    /// Visual variant count
    pub variants: u8,
    /// Walk-through flag
    pub walkable: bool,
}

/// Material kind → `{variants, walkable}` table.
///
/// Kinds without an explicit entry use [`MaterialKind::builtin_info`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialCatalog {
    overrides: Vec<MaterialEntry>,
}

impl MaterialCatalog {
    /// Creates a catalog that only uses built-in entries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entry for `kind`, replacing any previous override.
    pub fn register(&mut self, kind: MaterialKind, info: MaterialInfo) {
        let entry = MaterialEntry {
            kind,
            variants: info.variants,
            walkable: info.walkable,
        };
        match self.overrides.iter_mut().find(|e| e.kind == kind) {
            Some(slot) => *slot = entry,
            None => self.overrides.push(entry),
        }
    }

    /// Builder form of [`MaterialCatalog::register`].
    #[must_use]
    pub fn with(mut self, kind: MaterialKind, info: MaterialInfo) -> Self {
        self.register(kind, info);
        self
    }

    /// Looks up the attributes of `kind`. Variant count is never below 1.
    #[must_use]
    pub fn info(&self, kind: MaterialKind) -> MaterialInfo {
        let info = self
            .overrides
            .iter()
            .find(|e| e.kind == kind)
            .map_or_else(
                || kind.builtin_info(),
                |e| MaterialInfo {
                    variants: e.variants,
                    walkable: e.walkable,
                },
            );
        MaterialInfo {
            variants: info.variants.max(1),
            ..info
        }
    }

    /// Whether tiles of `kind` participate in collision.
    #[must_use]
    pub fn is_solid(&self, kind: MaterialKind) -> bool {
        !self.info(kind).walkable
    }

    /// Explicit overrides, in registration order.
    #[must_use]
    pub fn overrides(&self) -> &[MaterialEntry] {
        &self.overrides
    }
}
