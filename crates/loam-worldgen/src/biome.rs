//! Biome definitions and the per-cell biome map.
//!
//! Biomes are assigned by evaluating a low-frequency noise field and mapping
//! the value through an ordered gradient of stops. Each stop owns the range
//! from its position up to the next stop, so classification is a range lookup
//! and never depends on floating-point colour equality.

use loam_common::BiomeLookupError;
use serde::{Deserialize, Serialize};

use crate::material::MaterialKind;
use crate::noise::NoiseField;
use crate::ore::Ore;

/// Trunk and leaf materials of one tree species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeMaterials {
    /// Trunk
    pub log: MaterialKind,
    /// Canopy
    pub leaf: MaterialKind,
}

/// Materials a biome builds its columns and decoration from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiomeMaterials {
    /// Topmost row
    pub grass: MaterialKind,
    /// Rows between the stone layer and the surface
    pub dirt: MaterialKind,
    /// Deep layer, possibly replaced by ore
    pub stone: MaterialKind,
    /// Ground cover, `None` for biomes without any
    pub tall_grass: Option<MaterialKind>,
    /// Oak tree materials
    pub oak: TreeMaterials,
    /// Birch tree materials
    pub birch: TreeMaterials,
}

impl Default for BiomeMaterials {
    fn default() -> Self {
        Self {
            grass: MaterialKind::Grass,
            dirt: MaterialKind::Dirt,
            stone: MaterialKind::Stone,
            tall_grass: Some(MaterialKind::TallGrass),
            oak: TreeMaterials {
                log: MaterialKind::OakLog,
                leaf: MaterialKind::OakLeaf,
            },
            birch: TreeMaterials {
                log: MaterialKind::BirchLog,
                leaf: MaterialKind::BirchLeaf,
            },
        }
    }
}

/// Configuration of one biome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Biome {
    /// Unique name, referenced by gradient stops
    pub name: String,
    /// Identifying colour for map renderers
    pub color: [u8; 3],
    /// Frequency of the terrain height noise
    pub terrain_frequency: f64,
    /// Frequency of the cave noise
    pub cave_frequency: f64,
    /// Thickness of the dirt layer, counted down from the surface
    pub dirt_layer_height: i32,
    /// Amplitude of the terrain height noise
    pub world_height_multiplier: f64,
    /// Cave mask threshold: lower values carve fewer caves
    pub terrain_sculpt_influence: f64,
    /// Tree roll range; a tree grows when the roll hits the trigger value
    pub gen_tree_chance: u32,
    /// Oak trunk height range start
    pub oak_tree_min_height: u32,
    /// Oak trunk height range end (exclusive)
    pub oak_tree_max_height: u32,
    /// Birch roll range, evaluated once a tree is rolled
    pub birch_tree_chance: u32,
    /// Birch trunk height range start
    pub birch_tree_min_height: u32,
    /// Birch trunk height range end (exclusive)
    pub birch_tree_max_height: u32,
    /// Ground cover roll range
    pub tall_grass_chance: u32,
    /// Ores specific to this biome; empty uses the world list
    pub ores: Vec<Ore>,
    /// Material set
    pub materials: BiomeMaterials,
}

impl Default for Biome {
    fn default() -> Self {
        Self {
            name: "grassland".into(),
            color: [50, 205, 50],
            terrain_frequency: 0.05,
            cave_frequency: 0.05,
            dirt_layer_height: 7,
            world_height_multiplier: 5.0,
            terrain_sculpt_influence: 0.25,
            gen_tree_chance: 10,
            oak_tree_min_height: 4,
            oak_tree_max_height: 30,
            birch_tree_chance: 5,
            birch_tree_min_height: 5,
            birch_tree_max_height: 10,
            tall_grass_chance: 10,
            ores: Vec::new(),
            materials: BiomeMaterials::default(),
        }
    }
}

impl Biome {
    /// Temperate grassland with oak and birch trees.
    #[must_use]
    pub fn grassland() -> Self {
        Self::default()
    }

    /// Flat sandy desert with dead grass and rare trees.
    #[must_use]
    pub fn desert() -> Self {
        Self {
            name: "desert".into(),
            color: [255, 215, 0],
            terrain_frequency: 0.03,
            world_height_multiplier: 3.0,
            dirt_layer_height: 9,
            gen_tree_chance: 60,
            tall_grass_chance: 6,
            materials: BiomeMaterials {
                grass: MaterialKind::Sand,
                dirt: MaterialKind::Sand,
                tall_grass: Some(MaterialKind::DeadGrass),
                ..BiomeMaterials::default()
            },
            ..Self::default()
        }
    }

    /// Snow-covered hills without ground cover.
    #[must_use]
    pub fn tundra() -> Self {
        Self {
            name: "tundra".into(),
            color: [211, 211, 211],
            terrain_frequency: 0.06,
            world_height_multiplier: 8.0,
            dirt_layer_height: 5,
            gen_tree_chance: 14,
            birch_tree_chance: 2,
            materials: BiomeMaterials {
                grass: MaterialKind::Snow,
                dirt: MaterialKind::Snow,
                tall_grass: None,
                ..BiomeMaterials::default()
            },
            ..Self::default()
        }
    }
}

/// One stop of the biome gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Noise value where this biome starts
    pub position: f64,
    /// Biome name
    pub biome: String,
}

impl GradientStop {
    /// Creates a stop.
    #[must_use]
    pub fn new(position: f64, biome: impl Into<String>) -> Self {
        Self {
            position,
            biome: biome.into(),
        }
    }
}

/// Gradient resolved to biome indices, sorted by position.
#[derive(Debug, Clone, PartialEq)]
pub struct BiomeGradient {
    stops: Vec<(f64, usize)>,
}

impl BiomeGradient {
    /// Resolves stop names against `biomes`. Returns the first unknown name on failure.
    pub fn resolve(stops: &[GradientStop], biomes: &[Biome]) -> Result<Self, String> {
        let mut resolved = stops
            .iter()
            .map(|stop| {
                biomes
                    .iter()
                    .position(|b| b.name == stop.biome)
                    .map(|index| (stop.position, index))
                    .ok_or_else(|| stop.biome.clone())
            })
            .collect::<Result<Vec<_>, _>>()?;
        resolved.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self { stops: resolved })
    }

    /// Biome index for a noise value: the last stop at or below `value`.
    #[must_use]
    pub fn evaluate(&self, value: f64) -> Option<usize> {
        self.stops
            .iter()
            .take_while(|(position, _)| *position <= value)
            .last()
            .map(|&(_, index)| index)
    }
}

/// Cell classification of one biome-map entry.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell {
    Matched(u16),
    Unmatched(f64),
}

/// Precomputed biome index for every cell of a square world.
///
/// Covers the inclusive range `0..=size` on both axes, the same range tiles
/// may occupy.
#[derive(Debug, Clone)]
pub struct BiomeMap {
    biomes: Vec<Biome>,
    side: i32,
    cells: Vec<Cell>,
    fallback: Option<usize>,
}

impl BiomeMap {
    /// Evaluates `rarity_field` over every cell and classifies it through `gradient`.
    ///
    /// `fallback` is the biome index used for unmatched cells; `None` makes
    /// such lookups fail with [`BiomeLookupError::Unmatched`].
    #[must_use]
    pub fn build(
        biomes: Vec<Biome>,
        gradient: &BiomeGradient,
        rarity_field: &NoiseField,
        world_size: i32,
        fallback: Option<usize>,
    ) -> Self {
        let side = world_size.clamp(0, i32::MAX - 1) + 1;
        let len = (side as usize).saturating_mul(side as usize);
        let mut cells = Vec::with_capacity(len);
        for y in 0..side {
            for x in 0..side {
                let value = rarity_field.sample(x, y);
                cells.push(match gradient.evaluate(value) {
                    Some(index) => Cell::Matched(index as u16),
                    None => Cell::Unmatched(value),
                });
            }
        }
        Self {
            biomes,
            side,
            cells,
            fallback,
        }
    }

    /// All biomes, indexed as in the map.
    #[must_use]
    pub fn biomes(&self) -> &[Biome] {
        &self.biomes
    }

    /// Biome index at `(x, y)`.
    pub fn index_at(&self, x: i32, y: i32) -> Result<usize, BiomeLookupError> {
        if x < 0 || y < 0 || x >= self.side || y >= self.side {
            return Err(BiomeLookupError::OutOfBounds { x, y });
        }
        match self.cells[y as usize * self.side as usize + x as usize] {
            Cell::Matched(index) => Ok(index as usize),
            Cell::Unmatched(value) => self
                .fallback
                .ok_or(BiomeLookupError::Unmatched { x, y, value }),
        }
    }

    /// Biome at `(x, y)`.
    pub fn biome_at(&self, x: i32, y: i32) -> Result<&Biome, BiomeLookupError> {
        self.index_at(x, y).map(|index| &self.biomes[index])
    }

    /// Number of cells that fell below the first gradient stop.
    #[must_use]
    pub fn unmatched_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Cell::Unmatched(_)))
            .count()
    }
}
