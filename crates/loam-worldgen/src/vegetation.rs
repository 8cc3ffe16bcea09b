//! Trees and ground cover placed on top of the generated surface.

use loam_common::TilePos;

use crate::biome::{Biome, TreeMaterials};
use crate::material::MaterialKind;

/// Roll result that triggers a decoration.
pub const TRIGGER: u32 = 1;

/// Trunks taller than this get the extra canopy cluster.
pub const TALL_TREE_HEIGHT: u32 = 8;

/// Canopy offsets relative to the trunk top.
const CANOPY: [(i32, i32); 7] = [(0, 0), (0, 1), (0, 2), (-1, 0), (-1, 1), (1, 0), (1, 1)];

/// Extra canopy offsets for tall trees, relative to the trunk top.
const TALL_CANOPY: [(i32, i32); 13] = [
    (0, 3),
    (-1, 3),
    (1, 3),
    (-2, 0),
    (2, 0),
    (-3, 0),
    (3, 0),
    (-2, 1),
    (2, 1),
    (0, 4),
    (0, 5),
    (1, 2),
    (-1, 2),
];

/// Destination of decoration tiles.
pub trait TileSink {
    /// Whether a tile occupies `(x, y)`.
    fn contains(&self, x: i32, y: i32) -> bool;

    /// Places `kind` at `(x, y)`. Returns false if the cell was rejected.
    fn place(&mut self, kind: MaterialKind, x: i32, y: i32) -> bool;
}

/// Tree species.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeKind {
    /// Oak
    Oak,
    /// Birch
    Birch,
}

/// What a column received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    /// Nothing was rolled
    None,
    /// A tree with the given trunk height
    Tree {
        /// Species
        kind: TreeKind,
        /// Trunk height in tiles
        height: u32,
    },
    /// One ground cover tile
    GroundCover(MaterialKind),
}

/// Places vegetation using its own seeded random stream.
#[derive(Debug, Clone)]
pub struct VegetationDecorator {
    rng: fastrand::Rng,
}

impl VegetationDecorator {
    /// Creates a decorator with a fixed stream seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Uniform roll in `[0, chance)` compared against [`TRIGGER`].
    ///
    /// A chance of 0 or 1 can never produce the trigger and draws nothing.
    fn roll(&mut self, chance: u32) -> bool {
        chance > TRIGGER && self.rng.u32(0..chance) == TRIGGER
    }

    fn trunk_height(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            min
        } else {
            self.rng.u32(min..max)
        }
    }

    /// Decorates column `x` whose topmost terrain tile is at row `surface`.
    ///
    /// A successful tree roll grows a tree when a tile sits at `(x, surface)`
    /// and leaves the column bare otherwise. Only a missed tree roll goes on
    /// to roll ground cover, placed at `(x, surface + 1)` when the column is
    /// grounded and the biome defines ground cover.
    pub fn decorate_column<S: TileSink>(
        &mut self,
        sink: &mut S,
        biome: &Biome,
        x: i32,
        surface: i32,
    ) -> Decoration {
        let grounded = sink.contains(x, surface);
        if self.roll(biome.gen_tree_chance) {
            if !grounded {
                return Decoration::None;
            }
            let (kind, height) = if self.roll(biome.birch_tree_chance) {
                let h = self.trunk_height(biome.birch_tree_min_height, biome.birch_tree_max_height);
                (TreeKind::Birch, h)
            } else {
                let h = self.trunk_height(biome.oak_tree_min_height, biome.oak_tree_max_height);
                (TreeKind::Oak, h)
            };
            let materials = match kind {
                TreeKind::Oak => biome.materials.oak,
                TreeKind::Birch => biome.materials.birch,
            };
            grow_tree(sink, materials, height, TilePos::new(x, surface + 1));
            return Decoration::Tree { kind, height };
        }

        if self.roll(biome.tall_grass_chance) && grounded {
            if let Some(cover) = biome.materials.tall_grass {
                if sink.place(cover, x, surface + 1) {
                    return Decoration::GroundCover(cover);
                }
            }
        }
        Decoration::None
    }
}

/// Places a trunk of `height` tiles starting at `base` and its canopy.
///
/// Every tile goes through `sink`, so occupied cells are left untouched.
pub fn grow_tree<S: TileSink>(
    sink: &mut S,
    materials: TreeMaterials,
    height: u32,
    base: TilePos,
) {
    let height = height as i32;
    for i in 0..height {
        let log = base.offset(0, i);
        sink.place(materials.log, log.x, log.y);
    }

    let crown = base.offset(0, height);
    let tall: &[(i32, i32)] = if height > TALL_TREE_HEIGHT as i32 {
        &TALL_CANOPY
    } else {
        &[]
    };
    for &(dx, dy) in CANOPY.iter().chain(tall) {
        let leaf = crown.offset(dx, dy);
        sink.place(materials.leaf, leaf.x, leaf.y);
    }
}
