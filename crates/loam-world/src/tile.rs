//! Tiles and the authoritative tile store.

use ahash::AHashMap;
use loam_common::{ChunkId, TilePos};
use loam_worldgen::{MaterialCatalog, MaterialKind, TileSink};

/// One placed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Grid position
    pub pos: TilePos,
    /// Material kind
    pub kind: MaterialKind,
    /// Cosmetic variant index, below the catalog's variant count
    pub variant: u8,
    /// Participates in collision
    pub solid: bool,
    /// Owning chunk, `None` for columns past the last whole chunk
    pub chunk: Option<ChunkId>,
}

/// Sparse map from position to tile. At most one tile per position.
#[derive(Debug, Clone)]
pub struct TileStore {
    /// Upper coordinate bound (inclusive) on both axes
    world_size: i32,
    /// Columns per chunk
    chunk_size: i32,
    /// Number of whole chunks
    chunk_count: u32,
    /// Walkability and variant counts
    catalog: MaterialCatalog,
    /// Placed tiles
    tiles: AHashMap<TilePos, Tile>,
    /// Cosmetic variant stream
    variants: fastrand::Rng,
}

impl TileStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(world_size: i32, chunk_size: i32, catalog: MaterialCatalog, variant_seed: u64) -> Self {
        let chunk_count = if world_size > 0 && chunk_size > 0 {
            (world_size / chunk_size) as u32
        } else {
            0
        };
        Self {
            world_size,
            chunk_size,
            chunk_count,
            catalog,
            tiles: AHashMap::new(),
            variants: fastrand::Rng::with_seed(variant_seed),
        }
    }

    /// World size the store was created with.
    #[must_use]
    pub const fn world_size(&self) -> i32 {
        self.world_size
    }

    /// Columns per chunk.
    #[must_use]
    pub const fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// Number of whole chunks.
    #[must_use]
    pub const fn chunk_count(&self) -> u32 {
        self.chunk_count
    }

    /// The material catalog.
    #[must_use]
    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }

    /// Whether `(x, y)` lies within `0..=world_size` on both axes.
    #[must_use]
    pub const fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x <= self.world_size && y <= self.world_size
    }

    /// Whether `(x, y)` is on a break-protected edge column or row.
    #[must_use]
    pub const fn is_protected(&self, x: i32, y: i32) -> bool {
        let edge = self.world_size - 1;
        x == 0 || y == 0 || x == edge || y == edge
    }

    /// Chunk owning column `x`.
    #[must_use]
    pub fn chunk_for(&self, x: i32) -> Option<ChunkId> {
        ChunkId::for_column(x, self.chunk_size, self.chunk_count)
    }

    /// Places a tile of `kind` at `(x, y)`.
    ///
    /// Returns false, leaving the store untouched, when the cell is out of
    /// bounds or already occupied.
    pub fn place(&mut self, kind: MaterialKind, x: i32, y: i32) -> bool {
        self.insert(kind, x, y).is_some()
    }

    /// Places a tile and returns it, or `None` if the cell was rejected.
    pub fn insert(&mut self, kind: MaterialKind, x: i32, y: i32) -> Option<Tile> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let pos = TilePos::new(x, y);
        if self.tiles.contains_key(&pos) {
            return None;
        }

        let info = self.catalog.info(kind);
        let tile = Tile {
            pos,
            kind,
            variant: self.variants.u8(0..info.variants),
            solid: !info.walkable,
            chunk: self.chunk_for(x),
        };
        self.tiles.insert(pos, tile);
        Some(tile)
    }

    /// Removes the tile at `(x, y)` and returns it.
    ///
    /// Returns `None` when the cell is empty, out of bounds, or protected.
    pub fn break_tile(&mut self, x: i32, y: i32) -> Option<Tile> {
        if !self.in_bounds(x, y) || self.is_protected(x, y) {
            return None;
        }
        self.tiles.remove(&TilePos::new(x, y))
    }

    /// Tile at `(x, y)`.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        self.tiles.get(&TilePos::new(x, y))
    }

    /// Whether a tile occupies `(x, y)`.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.tiles.contains_key(&TilePos::new(x, y))
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the store holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Removes every tile.
    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}

impl TileSink for TileStore {
    fn contains(&self, x: i32, y: i32) -> bool {
        TileStore::contains(self, x, y)
    }

    fn place(&mut self, kind: MaterialKind, x: i32, y: i32) -> bool {
        TileStore::place(self, kind, x, y)
    }
}
