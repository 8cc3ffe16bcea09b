//! A generated world and its runtime edit operations.

use loam_common::{BiomeLookupError, ChunkId, WorldPos};
use loam_worldgen::{Biome, HeightProfile, MaterialKind, WorldConfig, WorldFields};
use tracing::debug;

use crate::chunk::ChunkIndex;
use crate::tile::{Tile, TileStore};

/// Counters collected during generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Terrain tiles placed by the layer pass
    pub terrain: usize,
    /// Terrain cells left hollow by the cave mask
    pub carved: usize,
    /// Ore tiles among the terrain tiles
    pub ores: usize,
    /// Trees grown
    pub trees: usize,
    /// Ground cover tiles placed
    pub ground_cover: usize,
    /// Columns outside every chunk
    pub unchunked_columns: i32,
}

/// Tiles, chunks, and fields of one generated world.
#[derive(Debug, Clone)]
pub struct World {
    /// Configuration with the resolved seed filled in
    pub(crate) config: WorldConfig,
    /// Resolved seed
    pub(crate) seed: f64,
    /// Biome map and per-biome noise
    pub(crate) fields: WorldFields,
    /// Column heights and spawn point
    pub(crate) heights: HeightProfile,
    /// Placed tiles
    pub(crate) store: TileStore,
    /// Chunk grouping and visibility
    pub(crate) chunks: ChunkIndex,
    /// Generation counters
    pub(crate) report: GenerationReport,
}

impl World {
    /// Removes the tile at `(x, y)`.
    ///
    /// Returns false for empty, out-of-range, or edge-protected cells.
    pub fn break_block(&mut self, x: i32, y: i32) -> bool {
        match self.store.break_tile(x, y) {
            Some(tile) => {
                self.chunks.remove(&tile);
                debug!("Broke {} at ({}, {})", tile.kind, x, y);
                true
            },
            None => false,
        }
    }

    /// Places a tile of `kind` at `(x, y)`.
    ///
    /// Returns false for occupied or out-of-range cells.
    pub fn place_block(&mut self, kind: MaterialKind, x: i32, y: i32) -> bool {
        match self.store.insert(kind, x, y) {
            Some(tile) => {
                self.chunks.insert(&tile);
                debug!("Placed {} at ({}, {})", kind, x, y);
                true
            },
            None => false,
        }
    }

    /// Biome at `(x, y)`.
    pub fn current_biome(&self, x: i32, y: i32) -> Result<&Biome, BiomeLookupError> {
        self.fields.biome_at(x, y)
    }

    /// Updates chunk visibility for a viewer and returns the chunks that toggled.
    pub fn refresh_visibility(&mut self, viewer_x: f64, radius: f64) -> Vec<ChunkId> {
        self.chunks.refresh_visibility(viewer_x, radius)
    }

    /// Surface height of column `x`.
    #[must_use]
    pub fn height(&self, x: i32) -> Option<f64> {
        self.heights.height(x)
    }

    /// Row of the topmost terrain tile in column `x`.
    #[must_use]
    pub fn surface(&self, x: i32) -> Option<i32> {
        self.heights.surface(x)
    }

    /// Player spawn point.
    #[must_use]
    pub fn spawn_point(&self) -> WorldPos {
        self.heights.spawn()
    }

    /// Tile at `(x, y)`.
    #[must_use]
    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.store.get(x, y)
    }

    /// The tile store.
    #[must_use]
    pub fn tiles(&self) -> &TileStore {
        &self.store
    }

    /// The chunk index.
    #[must_use]
    pub fn chunks(&self) -> &ChunkIndex {
        &self.chunks
    }

    /// The noise fields.
    #[must_use]
    pub fn fields(&self) -> &WorldFields {
        &self.fields
    }

    /// Resolved seed.
    #[must_use]
    pub const fn seed(&self) -> f64 {
        self.seed
    }

    /// Configuration, with `seed` set to the resolved value.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Generation counters.
    #[must_use]
    pub const fn report(&self) -> GenerationReport {
        self.report
    }

    /// Side length of the world.
    #[must_use]
    pub const fn size(&self) -> i32 {
        self.store.world_size()
    }
}
