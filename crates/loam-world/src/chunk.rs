//! Column chunks and visibility culling.

use ahash::AHashSet;
use loam_common::{ChunkId, TilePos};
use tracing::debug;

use crate::tile::{Tile, TileStore};

/// Chunk is visible while its center is within `radius * VISIBILITY_FACTOR` of the viewer.
pub const VISIBILITY_FACTOR: f64 = 3.5;

/// A fixed-width slice of columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    id: ChunkId,
    tiles: AHashSet<TilePos>,
    active: bool,
}

impl Chunk {
    /// Creates an empty, inactive chunk.
    #[must_use]
    pub fn new(id: ChunkId) -> Self {
        Self {
            id,
            tiles: AHashSet::new(),
            active: false,
        }
    }

    /// Chunk ID.
    #[must_use]
    pub const fn id(&self) -> ChunkId {
        self.id
    }

    /// Whether the chunk is currently visible.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Positions of the tiles in this chunk.
    #[must_use]
    pub fn tiles(&self) -> &AHashSet<TilePos> {
        &self.tiles
    }

    /// Number of tiles in this chunk.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the chunk holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Groups stored tiles by chunk and tracks chunk visibility.
#[derive(Debug, Clone)]
pub struct ChunkIndex {
    chunk_size: i32,
    chunks: Vec<Chunk>,
}

impl ChunkIndex {
    /// Creates `world_size / chunk_size` empty chunks.
    #[must_use]
    pub fn new(world_size: i32, chunk_size: i32) -> Self {
        let count = if world_size > 0 && chunk_size > 0 {
            (world_size / chunk_size) as u32
        } else {
            0
        };
        Self {
            chunk_size,
            chunks: (0..count).map(|i| Chunk::new(ChunkId::new(i))).collect(),
        }
    }

    /// Builds the index from every tile in `store`.
    #[must_use]
    pub fn from_store(store: &TileStore) -> Self {
        let mut index = Self::new(store.world_size(), store.chunk_size());
        for tile in store.iter() {
            index.insert(tile);
        }
        index
    }

    /// Records `tile` in its chunk. Tiles without a chunk are ignored.
    pub fn insert(&mut self, tile: &Tile) {
        if let Some(chunk) = tile.chunk.and_then(|id| self.chunks.get_mut(id.index() as usize)) {
            chunk.tiles.insert(tile.pos);
        }
    }

    /// Forgets `tile`.
    pub fn remove(&mut self, tile: &Tile) {
        if let Some(chunk) = tile.chunk.and_then(|id| self.chunks.get_mut(id.index() as usize)) {
            chunk.tiles.remove(&tile.pos);
        }
    }

    /// Columns per chunk.
    #[must_use]
    pub const fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// Number of chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether there are no chunks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunk with `id`.
    #[must_use]
    pub fn get(&self, id: ChunkId) -> Option<&Chunk> {
        self.chunks.get(id.index() as usize)
    }

    /// All chunks in ID order.
    #[must_use]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// IDs of the visible chunks.
    pub fn active(&self) -> impl Iterator<Item = ChunkId> + '_ {
        self.chunks.iter().filter(|c| c.active).map(|c| c.id)
    }

    /// Recomputes every chunk's active flag for a viewer at `viewer_x`.
    ///
    /// A chunk is active when the distance from its center column to the
    /// viewer is at most `radius * VISIBILITY_FACTOR`. Returns the chunks
    /// whose flag changed.
    pub fn refresh_visibility(&mut self, viewer_x: f64, radius: f64) -> Vec<ChunkId> {
        let reach = radius * VISIBILITY_FACTOR;
        let mut changed = Vec::new();
        for chunk in &mut self.chunks {
            let center = f64::from(chunk.id.center_column(self.chunk_size));
            let active = (center - viewer_x).abs() <= reach;
            if active != chunk.active {
                chunk.active = active;
                changed.push(chunk.id);
            }
        }
        if !changed.is_empty() {
            debug!(
                "Visibility at x={viewer_x:.1}: {} chunk(s) toggled, {} active",
                changed.len(),
                self.active().count()
            );
        }
        changed
    }
}
