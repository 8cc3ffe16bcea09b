//! Coordinate types for tiles, chunks, and continuous world positions.

use serde::{Deserialize, Serialize};

/// Integer grid position of a tile.
///
/// `y` grows upwards: row 0 is the bottom of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePos {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl TilePos {
    /// Creates a new tile position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this position shifted by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for TilePos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Identifier of a vertical chunk (a fixed-width slice of columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkId(u32);

impl ChunkId {
    /// Creates a chunk ID from its index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the chunk index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Chunk owning column `x`.
    ///
    /// The quotient `x / chunk_size` is already integral, so rounding it is the
    /// identity. Columns past the last whole chunk (the remainder when
    /// `chunk_size` does not divide the world size, and the inclusive upper
    /// edge) belong to no chunk and yield `None`.
    #[must_use]
    pub fn for_column(x: i32, chunk_size: i32, chunk_count: u32) -> Option<Self> {
        if x < 0 || chunk_size <= 0 {
            return None;
        }
        let index = (x / chunk_size) as u32;
        (index < chunk_count).then_some(Self(index))
    }

    /// Representative column of this chunk, used for viewer distance checks.
    #[must_use]
    pub const fn center_column(self, chunk_size: i32) -> i32 {
        self.0 as i32 * chunk_size + chunk_size / 2
    }
}

impl std::fmt::Display for ChunkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "chunk#{}", self.0)
    }
}

/// Continuous world-space position, used for spawn points and viewers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    /// Horizontal position in tile units
    pub x: f64,
    /// Vertical position in tile units
    pub y: f64,
}

impl WorldPos {
    /// Creates a new world position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
