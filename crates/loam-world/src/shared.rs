//! Thread-safe handle to a generated world.

use std::sync::Arc;

use loam_common::{ChunkId, WorldPos};
use loam_worldgen::MaterialKind;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::world::World;

/// Cloneable, lock-guarded world.
///
/// Every edit takes the write lock, so the occupancy check and the mutation
/// of a place or break happen as one step.
#[derive(Debug, Clone)]
pub struct SharedWorld {
    inner: Arc<RwLock<World>>,
}

impl SharedWorld {
    /// Wraps a world.
    #[must_use]
    pub fn new(world: World) -> Self {
        Self {
            inner: Arc::new(RwLock::new(world)),
        }
    }

    /// Read access.
    pub fn read(&self) -> RwLockReadGuard<'_, World> {
        self.inner.read()
    }

    /// Write access.
    pub fn write(&self) -> RwLockWriteGuard<'_, World> {
        self.inner.write()
    }

    /// See [`World::break_block`].
    pub fn break_block(&self, x: i32, y: i32) -> bool {
        self.inner.write().break_block(x, y)
    }

    /// See [`World::place_block`].
    pub fn place_block(&self, kind: MaterialKind, x: i32, y: i32) -> bool {
        self.inner.write().place_block(kind, x, y)
    }

    /// See [`World::refresh_visibility`].
    pub fn refresh_visibility(&self, viewer_x: f64, radius: f64) -> Vec<ChunkId> {
        self.inner.write().refresh_visibility(viewer_x, radius)
    }

    /// Number of stored tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.inner.read().tiles().len()
    }

    /// Player spawn point.
    #[must_use]
    pub fn spawn_point(&self) -> WorldPos {
        self.inner.read().spawn_point()
    }
}
