//! Per-column surface heights.

use loam_common::{BiomeLookupError, WorldPos};

use crate::fields::WorldFields;

/// Surface height of every column plus the spawn point.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightProfile {
    heights: Vec<f64>,
    spawn: WorldPos,
}

impl HeightProfile {
    /// Computes `height(x)` for every column `0..world_size`.
    ///
    /// The spawn point sits above column `world_size / 2` at
    /// `height + spawn_offset`.
    pub fn build(
        fields: &WorldFields,
        world_size: i32,
        height_addition: i32,
        spawn_offset: f64,
    ) -> Result<Self, BiomeLookupError> {
        let heights = (0..world_size.max(0))
            .map(|x| column_height(fields, x, height_addition))
            .collect::<Result<Vec<_>, _>>()?;

        let spawn_x = world_size / 2;
        let spawn_height = heights
            .get(spawn_x as usize)
            .copied()
            .unwrap_or(f64::from(height_addition));
        let spawn = WorldPos::new(f64::from(spawn_x), spawn_height + spawn_offset);

        Ok(Self { heights, spawn })
    }

    /// Real-valued height of column `x`.
    #[must_use]
    pub fn height(&self, x: i32) -> Option<f64> {
        usize::try_from(x).ok().and_then(|i| self.heights.get(i)).copied()
    }

    /// Number of generated rows in column `x`: rows `0..top` are terrain.
    #[must_use]
    pub fn top(&self, x: i32) -> Option<i32> {
        self.height(x).map(|h| h.floor() as i32)
    }

    /// Row of the topmost terrain tile in column `x`.
    #[must_use]
    pub fn surface(&self, x: i32) -> Option<i32> {
        self.top(x).map(|top| top - 1)
    }

    /// Recorded spawn point.
    #[must_use]
    pub const fn spawn(&self) -> WorldPos {
        self.spawn
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Whether the profile has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// `(x, height)` pairs from left to right.
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.heights.iter().enumerate().map(|(x, &h)| (x as i32, h))
    }
}

/// `terrain(x, 0) * world_height_multiplier + height_addition` for the biome at `(x, 0)`.
pub fn column_height(
    fields: &WorldFields,
    x: i32,
    height_addition: i32,
) -> Result<f64, BiomeLookupError> {
    let (biome, biome_fields) = fields.lookup(x, 0)?;
    Ok(biome_fields.terrain.sample(x, 0) * biome.world_height_multiplier
        + f64::from(height_addition))
}
