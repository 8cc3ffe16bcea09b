//! Material resolution for a single cell.

use loam_common::BiomeLookupError;

use crate::biome::Biome;
use crate::fields::WorldFields;
use crate::material::MaterialKind;

/// Vertical band a row falls into within its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Deep rows, stone or ore
    Stone,
    /// Rows between the stone band and the surface
    Dirt,
    /// Topmost row
    Surface,
    /// At or above the column top
    Air,
}

impl Layer {
    /// Band of row `y` in a column whose integer top is `top`.
    ///
    /// Rows `0..top` are terrain: `y < top - dirt_layer_height` is stone,
    /// `y < top - 1` is dirt, and `top - 1` is the surface.
    #[must_use]
    pub const fn classify(y: i32, top: i32, dirt_layer_height: i32) -> Self {
        if y >= top {
            Self::Air
        } else if y < top - dirt_layer_height {
            Self::Stone
        } else if y < top - 1 {
            Self::Dirt
        } else {
            Self::Surface
        }
    }
}

/// Decides what, if anything, is placed at a cell during generation.
#[derive(Debug, Clone, Copy)]
pub struct MaterialLayerResolver<'a> {
    fields: &'a WorldFields,
    generate_caves: bool,
}

impl<'a> MaterialLayerResolver<'a> {
    /// Creates a resolver over the fields of one world.
    #[must_use]
    pub const fn new(fields: &'a WorldFields, generate_caves: bool) -> Self {
        Self {
            fields,
            generate_caves,
        }
    }

    /// Material of row `y` in column `x`, ignoring caves.
    ///
    /// Stone rows are replaced by the last ore whose vein mask is set and
    /// whose depth gate `height - y > max_spawn_height` passes.
    pub fn material(
        &self,
        x: i32,
        y: i32,
        height: f64,
    ) -> Result<Option<MaterialKind>, BiomeLookupError> {
        let (biome, fields) = self.fields.lookup(x, y)?;
        let top = height.floor() as i32;
        Ok(match Layer::classify(y, top, biome.dirt_layer_height) {
            Layer::Stone => Some(
                fields
                    .ores
                    .ore_at(x, y, height)
                    .unwrap_or(biome.materials.stone),
            ),
            Layer::Dirt => Some(biome.materials.dirt),
            Layer::Surface => Some(biome.materials.grass),
            Layer::Air => None,
        })
    }

    /// Material to place at `(x, y)`, or `None` for air and carved cave cells.
    pub fn resolve(
        &self,
        x: i32,
        y: i32,
        height: f64,
    ) -> Result<Option<MaterialKind>, BiomeLookupError> {
        let Some(kind) = self.material(x, y, height)? else {
            return Ok(None);
        };
        if self.generate_caves && !self.is_solid(x, y)? {
            return Ok(None);
        }
        Ok(Some(kind))
    }

    /// Cave solidity mask of the biome at `(x, y)`.
    pub fn is_solid(&self, x: i32, y: i32) -> Result<bool, BiomeLookupError> {
        let (_, fields) = self.fields.lookup(x, y)?;
        Ok(fields.cave.is_solid(x, y))
    }

    /// Biome at `(x, y)`.
    pub fn biome_at(&self, x: i32, y: i32) -> Result<&'a Biome, BiomeLookupError> {
        self.fields.biome_at(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::ore::{CaveMask, Ore};

    fn fields(config: &WorldConfig) -> WorldFields {
        WorldFields::build(config, 42.0).expect("valid config")
    }

    #[test]
    fn test_layer_bands() {
        // top 30, dirt 7: stone 0..23, dirt 23..29, surface 29
        assert_eq!(Layer::classify(0, 30, 7), Layer::Stone);
        assert_eq!(Layer::classify(22, 30, 7), Layer::Stone);
        assert_eq!(Layer::classify(23, 30, 7), Layer::Dirt);
        assert_eq!(Layer::classify(28, 30, 7), Layer::Dirt);
        assert_eq!(Layer::classify(29, 30, 7), Layer::Surface);
        assert_eq!(Layer::classify(30, 30, 7), Layer::Air);
    }

    #[test]
    fn test_zero_dirt_layer_keeps_surface() {
        assert_eq!(Layer::classify(28, 30, 0), Layer::Stone);
        assert_eq!(Layer::classify(29, 30, 0), Layer::Stone);
        assert_eq!(Layer::classify(29, 30, 1), Layer::Surface);
    }

    #[test]
    fn test_biome_materials_used() {
        let config = WorldConfig {
            world_size: 64,
            ores: Vec::new(),
            ..WorldConfig::single_biome(Biome::desert())
        };
        let fields = fields(&config);
        let resolver = MaterialLayerResolver::new(&fields, false);

        assert_eq!(resolver.material(5, 29, 30.5), Ok(Some(MaterialKind::Sand)));
        assert_eq!(resolver.material(5, 25, 30.5), Ok(Some(MaterialKind::Sand)));
        assert_eq!(resolver.material(5, 3, 30.5), Ok(Some(MaterialKind::Stone)));
        assert_eq!(resolver.material(5, 30, 30.5), Ok(None));
    }

    #[test]
    fn test_ore_replaces_stone_when_deep() {
        let config = WorldConfig {
            world_size: 64,
            ores: vec![Ore::new("everywhere", MaterialKind::Gold, 0.1, 0.0, 12)],
            ..WorldConfig::single_biome(Biome::grassland())
        };
        let fields = fields(&config);
        let resolver = MaterialLayerResolver::new(&fields, false);
        let vein = crate::noise::NoiseField::with_threshold(42.0, 0.1, 0.0);

        for y in 0..20 {
            let expected = if 30.0 - f64::from(y) > 12.0 && vein.mask(7, y) {
                MaterialKind::Gold
            } else {
                MaterialKind::Stone
            };
            assert_eq!(resolver.material(7, y, 30.0), Ok(Some(expected)), "row {y}");
        }
    }

    #[test]
    fn test_caves_follow_solidity_mask() {
        let config = WorldConfig {
            world_size: 64,
            ..WorldConfig::single_biome(Biome::grassland())
        };
        let fields = fields(&config);
        let with_caves = MaterialLayerResolver::new(&fields, true);
        let without = MaterialLayerResolver::new(&fields, false);
        let mask = CaveMask::new(42.0, 0.05, 0.25);

        for x in 0..64 {
            for y in 0..28 {
                let placed = with_caves.resolve(x, y, 28.9).expect("in range");
                assert_eq!(placed.is_some(), mask.is_solid(x, y), "cell ({x}, {y})");
                assert!(without.resolve(x, y, 28.9).expect("in range").is_some());
            }
        }
    }

    #[test]
    fn test_out_of_bounds_lookup_fails() {
        let config = WorldConfig {
            world_size: 8,
            ..WorldConfig::single_biome(Biome::grassland())
        };
        let fields = fields(&config);
        let resolver = MaterialLayerResolver::new(&fields, true);
        assert_eq!(
            resolver.resolve(9, 0, 5.0),
            Err(BiomeLookupError::OutOfBounds { x: 9, y: 0 })
        );
    }
}
