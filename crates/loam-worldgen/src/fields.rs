//! Noise fields of one world, built once per seed.

use loam_common::{BiomeLookupError, ConfigError};

use crate::biome::{Biome, BiomeGradient, BiomeMap};
use crate::config::WorldConfig;
use crate::noise::NoiseField;
use crate::ore::{CaveMask, Ore, OreFieldSet};

/// Fields owned by one biome.
#[derive(Debug, Clone, PartialEq)]
pub struct BiomeFields {
    /// Terrain height noise
    pub terrain: NoiseField,
    /// Cave solidity mask
    pub cave: CaveMask,
    /// Ore veins in priority order
    pub ores: OreFieldSet,
}

impl BiomeFields {
    /// Builds the fields of `biome`. `world_ores` is used when the biome has no ores of its own.
    #[must_use]
    pub fn new(seed: f64, biome: &Biome, world_ores: &[Ore]) -> Self {
        let ores = if biome.ores.is_empty() {
            world_ores
        } else {
            &biome.ores
        };
        Self {
            terrain: NoiseField::new(seed, biome.terrain_frequency),
            cave: CaveMask::new(seed, biome.cave_frequency, biome.terrain_sculpt_influence),
            ores: OreFieldSet::new(seed, ores),
        }
    }
}

/// Biome map plus the per-biome fields, immutable after construction.
#[derive(Debug, Clone)]
pub struct WorldFields {
    seed: f64,
    biome_map: BiomeMap,
    per_biome: Vec<BiomeFields>,
}

impl WorldFields {
    /// Builds every field of a world.
    ///
    /// Assumes `config` has been validated; an unknown gradient or fallback
    /// biome is still reported as [`ConfigError::UnknownBiome`].
    pub fn build(config: &WorldConfig, seed: f64) -> Result<Self, ConfigError> {
        let gradient = BiomeGradient::resolve(&config.biome_gradient, &config.biomes)
            .map_err(ConfigError::UnknownBiome)?;
        let fallback = match &config.fallback_biome {
            Some(name) => Some(
                config
                    .biome_index(name)
                    .ok_or_else(|| ConfigError::UnknownBiome(name.clone()))?,
            ),
            None => None,
        };

        let per_biome = config
            .biomes
            .iter()
            .map(|biome| BiomeFields::new(seed, biome, &config.ores))
            .collect();

        let rarity = NoiseField::new(seed, config.biome_rarity);
        let biome_map = BiomeMap::build(
            config.biomes.clone(),
            &gradient,
            &rarity,
            config.world_size,
            fallback,
        );

        Ok(Self {
            seed,
            biome_map,
            per_biome,
        })
    }

    /// Seed the fields were built with.
    #[must_use]
    pub const fn seed(&self) -> f64 {
        self.seed
    }

    /// The biome map.
    #[must_use]
    pub fn biome_map(&self) -> &BiomeMap {
        &self.biome_map
    }

    /// Biome at `(x, y)`.
    pub fn biome_at(&self, x: i32, y: i32) -> Result<&Biome, BiomeLookupError> {
        self.biome_map.biome_at(x, y)
    }

    /// Biome at `(x, y)` together with its fields.
    pub fn lookup(&self, x: i32, y: i32) -> Result<(&Biome, &BiomeFields), BiomeLookupError> {
        let index = self.biome_map.index_at(x, y)?;
        Ok((&self.biome_map.biomes()[index], &self.per_biome[index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::GradientStop;

    #[test]
    fn test_biome_ores_override_world_list() {
        let biome = Biome {
            ores: vec![Ore::diamond()],
            ..Biome::grassland()
        };
        let fields = BiomeFields::new(1.0, &biome, &Ore::defaults());
        assert_eq!(fields.ores.fields().len(), 1);

        let fields = BiomeFields::new(1.0, &Biome::grassland(), &Ore::defaults());
        assert_eq!(fields.ores.fields().len(), 4);
    }

    #[test]
    fn test_fields_follow_biome_parameters() {
        let fields = BiomeFields::new(5.0, &Biome::tundra(), &[]);
        assert_eq!(fields.terrain, NoiseField::new(5.0, 0.06));
        assert_eq!(fields.cave, CaveMask::new(5.0, 0.05, 0.25));
    }

    #[test]
    fn test_single_biome_lookup() {
        let config = WorldConfig {
            world_size: 32,
            ..WorldConfig::single_biome(Biome::desert())
        };
        let fields = WorldFields::build(&config, 12.0).expect("valid config");

        let (biome, biome_fields) = fields.lookup(10, 4).expect("in range");
        assert_eq!(biome.name, "desert");
        assert!((biome_fields.terrain.frequency() - 0.03).abs() < f64::EPSILON);
        assert_eq!(fields.biome_map().unmatched_count(), 0);
        assert!(fields.lookup(33, 0).is_err());
    }

    #[test]
    fn test_unknown_fallback_rejected() {
        let config = WorldConfig {
            fallback_biome: Some("swamp".into()),
            ..WorldConfig::default()
        };
        assert_eq!(
            WorldFields::build(&config, 0.0).err(),
            Some(ConfigError::UnknownBiome("swamp".into()))
        );
    }

    #[test]
    fn test_fallback_resolves_unmatched_cells() {
        let config = WorldConfig {
            world_size: 16,
            biome_gradient: vec![GradientStop::new(1.0, "desert")],
            fallback_biome: Some("tundra".into()),
            ..WorldConfig::default()
        };
        let fields = WorldFields::build(&config, 0.0).expect("valid config");
        assert_eq!(fields.biome_at(8, 8).map(|b| b.name.as_str()), Ok("tundra"));
    }
}
