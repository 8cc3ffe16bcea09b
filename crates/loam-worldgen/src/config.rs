//! World generation configuration.
//!
//! Loaded once before generation and treated as immutable for the session.

use loam_common::ConfigError;
use serde::{Deserialize, Serialize};

use crate::biome::{Biome, GradientStop};
use crate::material::MaterialCatalog;
use crate::ore::Ore;

/// Lower bound (inclusive) of randomly drawn seeds.
pub const RANDOM_SEED_MIN: i32 = -10_000;
/// Upper bound (exclusive) of randomly drawn seeds.
pub const RANDOM_SEED_MAX: i32 = 10_000;
/// Largest accepted world size. The biome map holds one cell per tile.
pub const MAX_WORLD_SIZE: i32 = 4096;

/// Parameters of one generated world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World seed (None = random)
    pub seed: Option<f64>,
    /// Columns and rows of the square world
    pub world_size: i32,
    /// Columns per visibility chunk
    pub chunk_size: i32,
    /// Constant added to every column height
    pub height_addition: i32,
    /// Spawn point height above the middle column's surface
    pub spawn_height_offset: f64,
    /// Hollow out caves with the cave solidity mask
    pub generate_caves: bool,
    /// Frequency of the biome noise
    pub biome_rarity: f64,
    /// Noise value → biome stops
    pub biome_gradient: Vec<GradientStop>,
    /// Biome for cells below the first gradient stop (None = lookup error)
    pub fallback_biome: Option<String>,
    /// Biome definitions
    pub biomes: Vec<Biome>,
    /// World ore list in priority order (later wins)
    pub ores: Vec<Ore>,
    /// Material attribute overrides
    pub catalog: MaterialCatalog,
    /// Seed of the cosmetic variant stream (None = derived from the world seed)
    pub variant_seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            world_size: 200,
            chunk_size: 16,
            height_addition: 25,
            spawn_height_offset: 25.0,
            generate_caves: true,
            biome_rarity: 0.004,
            biome_gradient: vec![
                GradientStop::new(0.0, "grassland"),
                GradientStop::new(0.55, "desert"),
                GradientStop::new(0.7, "tundra"),
            ],
            fallback_biome: None,
            biomes: vec![Biome::grassland(), Biome::desert(), Biome::tundra()],
            ores: Ore::defaults(),
            catalog: MaterialCatalog::default(),
            variant_seed: None,
        }
    }
}

impl WorldConfig {
    /// A world with one biome covering the whole gradient.
    #[must_use]
    pub fn single_biome(biome: Biome) -> Self {
        Self {
            biome_gradient: vec![GradientStop::new(0.0, biome.name.clone())],
            biomes: vec![biome],
            ..Self::default()
        }
    }

    /// Sets a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: f64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of whole chunks. Remainder columns belong to no chunk.
    #[must_use]
    pub fn chunk_count(&self) -> u32 {
        if self.chunk_size <= 0 || self.world_size <= 0 {
            return 0;
        }
        (self.world_size / self.chunk_size) as u32
    }

    /// Index of the biome named `name`.
    #[must_use]
    pub fn biome_index(&self, name: &str) -> Option<usize> {
        self.biomes.iter().position(|b| b.name == name)
    }

    /// Checks every invariant generation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_size <= 0 {
            return Err(ConfigError::InvalidWorldSize(self.world_size));
        }
        if self.world_size > MAX_WORLD_SIZE {
            return Err(ConfigError::out_of_range(
                "world_size",
                f64::from(self.world_size),
            ));
        }
        if self.chunk_size <= 0 {
            return Err(ConfigError::InvalidChunkSize(self.chunk_size));
        }
        if let Some(seed) = self.seed {
            if !seed.is_finite() {
                return Err(ConfigError::out_of_range("seed", seed));
            }
        }
        if !self.spawn_height_offset.is_finite() {
            return Err(ConfigError::out_of_range(
                "spawn_height_offset",
                self.spawn_height_offset,
            ));
        }
        check_frequency("biome_rarity", self.biome_rarity)?;

        if self.biomes.is_empty() {
            return Err(ConfigError::NoBiomes);
        }
        if self.biomes.len() > usize::from(u16::MAX) {
            return Err(ConfigError::out_of_range("biomes.len", self.biomes.len() as f64));
        }
        for (i, biome) in self.biomes.iter().enumerate() {
            if self.biomes[..i].iter().any(|b| b.name == biome.name) {
                return Err(ConfigError::DuplicateBiome(biome.name.clone()));
            }
            validate_biome(biome)?;
        }

        if self.biome_gradient.is_empty() {
            return Err(ConfigError::EmptyGradient);
        }
        for stop in &self.biome_gradient {
            if self.biome_index(&stop.biome).is_none() {
                return Err(ConfigError::UnknownBiome(stop.biome.clone()));
            }
            if !stop.position.is_finite() {
                return Err(ConfigError::out_of_range(
                    format!("biome_gradient[{}].position", stop.biome),
                    stop.position,
                ));
            }
        }
        if let Some(name) = &self.fallback_biome {
            if self.biome_index(name).is_none() {
                return Err(ConfigError::UnknownBiome(name.clone()));
            }
        }

        for (i, ore) in self.ores.iter().enumerate() {
            validate_ore(&format!("ores[{i}]"), ore)?;
        }
        Ok(())
    }
}

fn check_frequency(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(field, value))
    }
}

fn check_threshold(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(field, value))
    }
}

fn validate_ore(path: &str, ore: &Ore) -> Result<(), ConfigError> {
    check_frequency(&format!("{path}.rarity"), ore.rarity)?;
    check_threshold(&format!("{path}.vein_size"), ore.vein_size)
}

fn validate_biome(biome: &Biome) -> Result<(), ConfigError> {
    let name = &biome.name;
    check_frequency(&format!("{name}.terrain_frequency"), biome.terrain_frequency)?;
    check_frequency(&format!("{name}.cave_frequency"), biome.cave_frequency)?;
    check_threshold(
        &format!("{name}.terrain_sculpt_influence"),
        biome.terrain_sculpt_influence,
    )?;
    if !biome.world_height_multiplier.is_finite() {
        return Err(ConfigError::out_of_range(
            format!("{name}.world_height_multiplier"),
            biome.world_height_multiplier,
        ));
    }
    if biome.dirt_layer_height < 0 {
        return Err(ConfigError::out_of_range(
            format!("{name}.dirt_layer_height"),
            f64::from(biome.dirt_layer_height),
        ));
    }
    for (min, max) in [
        (biome.oak_tree_min_height, biome.oak_tree_max_height),
        (biome.birch_tree_min_height, biome.birch_tree_max_height),
    ] {
        if min > max {
            return Err(ConfigError::InvalidTreeHeight {
                biome: name.clone(),
                min,
                max,
            });
        }
    }
    for (i, ore) in biome.ores.iter().enumerate() {
        validate_ore(&format!("{name}.ores[{i}]"), ore)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = WorldConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.chunk_count(), 12);
        assert_eq!(config.ores.len(), 4);
    }

    #[test]
    fn test_rejects_non_positive_sizes() {
        let config = WorldConfig {
            world_size: 0,
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidWorldSize(0)));

        let config = WorldConfig {
            chunk_size: -4,
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidChunkSize(-4)));
        assert_eq!(config.chunk_count(), 0);
    }

    #[test]
    fn test_rejects_oversized_world() {
        let config = WorldConfig {
            world_size: 50_000,
            ..WorldConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::out_of_range("world_size", 50_000.0))
        );

        let config = WorldConfig {
            world_size: MAX_WORLD_SIZE,
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_uneven_chunk_size_truncates() {
        let config = WorldConfig {
            world_size: 100,
            chunk_size: 30,
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.chunk_count(), 3);
    }

    #[test]
    fn test_rejects_unknown_gradient_biome() {
        let mut config = WorldConfig::default();
        config.biome_gradient.push(GradientStop::new(0.9, "swamp"));
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownBiome("swamp".into()))
        );
    }

    #[test]
    fn test_rejects_unknown_fallback() {
        let config = WorldConfig {
            fallback_biome: Some("ocean".into()),
            ..WorldConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownBiome("ocean".into()))
        );
    }

    #[test]
    fn test_rejects_duplicate_biome() {
        let mut config = WorldConfig::default();
        config.biomes.push(Biome::desert());
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateBiome("desert".into()))
        );
    }

    #[test]
    fn test_rejects_empty_collections() {
        let config = WorldConfig {
            biomes: Vec::new(),
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoBiomes));

        let config = WorldConfig {
            biome_gradient: Vec::new(),
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyGradient));
    }

    #[test]
    fn test_rejects_bad_ore_threshold() {
        let mut config = WorldConfig::default();
        config.ores[2].vein_size = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { ref field, .. }) if field == "ores[2].vein_size"
        ));
    }

    #[test]
    fn test_rejects_inverted_tree_range() {
        let config = WorldConfig::single_biome(Biome {
            oak_tree_min_height: 12,
            oak_tree_max_height: 4,
            ..Biome::grassland()
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTreeHeight { min: 12, max: 4, .. })
        ));
    }

    #[test]
    fn test_single_biome_gradient() {
        let config = WorldConfig::single_biome(Biome::tundra()).with_seed(3.0);
        assert_eq!(config.seed, Some(3.0));
        assert_eq!(config.biome_gradient, vec![GradientStop::new(0.0, "tundra")]);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_toml_roundtrip_keeps_biomes() {
        let config = WorldConfig::default().with_seed(-42.5);
        let text = toml::to_string_pretty(&config).expect("serialize");
        let parsed: WorldConfig = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: WorldConfig = toml::from_str("world_size = 64\ngenerate_caves = false\n")
            .expect("parse");
        assert_eq!(parsed.world_size, 64);
        assert!(!parsed.generate_caves);
        assert_eq!(parsed.chunk_size, 16);
        assert_eq!(parsed.biomes.len(), 3);
    }
}
