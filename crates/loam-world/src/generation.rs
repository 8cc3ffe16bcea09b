//! The world generation pass.
//!
//! Generation runs in two left-to-right passes over the columns. The first
//! places terrain rows through the layer resolver, the second decorates the
//! surface. Decoration only sees finished terrain, so its result does not
//! depend on column order.

use loam_common::{ConfigError, LoamError, WorldError};
use loam_worldgen::{
    Decoration, HeightProfile, MaterialLayerResolver, VegetationDecorator, WorldConfig,
    WorldFields, RANDOM_SEED_MAX, RANDOM_SEED_MIN,
};
use tracing::{debug, info, warn};

use crate::chunk::ChunkIndex;
use crate::tile::TileStore;
use crate::world::{GenerationReport, World};

/// Salt separating the decoration stream from the variant stream.
const DECORATION_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Builds worlds from a validated configuration.
#[derive(Debug, Clone)]
pub struct WorldGenerator {
    /// Validated configuration
    config: WorldConfig,
    /// Seed used by the next `generate`
    seed: f64,
}

impl WorldGenerator {
    /// Validates `config` and resolves its seed.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = resolve_seed(config.seed);
        info!(
            "World generator ready: seed={}, world_size={}, chunk_size={}",
            seed, config.world_size, config.chunk_size
        );
        Ok(Self { config, seed })
    }

    /// Replaces the configuration. The previous one is kept on failure.
    pub fn init(&mut self, config: WorldConfig) -> Result<(), ConfigError> {
        *self = Self::new(config)?;
        Ok(())
    }

    /// Redraws the seed for a fresh world. Fixed seeds are unchanged.
    pub fn reset(&mut self) {
        self.seed = resolve_seed(self.config.seed);
        info!("World generator reset: seed={}", self.seed);
    }

    /// Seed used by the next [`WorldGenerator::generate`].
    #[must_use]
    pub const fn seed(&self) -> f64 {
        self.seed
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Seed of the cosmetic variant stream.
    #[must_use]
    pub fn variant_seed(&self) -> u64 {
        self.config.variant_seed.unwrap_or_else(|| self.seed.to_bits())
    }

    /// Seed of the decoration stream.
    #[must_use]
    pub fn decoration_seed(&self) -> u64 {
        self.seed.to_bits() ^ DECORATION_SALT
    }

    /// Generates a complete world.
    pub fn generate(&self) -> Result<World, LoamError> {
        let config = &self.config;
        let seed = self.seed;
        let size = config.world_size;

        let unchunked_columns = size % config.chunk_size;
        if unchunked_columns != 0 {
            warn!(
                "chunk_size {} does not divide world_size {}: {} column(s) belong to no chunk",
                config.chunk_size, size, unchunked_columns
            );
        }

        let fields = WorldFields::build(config, seed)?;
        let heights =
            HeightProfile::build(&fields, size, config.height_addition, config.spawn_height_offset)
                .map_err(WorldError::from)?;
        debug!("Biome map and {} column heights ready", heights.len());

        let mut store = TileStore::new(
            size,
            config.chunk_size,
            config.catalog.clone(),
            self.variant_seed(),
        );
        let mut report = GenerationReport {
            unchunked_columns,
            ..GenerationReport::default()
        };

        let resolver = MaterialLayerResolver::new(&fields, config.generate_caves);
        for (x, height) in heights.iter() {
            let top = (height.floor() as i32).min(size + 1);
            for y in 0..top {
                match resolver.resolve(x, y, height).map_err(WorldError::from)? {
                    Some(kind) => {
                        if store.place(kind, x, y) {
                            report.terrain += 1;
                            if kind.is_ore() {
                                report.ores += 1;
                            }
                        }
                    },
                    None => report.carved += 1,
                }
            }
        }
        debug!(
            "Terrain pass: {} tiles, {} ore, {} carved",
            report.terrain, report.ores, report.carved
        );

        let mut decorator = VegetationDecorator::new(self.decoration_seed());
        for (x, _) in heights.iter() {
            let Some(surface) = heights.surface(x).filter(|&s| (0..=size).contains(&s)) else {
                continue;
            };
            let biome = fields.biome_at(x, surface).map_err(WorldError::from)?;
            match decorator.decorate_column(&mut store, biome, x, surface) {
                Decoration::Tree { .. } => report.trees += 1,
                Decoration::GroundCover(_) => report.ground_cover += 1,
                Decoration::None => {},
            }
        }
        debug!(
            "Decoration pass: {} trees, {} ground cover",
            report.trees, report.ground_cover
        );

        let chunks = ChunkIndex::from_store(&store);
        let spawn = heights.spawn();
        info!(
            "Generated world: seed={}, {} tiles in {} chunks, spawn=({:.1}, {:.1})",
            seed,
            store.len(),
            chunks.len(),
            spawn.x,
            spawn.y
        );

        Ok(World {
            config: WorldConfig {
                seed: Some(seed),
                ..config.clone()
            },
            seed,
            fields,
            heights,
            store,
            chunks,
            report,
        })
    }
}

/// Validates `config`, resolves its seed, and generates a world.
pub fn generate(config: WorldConfig) -> Result<World, LoamError> {
    WorldGenerator::new(config)?.generate()
}

/// Uses `seed` or draws an integer seed from `[RANDOM_SEED_MIN, RANDOM_SEED_MAX)`.
fn resolve_seed(seed: Option<f64>) -> f64 {
    seed.unwrap_or_else(|| f64::from(fastrand::i32(RANDOM_SEED_MIN..RANDOM_SEED_MAX)))
}
