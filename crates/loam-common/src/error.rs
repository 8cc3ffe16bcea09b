//! Error types for Loam.

use thiserror::Error;

/// Top-level error type for Loam operations.
#[derive(Debug, Error)]
pub enum LoamError {
    /// Invalid world configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// World generation or query errors
    #[error("World error: {0}")]
    World(#[from] WorldError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejected world configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// World size must be positive
    #[error("world_size must be > 0, got {0}")]
    InvalidWorldSize(i32),

    /// Chunk size must be positive
    #[error("chunk_size must be > 0, got {0}")]
    InvalidChunkSize(i32),

    /// At least one biome is required
    #[error("no biomes configured")]
    NoBiomes,

    /// Two biomes share a name
    #[error("duplicate biome name: {0}")]
    DuplicateBiome(String),

    /// A gradient stop or fallback names a biome that does not exist
    #[error("unknown biome referenced: {0}")]
    UnknownBiome(String),

    /// The biome gradient has no stops
    #[error("biome gradient is empty")]
    EmptyGradient,

    /// A numeric parameter is outside its allowed range
    #[error("{field} out of range: {value}")]
    OutOfRange {
        /// Offending parameter
        field: String,
        /// Value found
        value: f64,
    },

    /// Tree height range is inverted
    #[error("{biome}: tree height range {min}..{max} is empty")]
    InvalidTreeHeight {
        /// Biome name
        biome: String,
        /// Minimum height
        min: u32,
        /// Maximum height (exclusive)
        max: u32,
    },
}

impl ConfigError {
    /// Shorthand for [`ConfigError::OutOfRange`].
    #[must_use]
    pub fn out_of_range(field: impl Into<String>, value: f64) -> Self {
        Self::OutOfRange {
            field: field.into(),
            value,
        }
    }
}

/// Failure to classify a cell into a biome.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BiomeLookupError {
    /// Coordinates outside the biome field
    #[error("({x}, {y}) is outside the biome map")]
    OutOfBounds {
        /// X coordinate
        x: i32,
        /// Y coordinate
        y: i32,
    },

    /// Noise value below the first gradient stop and no fallback configured
    #[error("no biome matches noise value {value} at ({x}, {y})")]
    Unmatched {
        /// X coordinate
        x: i32,
        /// Y coordinate
        y: i32,
        /// Biome noise value at the cell
        value: f64,
    },
}

/// World generation errors.
#[derive(Debug, Error)]
pub enum WorldError {
    /// A column or cell could not be assigned a biome
    #[error("biome lookup failed: {0}")]
    BiomeLookup(#[from] BiomeLookupError),
}

/// Result type alias for Loam operations.
pub type LoamResult<T> = Result<T, LoamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        let err: LoamError = ConfigError::InvalidChunkSize(0).into();
        assert!(matches!(err, LoamError::Config(ConfigError::InvalidChunkSize(0))));

        let lookup = BiomeLookupError::OutOfBounds { x: -1, y: 4 };
        let err: LoamError = WorldError::from(lookup).into();
        assert!(err.to_string().contains("(-1, 4)"));
    }

    #[test]
    fn test_out_of_range_message() {
        let err = ConfigError::out_of_range("ores[0].vein_size", 1.5);
        assert_eq!(err.to_string(), "ores[0].vein_size out of range: 1.5");
    }
}
