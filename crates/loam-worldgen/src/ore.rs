//! Ore vein masks and the cave solidity mask.

use serde::{Deserialize, Serialize};

use crate::material::MaterialKind;
use crate::noise::NoiseField;

/// Configuration of one ore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ore {
    /// Display name
    pub name: String,
    /// Material placed where the ore occurs
    pub kind: MaterialKind,
    /// Noise frequency of the vein field
    pub rarity: f64,
    /// Mask threshold of the vein field (higher = sparser veins)
    pub vein_size: f64,
    /// Minimum depth below the surface, exclusive
    pub max_spawn_height: i32,
}

impl Ore {
    /// Creates an ore definition.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: MaterialKind,
        rarity: f64,
        vein_size: f64,
        max_spawn_height: i32,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            rarity,
            vein_size,
            max_spawn_height,
        }
    }

    /// Default coal.
    #[must_use]
    pub fn coal() -> Self {
        Self::new("coal", MaterialKind::Coal, 0.2, 0.78, 10)
    }

    /// Default iron.
    #[must_use]
    pub fn iron() -> Self {
        Self::new("iron", MaterialKind::Iron, 0.18, 0.8, 15)
    }

    /// Default gold.
    #[must_use]
    pub fn gold() -> Self {
        Self::new("gold", MaterialKind::Gold, 0.16, 0.84, 20)
    }

    /// Default diamond.
    #[must_use]
    pub fn diamond() -> Self {
        Self::new("diamond", MaterialKind::Diamond, 0.14, 0.88, 22)
    }

    /// The four built-in ores in priority order (later wins).
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![Self::coal(), Self::iron(), Self::gold(), Self::diamond()]
    }
}

/// An ore together with its vein mask.
#[derive(Debug, Clone, PartialEq)]
pub struct OreField {
    ore: Ore,
    field: NoiseField,
}

impl OreField {
    /// Builds the vein mask of `ore` for a world seed.
    #[must_use]
    pub fn new(seed: f64, ore: Ore) -> Self {
        let field = NoiseField::with_threshold(seed, ore.rarity, ore.vein_size);
        Self { ore, field }
    }

    /// The ore definition.
    #[must_use]
    pub fn ore(&self) -> &Ore {
        &self.ore
    }

    /// Vein mask at `(x, y)`.
    #[must_use]
    pub fn mask(&self, x: i32, y: i32) -> bool {
        self.field.mask(x, y)
    }

    /// Whether the ore may replace stone at `(x, y)` in a column of `height`.
    ///
    /// Requires the vein mask and a depth strictly greater than
    /// `max_spawn_height`.
    #[must_use]
    pub fn permits(&self, x: i32, y: i32, height: f64) -> bool {
        height - f64::from(y) > f64::from(self.ore.max_spawn_height) && self.mask(x, y)
    }
}

/// Ordered set of ore fields. Later entries take precedence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OreFieldSet {
    fields: Vec<OreField>,
}

impl OreFieldSet {
    /// Builds one field per ore, keeping the given priority order.
    #[must_use]
    pub fn new(seed: f64, ores: &[Ore]) -> Self {
        Self {
            fields: ores.iter().cloned().map(|ore| OreField::new(seed, ore)).collect(),
        }
    }

    /// Fields in priority order.
    #[must_use]
    pub fn fields(&self) -> &[OreField] {
        &self.fields
    }

    /// Ore kind at `(x, y)`, last match wins. `None` leaves the base stone.
    #[must_use]
    pub fn ore_at(&self, x: i32, y: i32, height: f64) -> Option<MaterialKind> {
        self.fields
            .iter()
            .rev()
            .find(|field| field.permits(x, y, height))
            .map(|field| field.ore.kind)
    }
}

/// Cave solidity mask.
///
/// `true` means a solid block is placed; `false` leaves the cell hollow.
/// This is not a void mask: the carved cells are the ones where the mask is
/// *false*.
#[derive(Debug, Clone, PartialEq)]
pub struct CaveMask {
    field: NoiseField,
}

impl CaveMask {
    /// Builds the mask from a cave frequency and the sculpt-influence threshold.
    #[must_use]
    pub fn new(seed: f64, cave_frequency: f64, terrain_sculpt_influence: f64) -> Self {
        Self {
            field: NoiseField::with_threshold(seed, cave_frequency, terrain_sculpt_influence),
        }
    }

    /// Whether `(x, y)` keeps its block.
    #[must_use]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.field.mask(x, y)
    }

    /// Underlying noise field.
    #[must_use]
    pub fn field(&self) -> &NoiseField {
        &self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(kind: MaterialKind, depth: i32) -> Ore {
        Ore::new(kind.name(), kind, 0.1, -1.0, depth)
    }

    fn never(kind: MaterialKind) -> Ore {
        Ore::new(kind.name(), kind, 0.1, 1.0, 0)
    }

    #[test]
    fn test_last_match_wins() {
        let set = OreFieldSet::new(
            12.0,
            &[
                always(MaterialKind::Coal, 0),
                always(MaterialKind::Iron, 0),
                never(MaterialKind::Gold),
            ],
        );
        assert_eq!(set.ore_at(5, 5, 40.0), Some(MaterialKind::Iron));
    }

    #[test]
    fn test_depth_gate_is_strict() {
        let set = OreFieldSet::new(12.0, &[always(MaterialKind::Diamond, 10)]);
        // height - y == 10 is not deep enough
        assert_eq!(set.ore_at(3, 20, 30.0), None);
        assert_eq!(set.ore_at(3, 19, 30.0), Some(MaterialKind::Diamond));
    }

    #[test]
    fn test_shallow_priority_falls_through() {
        // Diamond outranks coal but needs more depth
        let set = OreFieldSet::new(
            1.0,
            &[always(MaterialKind::Coal, 2), always(MaterialKind::Diamond, 20)],
        );
        assert_eq!(set.ore_at(0, 25, 30.0), Some(MaterialKind::Coal));
        assert_eq!(set.ore_at(0, 5, 30.0), Some(MaterialKind::Diamond));
    }

    #[test]
    fn test_empty_set_never_matches() {
        let set = OreFieldSet::new(1.0, &[]);
        assert_eq!(set.ore_at(0, 0, 100.0), None);
    }

    #[test]
    fn test_ore_field_uses_rarity_and_vein_size() {
        let field = OreField::new(77.0, Ore::gold());
        let reference = NoiseField::with_threshold(77.0, 0.16, 0.84);
        for x in 0..40 {
            for y in 0..40 {
                assert_eq!(field.mask(x, y), reference.mask(x, y));
            }
        }
    }

    #[test]
    fn test_cave_mask_polarity() {
        let mask = CaveMask::new(9.0, 0.05, 0.25);
        for x in 0..60 {
            for y in 0..60 {
                let sample = mask.field().sample(x, y);
                assert_eq!(mask.is_solid(x, y), sample > 0.25);
            }
        }
    }

    #[test]
    fn test_defaults_order() {
        let kinds: Vec<_> = Ore::defaults().into_iter().map(|o| o.kind).collect();
        assert_eq!(
            kinds,
            vec![MaterialKind::Coal, MaterialKind::Iron, MaterialKind::Gold, MaterialKind::Diamond]
        );
    }
}
