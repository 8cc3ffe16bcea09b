//! ASCII rendering of a world window.

use loam_world::World;
use loam_worldgen::MaterialKind;

/// Character used for a material.
pub const fn glyph(kind: MaterialKind) -> char {
    match kind {
        MaterialKind::Grass => '"',
        MaterialKind::Dirt => '%',
        MaterialKind::Stone => '#',
        MaterialKind::Sand => ':',
        MaterialKind::Snow => '*',
        MaterialKind::TallGrass | MaterialKind::DeadGrass => ',',
        MaterialKind::OakLog | MaterialKind::BirchLog => '|',
        MaterialKind::OakLeaf | MaterialKind::BirchLeaf => '@',
        MaterialKind::Coal => 'c',
        MaterialKind::Iron => 'i',
        MaterialKind::Gold => 'g',
        MaterialKind::Diamond => 'd',
    }
}

/// Renders columns `x0..=x1` and rows `y0..=y1`, top row first.
///
/// Empty cells are spaces. Every line has the same width.
pub fn render(world: &World, x0: i32, x1: i32, y0: i32, y1: i32) -> String {
    let mut out = String::new();
    for y in (y0..=y1).rev() {
        let line: String = (x0..=x1)
            .map(|x| world.tile(x, y).map_or(' ', |t| glyph(t.kind)))
            .collect();
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Renders a window centered on the spawn surface.
pub fn render_around_spawn(world: &World, half_width: i32, rows: i32) -> String {
    let spawn = world.spawn_point();
    let cx = spawn.x as i32;
    let cy = world.surface(cx).unwrap_or(0);
    render(world, cx - half_width, cx + half_width, cy - rows, cy + rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loam_world::generate;
    use loam_worldgen::{Biome, WorldConfig};

    fn world() -> World {
        let config = WorldConfig {
            world_size: 48,
            chunk_size: 16,
            generate_caves: false,
            ..WorldConfig::single_biome(Biome::grassland())
        }
        .with_seed(3.0);
        generate(config).expect("valid config")
    }

    #[test]
    fn test_render_dimensions() {
        let world = world();
        let text = render(&world, 0, 9, 0, 4);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.chars().count() == 10));
    }

    #[test]
    fn test_render_shows_surface() {
        let world = world();
        let x = 20;
        let surface = world.surface(x).expect("column in range");
        let text = render(&world, x, x, surface, surface);
        assert_eq!(text, "\"\n");
    }

    #[test]
    fn test_top_row_comes_first() {
        let world = world();
        let text = render(&world, 5, 5, -1, 0);
        let lines: Vec<_> = text.lines().collect();
        // row 0 holds terrain, row -1 is outside the world
        assert_ne!(lines[0], " ");
        assert_eq!(lines[1], " ");
    }

    #[test]
    fn test_glyphs_are_distinct_for_ores() {
        let ores = [MaterialKind::Coal, MaterialKind::Iron, MaterialKind::Gold, MaterialKind::Diamond];
        for (i, a) in ores.iter().enumerate() {
            for b in &ores[i + 1..] {
                assert_ne!(glyph(*a), glyph(*b));
            }
        }
    }
}
