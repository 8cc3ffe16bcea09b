//! Headless tick loop driving a world.

use loam_world::World;
use tracing::{debug, info};

use crate::config::{EditAction, EngineConfig, ScriptedEdit};

/// Counters of a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Ticks run
    pub ticks: u32,
    /// Chunk visibility toggles
    pub visibility_changes: usize,
    /// Edits that changed the world
    pub edits_applied: usize,
    /// Edits rejected by the store
    pub edits_rejected: usize,
}

/// Viewer moving across the world one tick at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    /// Current column
    pub x: f64,
    /// Columns moved per tick
    pub speed: f64,
    /// Visibility radius
    pub radius: f64,
}

impl Viewer {
    /// Advances one tick, reversing direction at the world edges.
    pub fn step(&mut self, world_size: i32) {
        let max = f64::from(world_size);
        self.x += self.speed;
        if self.x < 0.0 || self.x > max {
            self.speed = -self.speed;
            self.x = self.x.clamp(0.0, max);
        }
    }
}

/// Applies one scripted edit. Returns whether the world changed.
pub fn apply_edit(world: &mut World, edit: &ScriptedEdit) -> bool {
    match edit.action {
        EditAction::Break => world.break_block(edit.x, edit.y),
        EditAction::Place { kind } => world.place_block(kind, edit.x, edit.y),
    }
}

/// Runs `config.session.ticks` ticks against `world`.
pub fn run(world: &mut World, config: &EngineConfig) -> SessionSummary {
    let mut viewer = Viewer {
        x: config.viewer.start_x.unwrap_or(world.spawn_point().x),
        speed: config.viewer.speed,
        radius: config.viewer.radius,
    };
    let mut summary = SessionSummary::default();
    let size = world.size();

    for tick in 0..config.session.ticks {
        viewer.step(size);
        let changed = world.refresh_visibility(viewer.x, viewer.radius);
        if !changed.is_empty() {
            debug!("Tick {tick}: viewer at {:.1}, {} chunk(s) toggled", viewer.x, changed.len());
        }
        summary.visibility_changes += changed.len();

        for edit in config.edits.iter().filter(|e| e.tick == tick) {
            let applied = apply_edit(world, edit);
            info!(
                "Tick {tick}: {:?} at ({}, {}) -> {}",
                edit.action,
                edit.x,
                edit.y,
                if applied { "applied" } else { "rejected" }
            );
            if applied {
                summary.edits_applied += 1;
            } else {
                summary.edits_rejected += 1;
            }
        }
        summary.ticks += 1;
    }

    summary
}
