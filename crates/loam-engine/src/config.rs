//! Engine configuration.
//!
//! Holds the world parameters, the simulated viewer, the session length, and
//! a scripted list of edits. Configuration can be loaded from and saved to a
//! TOML file.

use loam_common::{LoamError, LoamResult};
use loam_worldgen::{MaterialKind, WorldConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
const CONFIG_FILE: &str = "loam.toml";

/// Environment variable overriding the configuration path.
pub const CONFIG_ENV: &str = "LOAM_CONFIG";

/// Simulated viewer that drives visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Starting column (None = spawn point)
    pub start_x: Option<f64>,
    /// Columns moved per tick
    pub speed: f64,
    /// Visibility radius handed to the chunk index
    pub radius: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            start_x: None,
            speed: 1.5,
            radius: 10.0,
        }
    }
}

/// Session length and output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of ticks to run
    pub ticks: u32,
    /// Print an ASCII preview around the spawn point
    pub preview: bool,
    /// Preview half-width in columns
    pub preview_radius: i32,
    /// Preview rows above and below the spawn surface
    pub preview_rows: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ticks: 120,
            preview: true,
            preview_radius: 40,
            preview_rows: 16,
        }
    }
}

/// Edit applied during a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditAction {
    /// Remove a block
    Break,
    /// Place a block of the given kind
    Place {
        /// Material to place
        kind: MaterialKind,
    },
}

/// Scripted edit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEdit {
    /// Tick on which the edit is applied
    pub tick: u32,
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
    /// What to do
    #[serde(flatten)]
    pub action: EditAction,
}

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World generation parameters
    pub world: WorldConfig,
    /// Viewer
    pub viewer: ViewerConfig,
    /// Session
    pub session: SessionConfig,
    /// Scripted edits
    pub edits: Vec<ScriptedEdit>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            viewer: ViewerConfig::default(),
            session: SessionConfig::default(),
            edits: vec![
                ScriptedEdit {
                    tick: 10,
                    x: 0,
                    y: 5,
                    action: EditAction::Break,
                },
                ScriptedEdit {
                    tick: 20,
                    x: 100,
                    y: 60,
                    action: EditAction::Place {
                        kind: MaterialKind::Stone,
                    },
                },
            ],
        }
    }
}

impl EngineConfig {
    /// Loads configuration from `path`, falling back to defaults.
    ///
    /// A missing file is expected on first run; unreadable or malformed
    /// files are logged and replaced by defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!(
                "No engine config at {} (set {CONFIG_ENV} to override), using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::read(path) {
            Ok(config) => {
                info!("Loaded engine config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("Ignoring engine config {}: {e}", path.display());
                Self::default()
            },
        }
    }

    /// Reads and parses `path`.
    pub fn read<P: AsRef<Path>>(path: P) -> LoamResult<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| LoamError::Serialization(e.to_string()))
    }

    /// Writes configuration to `path`, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> LoamResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| LoamError::Serialization(e.to_string()))?;
        fs::write(path, contents)?;

        info!("Saved engine config to {}", path.display());
        Ok(())
    }

    /// Configuration file path: `LOAM_CONFIG` if set, else `loam.toml`.
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV).map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from)
    }

    /// Clamp session values to sensible ranges.
    pub fn sanitize(&mut self) {
        self.viewer.radius = self.viewer.radius.clamp(0.0, 1_000.0);
        self.session.preview_radius = self.session.preview_radius.clamp(1, 200);
        self.session.preview_rows = self.session.preview_rows.clamp(1, 100);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.world.world_size, 200);
        assert_eq!(config.session.ticks, 120);
        assert_eq!(config.edits.len(), 2);
        assert!(config.viewer.start_x.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("nested").join("loam.toml");

        let mut config = EngineConfig::default();
        config.world.seed = Some(1234.0);
        config.world.generate_caves = false;
        config.viewer.speed = -2.0;
        config.save_to(&path).expect("save");

        let loaded = EngineConfig::load_from(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let loaded = EngineConfig::load_from(dir.path().join("absent.toml"));
        assert_eq!(loaded, EngineConfig::default());
    }

    #[test]
    fn test_read_reports_failures() {
        let dir = TempDir::new().expect("tempdir");
        let missing = EngineConfig::read(dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(LoamError::Io(_))));

        let path = dir.path().join("broken.toml");
        fs::write(&path, "[session]\nticks = \"many\"").expect("write");
        assert!(matches!(EngineConfig::read(&path), Err(LoamError::Serialization(_))));
    }

    #[test]
    fn test_save_into_file_path_fails() {
        let dir = TempDir::new().expect("tempdir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").expect("write");
        let result = EngineConfig::default().save_to(blocker.join("loam.toml"));
        assert!(matches!(result, Err(LoamError::Io(_))));
    }

    #[test]
    fn test_invalid_file_uses_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("broken.toml");
        fs::write(&path, "world = [[[").expect("write");
        assert_eq!(EngineConfig::load_from(&path), EngineConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("partial.toml");
        fs::write(
            &path,
            r#"
edits = [
    { tick = 3, x = 40, y = 30, action = "break" },
    { tick = 4, x = 41, y = 30, action = "place", kind = "oak_log" },
]

[world]
seed = -50.0
world_size = 96

[session]
ticks = 5
"#,
        )
        .expect("write");

        let loaded = EngineConfig::load_from(&path);
        assert_eq!(loaded.world.seed, Some(-50.0));
        assert_eq!(loaded.world.world_size, 96);
        assert_eq!(loaded.world.chunk_size, 16);
        assert_eq!(loaded.session.ticks, 5);
        assert!(loaded.session.preview);
        assert_eq!(loaded.edits[0].action, EditAction::Break);
        assert_eq!(
            loaded.edits[1].action,
            EditAction::Place {
                kind: MaterialKind::OakLog
            }
        );
    }

    #[test]
    fn test_sanitize_clamps() {
        let mut config = EngineConfig::default();
        config.viewer.radius = -5.0;
        config.session.preview_radius = 0;
        config.sanitize();
        assert!(config.viewer.radius.abs() < f64::EPSILON);
        assert_eq!(config.session.preview_radius, 1);
    }
}
