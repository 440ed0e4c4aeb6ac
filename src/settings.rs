//! Boot-time configuration
//!
//! Read once from `brick_breaker.json` in the working directory. Missing
//! fields fall back to their defaults; a missing or malformed file yields the
//! defaults outright.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{SPAWN_BATCH, SPAWN_INTERVAL_SECS, STARTING_LIVES};

/// Window setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            title: "Brick Breaker".to_string(),
        }
    }
}

/// GLSL source locations, relative to the working directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderSettings {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl Default for ShaderSettings {
    fn default() -> Self {
        Self {
            vertex: PathBuf::from("Sample_GL.vert"),
            fragment: PathBuf::from("Sample_GL.frag"),
        }
    }
}

/// Brick spawner cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    /// Seconds between batches
    pub interval_secs: f64,
    /// Bricks per batch
    pub batch_size: u32,
    /// Fixed RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            interval_secs: SPAWN_INTERVAL_SECS,
            batch_size: SPAWN_BATCH,
            seed: None,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub shaders: ShaderSettings,
    pub spawn: SpawnSettings,
    pub starting_lives: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            shaders: ShaderSettings::default(),
            spawn: SpawnSettings::default(),
            starting_lives: STARTING_LIVES,
        }
    }
}

impl Settings {
    /// Config file looked up in the working directory
    pub const FILE_NAME: &'static str = "brick_breaker.json";

    /// Load from the working directory
    pub fn load() -> Self {
        Self::load_from(Path::new(Self::FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("Using default settings");
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        if settings.spawn.interval_secs <= 0.0 || !settings.spawn.interval_secs.is_finite() {
            log::warn!("spawn.interval_secs must be positive; using default");
            settings.spawn.interval_secs = SPAWN_INTERVAL_SECS;
        }
        if settings.starting_lives == 0 {
            log::warn!("starting_lives must be at least 1; using default");
            settings.starting_lives = STARTING_LIVES;
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.window.width, 600);
        assert_eq!(s.window.title, "Brick Breaker");
        assert_eq!(s.shaders.vertex, PathBuf::from("Sample_GL.vert"));
        assert_eq!(s.spawn.batch_size, 3);
        assert_eq!(s.spawn.seed, None);
        assert_eq!(s.starting_lives, 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "spawn": { "seed": 42 } }"#).unwrap();
        assert_eq!(s.spawn.seed, Some(42));
        assert_eq!(s.spawn.interval_secs, 1.5);
        assert_eq!(s.window, WindowSettings::default());
    }

    #[test]
    fn test_nonsense_values_replaced() {
        let s = Settings::from_json(r#"{ "spawn": { "interval_secs": -1.0 }, "starting_lives": 0 }"#)
            .unwrap();
        assert_eq!(s.spawn.interval_secs, 1.5);
        assert_eq!(s.starting_lives, 5);
    }

    #[test]
    fn test_malformed_file_yields_defaults() {
        assert!(Settings::from_json("{ not json").is_err());
        let missing = Settings::load_from(Path::new("no/such/brick_breaker.json"));
        assert_eq!(missing, Settings::default());
    }
}
