//! Runtime configuration read from the environment.

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};

use crate::core::{Level, LevelPack};
use crate::input::DEFAULT_KEY_RELEASE_TIMEOUT_MS;
use crate::term::DisplayConfig;
use crate::types::{FRAME_MS, MAX_SURFACE_HEIGHT, MAX_SURFACE_WIDTH};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// JSON level pack replacing the built-in levels.
    pub levels_path: Option<PathBuf>,
    pub frame_ms: u64,
    /// Release timeout for terminals that never report key releases.
    pub key_release_ms: u64,
    pub max_width: u32,
    pub max_height: u32,
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            levels_path: None,
            frame_ms: FRAME_MS,
            key_release_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            max_width: MAX_SURFACE_WIDTH,
            max_height: MAX_SURFACE_HEIGHT,
            log_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable lookup. Unset or unparsable values keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let path = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
        };

        Self {
            levels_path: path("PLATFORMER_LEVELS"),
            frame_ms: lookup("PLATFORMER_FRAME_MS")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|&ms| ms > 0)
                .unwrap_or(defaults.frame_ms),
            key_release_ms: lookup("PLATFORMER_KEY_RELEASE_MS")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(defaults.key_release_ms),
            max_width: lookup("PLATFORMER_MAX_WIDTH")
                .and_then(|s| s.trim().parse::<u32>().ok())
                .filter(|&px| px > 0)
                .unwrap_or(defaults.max_width),
            max_height: lookup("PLATFORMER_MAX_HEIGHT")
                .and_then(|s| s.trim().parse::<u32>().ok())
                .filter(|&px| px > 0)
                .unwrap_or(defaults.max_height),
            log_path: path("PLATFORMER_LOG_PATH"),
        }
    }

    pub fn display_config(&self) -> DisplayConfig {
        DisplayConfig {
            max_width: self.max_width,
            max_height: self.max_height,
            ..DisplayConfig::default()
        }
    }

    /// Parse every level up front, from the configured pack or the built-ins.
    pub fn load_levels(&self) -> Result<Vec<Rc<Level>>> {
        let pack = match &self.levels_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("read level pack {}", path.display()))?;
                LevelPack::from_json(&json)
                    .with_context(|| format!("decode level pack {}", path.display()))?
            }
            None => LevelPack::builtin(),
        };
        let levels = pack
            .parse_levels()
            .map_err(|(index, err)| anyhow::anyhow!("level {}: {err}", index + 1))?;
        anyhow::ensure!(!levels.is_empty(), "level pack has no levels");
        Ok(levels)
    }
}
