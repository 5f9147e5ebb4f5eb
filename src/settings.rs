//! Game settings and data locations
//!
//! Read from `settings.json` in the data directory. Every field is optional in
//! the file; anything missing falls back to the defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::consts::FPS;
use crate::highscores::ScoreStore;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ticks per second
    pub frame_rate: u32,
    /// Fixed spawn seed; a fresh one per run when unset
    pub seed: Option<u64>,
    /// Leaderboard location override
    pub scores_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_rate: FPS,
            seed: None,
            scores_file: None,
        }
    }
}

impl Settings {
    /// File name inside the data directory
    pub const FILE_NAME: &'static str = "settings.json";

    /// Frame rate clamped to something the terminal can keep up with
    pub fn effective_frame_rate(&self) -> u32 {
        self.frame_rate.clamp(1, 240)
    }

    /// Leaderboard path: the override, or `scores.json` in `data_dir`
    pub fn scores_path(&self, data_dir: &Path) -> PathBuf {
        self.scores_file
            .clone()
            .unwrap_or_else(|| data_dir.join(ScoreStore::FILE_NAME))
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        if let Ok(json) = fs::read_to_string(path) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings {}: {}", path.display(), e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

/// Per-user data directory, or the working directory if none can be resolved
pub fn data_dir() -> PathBuf {
    match ProjectDirs::from("com", "astrojump", "AstroJump") {
        Some(dirs) => dirs.data_local_dir().to_path_buf(),
        None => {
            log::warn!("Could not resolve a data directory, using the working directory");
            PathBuf::from(".")
        }
    }
}
