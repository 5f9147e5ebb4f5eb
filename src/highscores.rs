//! High score leaderboard system
//!
//! Persisted to a JSON file, tracks the top 5 scores.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::clamp_name;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Player's name (at most 10 characters)
    pub name: String,
    /// Satellites passed
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(name: &str, score: u32) -> Self {
        Self {
            name: clamp_name(name),
            score,
        }
    }
}

/// High score leaderboard, best first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would make it onto the board
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Ties go below existing entries
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Append a score, re-rank and trim.
    /// Returns the rank achieved (1-indexed) or None if it fell off the board.
    pub fn insert(&mut self, name: &str, score: u32) -> Option<usize> {
        self.entries.push(ScoreEntry::new(name, score));
        let new_index = self.entries.len() - 1;

        // Stable sort keeps earlier submissions ahead on ties, and the new
        // entry is last among its equals
        let mut ranked: Vec<(usize, ScoreEntry)> = self.entries.drain(..).enumerate().collect();
        ranked.sort_by(|a, b| b.1.score.cmp(&a.1.score));
        let rank = ranked.iter().position(|(i, _)| *i == new_index);
        self.entries = ranked.into_iter().map(|(_, e)| e).collect();

        self.entries.truncate(MAX_HIGH_SCORES);
        rank.filter(|r| *r < MAX_HIGH_SCORES).map(|r| r + 1)
    }

    /// Sort and trim data that came from outside
    fn normalize(&mut self) {
        for entry in &mut self.entries {
            entry.name = clamp_name(&entry.name);
        }
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}

/// File-backed leaderboard storage
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    /// Default file name inside the data directory
    pub const FILE_NAME: &'static str = "scores.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the leaderboard, or an empty one if the file is missing or bad
    pub fn load(&self) -> Leaderboard {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No high scores at {} ({}), starting fresh", self.path.display(), e);
                return Leaderboard::new();
            }
        };

        match serde_json::from_str::<Leaderboard>(&json) {
            Ok(mut scores) => {
                scores.normalize();
                log::info!("Loaded {} high scores", scores.len());
                scores
            }
            Err(e) => {
                log::warn!("Ignoring malformed high score file {}: {}", self.path.display(), e);
                Leaderboard::new()
            }
        }
    }

    /// Overwrite the file with `scores`
    pub fn save(&self, scores: &Leaderboard) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(scores)?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing {}", self.path.display()))?;
        log::info!("High scores saved ({} entries)", scores.len());
        Ok(())
    }

    /// Load, insert, save. Returns the updated board and the rank achieved.
    pub fn add(&self, name: &str, score: u32) -> anyhow::Result<(Leaderboard, Option<usize>)> {
        let mut scores = self.load();
        let rank = scores.insert(name, score);
        self.save(&scores)?;
        Ok((scores, rank))
    }
}
