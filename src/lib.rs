//! Astro Jump - a side-scrolling astronaut jumping game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `ui`: Screen state machine, menu buttons and name entry
//! - `renderer`: Scene drawing against a `platform::Surface`
//! - `platform`: Input/draw/pacing surface and the terminal back end
//! - `highscores`: Persisted top-5 leaderboard
//! - `settings`: Optional JSON configuration
//! - `app`: Frame loop tying everything together

pub mod app;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use app::App;
pub use highscores::{Leaderboard, ScoreEntry, ScoreStore};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical frame size
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 400.0;
    /// Height of the ground strip at the bottom of the frame
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Default ticks per second
    pub const FPS: u32 = 60;

    /// Astronaut defaults (units are frame pixels and ticks)
    pub const CHARACTER_X: f32 = 50.0;
    pub const CHARACTER_WIDTH: f32 = 40.0;
    pub const CHARACTER_HEIGHT: f32 = 60.0;
    pub const GRAVITY: f32 = 0.7;
    pub const JUMP_POWER: f32 = 12.0;

    /// Satellite defaults
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;
    pub const OBSTACLE_SPEED: f32 = 8.0;

    /// Per-tick chance of a spawn once the gap allows one
    pub const SPAWN_CHANCE: f64 = 0.03;
    /// Chance that a spawn is a pair
    pub const PAIR_CHANCE: f64 = 0.3;
    /// Horizontal offset of the second satellite in a pair
    pub const PAIR_OFFSET: f32 = 50.0;
    /// Inclusive range of the random gap required after the last spawn
    pub const SPAWN_GAP_MIN: u32 = 200;
    pub const SPAWN_GAP_MAX: u32 = 400;

    /// Longest accepted player name, in characters
    pub const MAX_NAME_LEN: usize = 10;
}

/// Y coordinate where an entity of the given height stands on the ground
#[inline]
pub fn ground_line(height: f32) -> f32 {
    consts::SCREEN_HEIGHT - consts::GROUND_HEIGHT - height
}

/// Truncate a name to at most `MAX_NAME_LEN` characters
pub fn clamp_name(name: &str) -> String {
    name.chars().take(consts::MAX_NAME_LEN).collect()
}
