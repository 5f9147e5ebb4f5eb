//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` = one frame)
//! - Injected, seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, first_hit, overlaps};
pub use spawn::{SpawnPattern, maybe_spawn, spawn_pattern};
pub use state::{Character, GameEvent, GameState, Obstacle, Pose, RUN_CYCLE};
pub use tick::{TickInput, tick};
