//! Satellite spawning
//!
//! A new spawn is only considered once the last satellite has travelled a
//! random gap of 200..=400 units from the right edge. After that each tick has
//! a small chance of producing a single satellite or a close pair.

use rand::Rng;

use super::state::Obstacle;
use crate::consts::*;

/// Shape of a spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPattern {
    Single,
    /// Two satellites `PAIR_OFFSET` apart
    Pair,
}

/// Whether the field has room for another spawn this tick.
///
/// Draws the gap from `rng` only when there is a previous satellite.
fn has_room<R: Rng + ?Sized>(obstacles: &[Obstacle], field_width: f32, rng: &mut R) -> bool {
    match obstacles.last() {
        None => true,
        Some(last) => {
            let gap = rng.random_range(SPAWN_GAP_MIN..=SPAWN_GAP_MAX) as f32;
            last.pos.x < field_width - gap
        }
    }
}

/// Run the spawn roll for one tick. Returns the pattern spawned, if any.
pub fn maybe_spawn<R: Rng + ?Sized>(
    obstacles: &mut Vec<Obstacle>,
    field_width: f32,
    rng: &mut R,
) -> Option<SpawnPattern> {
    if !has_room(obstacles, field_width, rng) {
        return None;
    }
    if rng.random::<f64>() >= SPAWN_CHANCE {
        return None;
    }

    let pattern = if rng.random::<f64>() < PAIR_CHANCE {
        SpawnPattern::Pair
    } else {
        SpawnPattern::Single
    };
    spawn_pattern(obstacles, pattern, field_width);
    Some(pattern)
}

/// Append the satellites for `pattern` at the right edge of the field
pub fn spawn_pattern(obstacles: &mut Vec<Obstacle>, pattern: SpawnPattern, field_width: f32) {
    obstacles.push(Obstacle::new(field_width));
    if pattern == SpawnPattern::Pair {
        obstacles.push(Obstacle::new(field_width + PAIR_OFFSET));
    }
}

impl SpawnPattern {
    /// Number of satellites this pattern creates
    pub fn count(self) -> usize {
        match self {
            SpawnPattern::Single => 1,
            SpawnPattern::Pair => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_pair_offset() {
        let mut obstacles = Vec::new();
        spawn_pattern(&mut obstacles, SpawnPattern::Pair, SCREEN_WIDTH);
        assert_eq!(obstacles.len(), 2);
        assert_eq!(obstacles[0].pos.x, SCREEN_WIDTH);
        assert_eq!(obstacles[1].pos.x, SCREEN_WIDTH + 50.0);
        assert_eq!(obstacles[0].pos.y, obstacles[1].pos.y);
    }

    #[test]
    fn test_single_at_right_edge() {
        let mut obstacles = Vec::new();
        spawn_pattern(&mut obstacles, SpawnPattern::Single, SCREEN_WIDTH);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].pos.x, SCREEN_WIDTH);
    }

    #[test]
    fn test_no_spawn_while_last_is_close() {
        let mut rng = Pcg32::seed_from_u64(7);
        // Closer to the edge than the smallest possible gap
        let mut obstacles = vec![Obstacle::new(SCREEN_WIDTH - (SPAWN_GAP_MIN as f32) + 1.0)];
        for _ in 0..10_000 {
            assert_eq!(maybe_spawn(&mut obstacles, SCREEN_WIDTH, &mut rng), None);
        }
        assert_eq!(obstacles.len(), 1);
    }

    #[test]
    fn test_always_room_past_largest_gap() {
        let mut rng = Pcg32::seed_from_u64(7);
        let obstacles = vec![Obstacle::new(SCREEN_WIDTH - SPAWN_GAP_MAX as f32 - 1.0)];
        for _ in 0..1000 {
            assert!(has_room(&obstacles, SCREEN_WIDTH, &mut rng));
        }
    }

    #[test]
    fn test_spawn_rates_roughly_match() {
        let mut rng = Pcg32::seed_from_u64(42);
        let (mut singles, mut pairs) = (0u32, 0u32);
        let trials = 200_000;
        for _ in 0..trials {
            let mut obstacles = Vec::new();
            match maybe_spawn(&mut obstacles, SCREEN_WIDTH, &mut rng) {
                Some(SpawnPattern::Single) => singles += 1,
                Some(SpawnPattern::Pair) => {
                    pairs += 1;
                    assert_eq!(obstacles[1].pos.x - obstacles[0].pos.x, PAIR_OFFSET);
                }
                None => assert!(obstacles.is_empty()),
            }
        }
        let spawn_rate = (singles + pairs) as f64 / trials as f64;
        let pair_rate = pairs as f64 / (singles + pairs) as f64;
        assert!((spawn_rate - SPAWN_CHANCE).abs() < 0.005, "spawn rate {spawn_rate}");
        assert!((pair_rate - PAIR_CHANCE).abs() < 0.03, "pair rate {pair_rate}");
    }
}
