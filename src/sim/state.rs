//! Game state and core simulation types
//!
//! Everything one play session needs lives in `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;
use crate::ground_line;

/// Sprite pose of the astronaut (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Right,
    Still,
    Left,
    /// Take-off frame right after a jump
    Crouch,
    /// In the air
    Jump,
}

/// Grounded run animation, one frame every `RUN_FRAME_TICKS`
pub const RUN_CYCLE: [Pose; 4] = [Pose::Right, Pose::Still, Pose::Left, Pose::Still];

/// Ticks spent on each run frame
pub const RUN_FRAME_TICKS: u32 = 20;
/// Ticks spent crouched before switching to the jump pose
pub const CROUCH_TICKS: u32 = 10;

/// The player's astronaut
#[derive(Debug, Clone)]
pub struct Character {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    /// Vertical velocity (negative = up)
    pub vel_y: f32,
    pub airborne: bool,
    pub gravity: f32,
    pub jump_power: f32,
    pub size: Vec2,
    pub pose: Pose,
    run_frame: usize,
    anim_ticks: u32,
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

impl Character {
    /// Standing on the ground at the fixed horizontal offset
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(CHARACTER_X, ground_line(CHARACTER_HEIGHT)),
            vel_y: 0.0,
            airborne: false,
            gravity: GRAVITY,
            jump_power: JUMP_POWER,
            size: Vec2::new(CHARACTER_WIDTH, CHARACTER_HEIGHT),
            pose: RUN_CYCLE[0],
            run_frame: 0,
            anim_ticks: 0,
        }
    }

    /// Highest y the character may reach (standing on the ground)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        ground_line(self.size.y)
    }

    /// Start a jump. Ignored while already in the air.
    pub fn jump(&mut self) -> bool {
        if self.airborne {
            return false;
        }
        self.vel_y = -self.jump_power;
        self.airborne = true;
        self.pose = Pose::Crouch;
        self.anim_ticks = 0;
        true
    }

    /// Advance one tick
    pub fn update(&mut self) {
        if self.airborne {
            self.pos.y += self.vel_y;
            self.vel_y += self.gravity;

            self.anim_ticks += 1;
            if self.pose == Pose::Crouch && self.anim_ticks >= CROUCH_TICKS {
                self.pose = Pose::Jump;
            }

            let ground = self.ground_y();
            if self.pos.y >= ground {
                self.pos.y = ground;
                self.airborne = false;
                self.vel_y = 0.0;
                self.run_frame = 0;
                self.anim_ticks = 0;
                self.pose = RUN_CYCLE[0];
            }
        } else {
            self.anim_ticks += 1;
            if self.anim_ticks >= RUN_FRAME_TICKS {
                self.anim_ticks = 0;
                self.run_frame = (self.run_frame + 1) % RUN_CYCLE.len();
                self.pose = RUN_CYCLE[self.run_frame];
            }
        }
    }

    /// Index into `RUN_CYCLE` of the current run frame
    pub fn run_frame(&self) -> usize {
        self.run_frame
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A satellite scrolling in from the right
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec2,
    /// Units moved left per tick
    pub speed: f32,
    pub size: Vec2,
}

impl Obstacle {
    /// New satellite resting on the ground line at horizontal position `x`
    pub fn new(x: f32) -> Self {
        Self {
            pos: Vec2::new(x, ground_line(OBSTACLE_HEIGHT)),
            speed: OBSTACLE_SPEED,
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
        }
    }

    pub fn update(&mut self) {
        self.pos.x -= self.speed;
    }

    /// Right edge has crossed the left boundary
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    /// One or two satellites entered the field
    Spawned { count: usize },
    /// A satellite left the field and scored a point
    Passed,
    /// The astronaut hit a satellite; the run is over
    Collision,
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn RNG, seeded from `seed`
    pub rng: Pcg32,
    pub character: Character,
    /// Live satellites in spawn order (which is also x order)
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// Set once on the first collision, never cleared
    pub game_over: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            character: Character::new(),
            obstacles: Vec::new(),
            score: 0,
            game_over: false,
            time_ticks: 0,
            events: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_jump_ignored_while_airborne() {
        let mut c = Character::new();
        assert!(c.jump());
        let vel = c.vel_y;
        assert_eq!(vel, -JUMP_POWER);

        c.update();
        c.update();
        let (y, vel) = (c.pos.y, c.vel_y);
        for _ in 0..5 {
            assert!(!c.jump());
        }
        assert_eq!(c.pos.y, y);
        assert_eq!(c.vel_y, vel);
        assert!(c.airborne);
    }

    #[test]
    fn test_jump_arc_lands_on_ground() {
        let mut c = Character::new();
        let ground = c.ground_y();
        assert_eq!(ground, 290.0);
        c.jump();

        let mut ticks = 0;
        let mut peak = ground;
        while c.airborne {
            c.update();
            peak = peak.min(c.pos.y);
            ticks += 1;
            assert!(ticks < 1000, "jump never landed");
        }
        assert_eq!(c.pos.y, ground);
        assert_eq!(c.vel_y, 0.0);
        assert_eq!(c.pose, RUN_CYCLE[0]);
        // 12 + 11.3 + ... peaks roughly 100 units up
        assert!(ground - peak > 90.0 && ground - peak < 120.0);
    }

    #[test]
    fn test_jump_pose_sequence() {
        let mut c = Character::new();
        c.jump();
        assert_eq!(c.pose, Pose::Crouch);
        for _ in 0..CROUCH_TICKS - 1 {
            c.update();
        }
        assert_eq!(c.pose, Pose::Crouch);
        c.update();
        assert_eq!(c.pose, Pose::Jump);
    }

    #[test]
    fn test_run_cycle_wraps() {
        let mut c = Character::new();
        let mut seen = Vec::new();
        for _ in 0..RUN_FRAME_TICKS * RUN_CYCLE.len() as u32 {
            c.update();
            if seen.last() != Some(&c.run_frame()) {
                seen.push(c.run_frame());
            }
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 0]);
        assert_eq!(c.pose, Pose::Right);
        assert!(!c.airborne);
    }

    #[test]
    fn test_obstacle_moves_left_and_expires() {
        let mut o = Obstacle::new(SCREEN_WIDTH);
        assert_eq!(o.pos.y, 310.0);
        o.update();
        assert_eq!(o.pos.x, SCREEN_WIDTH - OBSTACLE_SPEED);

        o.pos.x = -OBSTACLE_WIDTH;
        assert!(!o.is_expired());
        o.update();
        assert!(o.is_expired());
    }

    proptest! {
        #[test]
        fn prop_never_below_ground(jumps in proptest::collection::vec(any::<bool>(), 1..400)) {
            let mut c = Character::new();
            let ground = c.ground_y();
            for jump in jumps {
                if jump {
                    c.jump();
                }
                c.update();
                prop_assert!(c.pos.y <= ground);
                if c.pos.y == ground {
                    prop_assert!(!c.airborne);
                }
            }
        }
    }
}
