//! Axis-aligned collision detection
//!
//! Both the astronaut and the satellites are boxes, so a strict AABB
//! overlap test is all the game needs. Touching edges do not count.

use glam::Vec2;

use super::state::{Character, Obstacle};

/// Axis-aligned box in frame coordinates (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub const fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Point-in-box test, used for pointer hits on buttons
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.pos.x && point.x < self.right() && point.y >= self.pos.y && point.y < self.bottom()
    }
}

/// Strict overlap of two boxes
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

/// Index of the first obstacle the character overlaps, if any
pub fn first_hit(character: &Character, obstacles: &[Obstacle]) -> Option<usize> {
    let body = character.rect();
    obstacles.iter().position(|o| overlaps(&body, &o.rect()))
}
