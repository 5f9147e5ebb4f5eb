//! Platform abstraction layer
//!
//! Everything the game needs from the outside world goes through `Surface`:
//! - Input events
//! - Primitive drawing in logical frame coordinates (800x400)
//! - Frame presentation and pacing

pub mod terminal;

use glam::Vec2;

use crate::sim::Rect;

pub use terminal::TerminalSurface;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Up,
    Enter,
    Backspace,
    Escape,
    Char(char),
}

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window closed / Ctrl+C
    Quit,
    KeyDown(Key),
    /// Primary button press at a frame position
    PointerDown(Vec2),
}

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(255, 255, 255);
    pub const BLACK: Color = Color(0, 0, 0);
    pub const GRAY: Color = Color(100, 100, 100);
    pub const BLUE: Color = Color(0, 0, 255);
    pub const RED: Color = Color(255, 0, 0);
}

/// Images the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    AstronautRight,
    AstronautStill,
    AstronautLeft,
    AstronautCrouch,
    AstronautJump,
    Satellite,
}

/// Input, drawing and pacing back end
pub trait Surface {
    /// Drain pending input events
    fn poll_events(&mut self) -> anyhow::Result<Vec<InputEvent>>;

    /// Fill the whole frame
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw `sprite` scaled into `rect`
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect);

    /// Draw text with its top-left corner at `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color);

    /// Draw text centered on `center`
    fn draw_text_centered(&mut self, text: &str, center: Vec2, color: Color);

    /// Show the finished frame
    fn present(&mut self) -> anyhow::Result<()>;

    /// Block until the next tick is due
    fn wait_next_tick(&mut self);
}
