//! Menus and screen flow
//!
//! Button layout and input interpretation for the non-play screens, plus the
//! screen state machine itself.

pub mod name_entry;
pub mod screen;

use glam::Vec2;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::{InputEvent, Key};
use crate::sim::Rect;

pub use name_entry::{NameEntry, NameInput};
pub use screen::{Screen, ScreenEvent, ScreenOutcome, transition};

pub const TITLE: &str = "Astro Jump";

pub const INSTRUCTIONS: [&str; 6] = [
    "How to play:",
    "Press SPACE to make the astronaut jump",
    "Avoid the satellites",
    "You score a point for each satellite you pass",
    "The game ends when you hit a satellite",
    "Press SPACE or click after losing to save your score",
];

/// A clickable labelled rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: &'static str,
}

impl Button {
    const WIDTH: f32 = 200.0;
    const HEIGHT: f32 = 50.0;

    /// Horizontally centered button with its top edge at `y`
    pub const fn centered(y: f32, label: &'static str) -> Self {
        Self {
            rect: Rect::from_xywh(SCREEN_WIDTH / 2.0 - Self::WIDTH / 2.0, y, Self::WIDTH, Self::HEIGHT),
            label,
        }
    }

    pub fn is_clicked(&self, pos: Vec2) -> bool {
        self.rect.contains(pos)
    }
}

pub const START_BUTTON: Button = Button::centered(130.0, "Start Game");
pub const INSTRUCTIONS_BUTTON: Button = Button::centered(200.0, "Instructions");
pub const SCORES_BUTTON: Button = Button::centered(270.0, "High Scores");
pub const BACK_BUTTON: Button = Button::centered(SCREEN_HEIGHT - 100.0, "Back");

pub const MENU_BUTTONS: [Button; 3] = [START_BUTTON, INSTRUCTIONS_BUTTON, SCORES_BUTTON];

/// Interpret an input event on the main menu
pub fn menu_input(event: &InputEvent) -> Option<ScreenOutcome> {
    let event = match *event {
        InputEvent::Quit => return Some(ScreenOutcome::Quit),
        InputEvent::KeyDown(key) => match key {
            Key::Enter | Key::Space => ScreenEvent::Start,
            Key::Char('i') => ScreenEvent::ViewInstructions,
            Key::Char('h') => ScreenEvent::ViewScores,
            Key::Escape | Key::Char('q') => return Some(ScreenOutcome::Quit),
            _ => return None,
        },
        InputEvent::PointerDown(pos) => {
            if START_BUTTON.is_clicked(pos) {
                ScreenEvent::Start
            } else if INSTRUCTIONS_BUTTON.is_clicked(pos) {
                ScreenEvent::ViewInstructions
            } else if SCORES_BUTTON.is_clicked(pos) {
                ScreenEvent::ViewScores
            } else {
                return None;
            }
        }
    };
    Some(ScreenOutcome::Event(event))
}

/// Interpret an input event on a screen whose only way out is "Back"
pub fn back_input(event: &InputEvent) -> Option<ScreenOutcome> {
    match *event {
        InputEvent::Quit => Some(ScreenOutcome::Quit),
        InputEvent::KeyDown(Key::Escape | Key::Enter | Key::Backspace | Key::Char('b')) => {
            Some(ScreenOutcome::Event(ScreenEvent::Back))
        }
        InputEvent::PointerDown(pos) if BACK_BUTTON.is_clicked(pos) => {
            Some(ScreenOutcome::Event(ScreenEvent::Back))
        }
        _ => None,
    }
}

/// Jump keys during play
pub fn is_jump_key(key: Key) -> bool {
    matches!(key, Key::Space | Key::Up)
}
