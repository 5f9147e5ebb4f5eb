//! Scene drawing
//!
//! Turns game and menu state into `Surface` draw calls. Nothing here changes
//! state; every function draws one complete frame.

use glam::Vec2;

use crate::consts::*;
use crate::highscores::Leaderboard;
use crate::platform::{Color, Sprite, Surface};
use crate::sim::{GameState, Pose, Rect};
use crate::ui::{BACK_BUTTON, Button, INSTRUCTIONS, MENU_BUTTONS, TITLE};

const GROUND: Rect = Rect::from_xywh(0.0, SCREEN_HEIGHT - GROUND_HEIGHT, SCREEN_WIDTH, GROUND_HEIGHT);

fn draw_button<S: Surface + ?Sized>(surface: &mut S, button: &Button) {
    surface.fill_rect(button.rect, Color::BLUE);
    surface.draw_text_centered(button.label, button.rect.center(), Color::WHITE);
}

fn pose_sprite(pose: Pose) -> Sprite {
    match pose {
        Pose::Right => Sprite::AstronautRight,
        Pose::Still => Sprite::AstronautStill,
        Pose::Left => Sprite::AstronautLeft,
        Pose::Crouch => Sprite::AstronautCrouch,
        Pose::Jump => Sprite::AstronautJump,
    }
}

pub fn draw_menu<S: Surface + ?Sized>(surface: &mut S) {
    surface.clear(Color::WHITE);
    surface.draw_text_centered(TITLE, Vec2::new(SCREEN_WIDTH / 2.0, 60.0), Color::BLACK);
    for button in &MENU_BUTTONS {
        draw_button(surface, button);
    }
    surface.draw_text_centered(
        "Enter: start   I: instructions   H: scores   Q: quit",
        Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 30.0),
        Color::GRAY,
    );
}

pub fn draw_instructions<S: Surface + ?Sized>(surface: &mut S) {
    surface.clear(Color::WHITE);
    for (i, line) in INSTRUCTIONS.iter().enumerate() {
        surface.draw_text(line, Vec2::new(50.0, 50.0 + i as f32 * 40.0), Color::BLACK);
    }
    draw_button(surface, &BACK_BUTTON);
}

pub fn draw_scores<S: Surface + ?Sized>(surface: &mut S, scores: &Leaderboard) {
    surface.clear(Color::WHITE);
    surface.draw_text_centered("High Scores", Vec2::new(SCREEN_WIDTH / 2.0, 50.0), Color::BLACK);

    if scores.is_empty() {
        surface.draw_text_centered("No scores yet", Vec2::new(SCREEN_WIDTH / 2.0, 150.0), Color::GRAY);
    }
    for (i, entry) in scores.entries.iter().enumerate() {
        let line = format!("{}. {:<10} {:>6}", i + 1, entry.name, entry.score);
        surface.draw_text(&line, Vec2::new(250.0, 100.0 + i as f32 * 35.0), Color::BLACK);
    }
    draw_button(surface, &BACK_BUTTON);
}

pub fn draw_name_entry<S: Surface + ?Sized>(surface: &mut S, name: &str) {
    surface.clear(Color::WHITE);
    surface.draw_text_centered("Enter your name:", Vec2::new(SCREEN_WIDTH / 2.0, 120.0), Color::BLACK);

    let field = Rect::from_xywh(SCREEN_WIDTH / 2.0 - 150.0, 160.0, 300.0, 50.0);
    surface.fill_rect(field, Color::GRAY);
    surface.draw_text_centered(&format!("{name}_"), field.center(), Color::WHITE);

    surface.draw_text_centered(
        "Enter: confirm   Esc: back",
        Vec2::new(SCREEN_WIDTH / 2.0, 260.0),
        Color::GRAY,
    );
}

pub fn draw_play<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    surface.clear(Color::WHITE);
    surface.fill_rect(GROUND, Color::GRAY);

    let character = &state.character;
    surface.draw_sprite(pose_sprite(character.pose), character.rect());
    for obstacle in &state.obstacles {
        surface.draw_sprite(Sprite::Satellite, obstacle.rect());
    }

    surface.draw_text(&format!("Score: {}", state.score), Vec2::new(10.0, 10.0), Color::BLACK);

    if state.game_over {
        surface.draw_text_centered(
            "Game Over! Click or press SPACE to return to the menu",
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
            Color::RED,
        );
    }
}
