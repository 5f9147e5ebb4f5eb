//! Frame loop
//!
//! `App` owns the surface, the score store and the settings, and runs one
//! input/update/render loop per screen. Each loop returns a single outcome
//! that the screen state machine turns into the next screen.

use anyhow::Result;
use rand::Rng;

use crate::highscores::ScoreStore;
use crate::platform::{InputEvent, Surface};
use crate::renderer;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::ui::{self, NameEntry, NameInput, Screen, ScreenEvent, ScreenOutcome, transition};

/// Game context, constructed once at startup
pub struct App<S: Surface> {
    surface: S,
    settings: Settings,
    store: ScoreStore,
    screen: Screen,
    player_name: String,
}

impl<S: Surface> App<S> {
    pub fn new(surface: S, settings: Settings, store: ScoreStore) -> Self {
        Self {
            surface,
            settings,
            store,
            screen: Screen::default(),
            player_name: String::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Run screens until the player quits
    pub fn run(&mut self) -> Result<()> {
        log::info!("Astro Jump starting, scores at {}", self.store.path().display());
        loop {
            let event = match self.run_screen()? {
                ScreenOutcome::Quit => {
                    log::info!("Quit from {:?}", self.screen);
                    return Ok(());
                }
                ScreenOutcome::Event(event) => event,
            };
            let next = transition(self.screen, event);
            log::info!("{:?} --{:?}--> {:?}", self.screen, event, next);
            self.screen = next;
        }
    }

    fn run_screen(&mut self) -> Result<ScreenOutcome> {
        match self.screen {
            Screen::Menu => self.run_menu(),
            Screen::Instructions => self.run_instructions(),
            Screen::Scores => self.run_scores(),
            Screen::NameEntry => self.run_name_entry(),
            Screen::Play => self.run_play(),
        }
    }

    /// Present the frame and wait for the next tick
    fn end_frame(&mut self) -> Result<()> {
        self.surface.present()?;
        self.surface.wait_next_tick();
        Ok(())
    }

    fn run_menu(&mut self) -> Result<ScreenOutcome> {
        loop {
            for event in self.surface.poll_events()? {
                if let Some(outcome) = ui::menu_input(&event) {
                    return Ok(outcome);
                }
            }
            renderer::draw_menu(&mut self.surface);
            self.end_frame()?;
        }
    }

    fn run_instructions(&mut self) -> Result<ScreenOutcome> {
        loop {
            for event in self.surface.poll_events()? {
                if let Some(outcome) = ui::back_input(&event) {
                    return Ok(outcome);
                }
            }
            renderer::draw_instructions(&mut self.surface);
            self.end_frame()?;
        }
    }

    fn run_scores(&mut self) -> Result<ScreenOutcome> {
        let scores = self.store.load();
        loop {
            for event in self.surface.poll_events()? {
                if let Some(outcome) = ui::back_input(&event) {
                    return Ok(outcome);
                }
            }
            renderer::draw_scores(&mut self.surface, &scores);
            self.end_frame()?;
        }
    }

    fn run_name_entry(&mut self) -> Result<ScreenOutcome> {
        let mut entry = NameEntry::new();
        loop {
            for event in self.surface.poll_events()? {
                let key = match event {
                    InputEvent::Quit => return Ok(ScreenOutcome::Quit),
                    InputEvent::KeyDown(key) => key,
                    InputEvent::PointerDown(_) => continue,
                };
                match entry.handle_key(key) {
                    NameInput::Editing => {}
                    NameInput::Submitted(name) => {
                        log::info!("Player name set to {:?}", name);
                        self.player_name = name;
                        return Ok(ScreenOutcome::Event(ScreenEvent::NameSubmitted));
                    }
                    NameInput::Cancelled => return Ok(ScreenOutcome::Event(ScreenEvent::Back)),
                }
            }
            renderer::draw_name_entry(&mut self.surface, entry.text());
            self.end_frame()?;
        }
    }

    fn run_play(&mut self) -> Result<ScreenOutcome> {
        let seed = self
            .settings
            .seed
            .unwrap_or_else(|| rand::rng().random());
        let mut state = GameState::new(seed);
        log::info!("Session started for {:?} with seed {}", self.player_name, seed);

        loop {
            let mut input = TickInput::default();
            for event in self.surface.poll_events()? {
                match event {
                    InputEvent::Quit => return Ok(ScreenOutcome::Quit),
                    InputEvent::KeyDown(key) if ui::is_jump_key(key) => {
                        if state.game_over {
                            return Ok(self.finish_session(&state));
                        }
                        input.jump = true;
                    }
                    InputEvent::PointerDown(_) if state.game_over => {
                        return Ok(self.finish_session(&state));
                    }
                    _ => {}
                }
            }

            tick(&mut state, &input);
            if state.events.contains(&GameEvent::Collision) {
                log::info!("Game over after {} ticks, score {}", state.time_ticks, state.score);
            }

            renderer::draw_play(&mut self.surface, &state);
            self.end_frame()?;
        }
    }

    /// Submit the finished run to the leaderboard
    fn finish_session(&mut self, state: &GameState) -> ScreenOutcome {
        match self.store.add(&self.player_name, state.score) {
            Ok((_, Some(rank))) => log::info!("{} placed #{} with {}", self.player_name, rank, state.score),
            Ok((_, None)) => log::info!("{} did not make the board with {}", self.player_name, state.score),
            Err(e) => log::error!("Failed to save score: {:#}", e),
        }
        ScreenOutcome::Event(ScreenEvent::SessionFinished)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use glam::Vec2;

    use super::*;
    use crate::platform::{Color, Key, Sprite};
    use crate::sim::Rect;
    use crate::ui::START_BUTTON;

    /// Replays one batch of events per poll, then asks to quit
    #[derive(Default)]
    struct ScriptedSurface {
        script: VecDeque<Vec<InputEvent>>,
        frames: usize,
        texts: Vec<String>,
    }

    impl ScriptedSurface {
        fn new(script: Vec<Vec<InputEvent>>) -> Self {
            Self {
                script: script.into(),
                ..Default::default()
            }
        }
    }

    impl Surface for ScriptedSurface {
        fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
            Ok(self.script.pop_front().unwrap_or_else(|| vec![InputEvent::Quit]))
        }
        fn clear(&mut self, _color: Color) {
            self.texts.clear();
        }
        fn fill_rect(&mut self, _rect: Rect, _color: Color) {}
        fn draw_sprite(&mut self, _sprite: Sprite, _rect: Rect) {}
        fn draw_text(&mut self, text: &str, _pos: Vec2, _color: Color) {
            self.texts.push(text.to_string());
        }
        fn draw_text_centered(&mut self, text: &str, _center: Vec2, _color: Color) {
            self.texts.push(text.to_string());
        }
        fn present(&mut self) -> Result<()> {
            self.frames += 1;
            Ok(())
        }
        fn wait_next_tick(&mut self) {}
    }

    fn key(k: Key) -> Vec<InputEvent> {
        vec![InputEvent::KeyDown(k)]
    }

    fn typed(name: &str) -> Vec<InputEvent> {
        name.chars().map(|c| InputEvent::KeyDown(Key::Char(c))).collect()
    }

    fn app_with(script: Vec<Vec<InputEvent>>, dir: &tempfile::TempDir) -> App<ScriptedSurface> {
        let settings = Settings {
            seed: Some(4242),
            ..Default::default()
        };
        let store = ScoreStore::new(dir.path().join("scores.json"));
        App::new(ScriptedSurface::new(script), settings, store)
    }

    #[test]
    fn test_play_session_submits_score() {
        let dir = tempfile::tempdir().unwrap();
        let mut script = vec![
            vec![InputEvent::PointerDown(START_BUTTON.rect.center())],
            typed("Ana"),
            key(Key::Enter),
        ];
        // Stand still long enough for a satellite to arrive
        script.extend(std::iter::repeat_n(Vec::new(), 3000));
        script.push(key(Key::Space));

        let mut app = app_with(script, &dir);
        app.run().unwrap();

        assert_eq!(app.player_name(), "Ana");
        assert_eq!(app.screen(), Screen::Menu);
        let board = ScoreStore::new(dir.path().join("scores.json")).load();
        assert_eq!(board.len(), 1);
        assert_eq!(board.entries[0].name, "Ana");
        assert!(app.surface().frames > 100);
    }

    #[test]
    fn test_click_after_game_over_returns_to_menu() {
        let dir = tempfile::tempdir().unwrap();
        let mut script = vec![key(Key::Enter), key(Key::Enter)];
        script.extend(std::iter::repeat_n(Vec::new(), 3000));
        script.push(vec![InputEvent::PointerDown(Vec2::new(400.0, 200.0))]);

        let mut app = app_with(script, &dir);
        app.run().unwrap();

        assert_eq!(app.screen(), Screen::Menu);
        let board = ScoreStore::new(dir.path().join("scores.json")).load();
        assert_eq!(board.entries[0].name, "Player");
    }

    #[test]
    fn test_quit_mid_game_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let script = vec![key(Key::Enter), typed("Ben"), key(Key::Enter), Vec::new(), vec![InputEvent::Quit]];

        let mut app = app_with(script, &dir);
        app.run().unwrap();

        assert_eq!(app.screen(), Screen::Play);
        assert!(!dir.path().join("scores.json").exists());
    }

    #[test]
    fn test_scores_screen_shows_saved_entries() {
        let dir = tempfile::tempdir().unwrap();
        ScoreStore::new(dir.path().join("scores.json")).add("Cid", 20).unwrap();

        let script = vec![key(Key::Char('h')), Vec::new()];
        let mut app = app_with(script, &dir);
        app.run().unwrap();

        assert_eq!(app.screen(), Screen::Scores);
        assert!(app.surface().texts.iter().any(|t| t.starts_with("1. Cid")));
    }

    #[test]
    fn test_side_screens_and_back() {
        let dir = tempfile::tempdir().unwrap();
        let script = vec![
            key(Key::Char('i')),
            key(Key::Escape),
            key(Key::Enter),
            key(Key::Escape),
            key(Key::Char('h')),
            key(Key::Char('b')),
        ];
        let mut app = app_with(script, &dir);
        app.run().unwrap();
        assert_eq!(app.screen(), Screen::Menu);
    }
}
