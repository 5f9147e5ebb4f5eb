//! Terminal back end for `Surface`
//!
//! The logical 800x400 frame is scaled onto the terminal. Each cell shows two
//! vertical pixels with the upper half block, text is overlaid per cell.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute, queue,
    style::{self, Color as CColor},
    terminal,
};
use glam::Vec2;

use super::{Color, InputEvent, Key, Sprite, Surface};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::Rect;

/// Maps logical frame coordinates to terminal cells and half-cell pixels
#[derive(Debug, Clone, Copy, PartialEq)]
struct Viewport {
    cols: usize,
    rows: usize,
}

impl Viewport {
    fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: (cols as usize).max(1),
            rows: (rows as usize).max(1),
        }
    }

    fn pixel_height(&self) -> usize {
        self.rows * 2
    }

    /// Pixel span [start, end) covered by `rect`
    fn pixel_span(&self, rect: Rect) -> (usize, usize, usize, usize) {
        let sx = self.cols as f32 / SCREEN_WIDTH;
        let sy = self.pixel_height() as f32 / SCREEN_HEIGHT;
        let clamp_x = |v: f32| (v.round().max(0.0) as usize).min(self.cols);
        let clamp_y = |v: f32| (v.round().max(0.0) as usize).min(self.pixel_height());
        (
            clamp_x(rect.pos.x * sx),
            clamp_y(rect.pos.y * sy),
            clamp_x(rect.right() * sx),
            clamp_y(rect.bottom() * sy),
        )
    }

    /// Cell containing a frame position
    fn cell_at(&self, pos: Vec2) -> (i32, i32) {
        (
            (pos.x / SCREEN_WIDTH * self.cols as f32).floor() as i32,
            (pos.y / SCREEN_HEIGHT * self.rows as f32).floor() as i32,
        )
    }

    /// Frame position at the center of a cell
    fn frame_pos(&self, col: u16, row: u16) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) / self.cols as f32 * SCREEN_WIDTH,
            (row as f32 + 0.5) / self.rows as f32 * SCREEN_HEIGHT,
        )
    }
}

/// Crossterm-driven surface drawing into the alternate screen
pub struct TerminalSurface {
    out: Stdout,
    view: Viewport,
    pixels: Vec<Color>,
    text: Vec<Option<(char, Color)>>,
    frame_duration: Duration,
    frame_start: Instant,
}

impl TerminalSurface {
    /// Take over the terminal. It is restored when the surface is dropped.
    pub fn new(frame_rate: u32) -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        // From here on any early return drops `surface`, which restores the terminal
        let mut surface = Self {
            out: io::stdout(),
            view: Viewport::new(1, 1),
            pixels: Vec::new(),
            text: Vec::new(),
            frame_duration: Duration::from_secs(1) / frame_rate.max(1),
            frame_start: Instant::now(),
        };
        execute!(
            surface.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture,
        )
        .context("preparing terminal")?;

        let (cols, rows) = terminal::size().context("reading terminal size")?;
        surface.resize(cols, rows);
        log::info!("Terminal surface {}x{} cells at {} fps", cols, rows, frame_rate);
        Ok(surface)
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.view = Viewport::new(cols, rows);
        self.pixels = vec![Color::WHITE; self.view.cols * self.view.pixel_height()];
        self.text = vec![None; self.view.cols * self.view.rows];
    }

    fn fill_pixels(&mut self, rect: Rect, color: Color) {
        let (x0, y0, x1, y1) = self.view.pixel_span(rect);
        for y in y0..y1 {
            let row = y * self.view.cols;
            self.pixels[row + x0..row + x1].fill(color);
        }
    }

    fn put_text(&mut self, text: &str, col: i32, row: i32, color: Color) {
        if row < 0 || row as usize >= self.view.rows {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let c = col + i as i32;
            if c >= 0 && (c as usize) < self.view.cols {
                self.text[row as usize * self.view.cols + c as usize] = Some((ch, color));
            }
        }
    }

    /// Only fresh presses count; auto-repeat and release events are dropped
    fn map_key(event: KeyEvent) -> Option<InputEvent> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        let key = match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(InputEvent::Quit);
            }
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Up => Key::Up,
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Esc => Key::Escape,
            _ => return None,
        };
        Some(InputEvent::KeyDown(key))
    }
}

fn term_color(c: Color) -> CColor {
    CColor::Rgb { r: c.0, g: c.1, b: c.2 }
}

impl Surface for TerminalSurface {
    fn poll_events(&mut self) -> anyhow::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => events.extend(Self::map_key(key)),
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        let pos = self.view.frame_pos(mouse.column, mouse.row);
                        events.push(InputEvent::PointerDown(pos));
                    }
                }
                Event::Resize(cols, rows) => {
                    log::debug!("Terminal resized to {}x{}", cols, rows);
                    self.resize(cols, rows);
                }
                _ => {}
            }
        }
        Ok(events)
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
        self.text.fill(None);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_pixels(rect, color);
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) {
        const SUIT: Color = Color(210, 210, 220);
        const VISOR: Color = Color(230, 150, 40);
        const PANEL: Color = Color(60, 90, 200);
        const BODY: Color = Color(150, 150, 150);

        let Rect { pos, size } = rect;
        let visor = |x: f32| Rect::new(pos + Vec2::new(size.x * x, size.y * 0.1), size * Vec2::new(0.5, 0.2));
        match sprite {
            Sprite::AstronautRight => {
                self.fill_pixels(rect, SUIT);
                self.fill_pixels(visor(0.5), VISOR);
            }
            Sprite::AstronautLeft => {
                self.fill_pixels(rect, SUIT);
                self.fill_pixels(visor(0.0), VISOR);
            }
            Sprite::AstronautStill => {
                self.fill_pixels(rect, SUIT);
                self.fill_pixels(visor(0.25), VISOR);
            }
            Sprite::AstronautCrouch => {
                let low = Rect::new(pos + Vec2::new(0.0, size.y * 0.3), size * Vec2::new(1.0, 0.7));
                self.fill_pixels(low, SUIT);
                self.fill_pixels(
                    Rect::new(low.pos + Vec2::new(size.x * 0.25, size.y * 0.05), size * Vec2::new(0.5, 0.2)),
                    VISOR,
                );
            }
            Sprite::AstronautJump => {
                let body = Rect::new(pos, size * Vec2::new(1.0, 0.75));
                self.fill_pixels(body, SUIT);
                self.fill_pixels(visor(0.25), VISOR);
                let legs = Rect::new(pos + Vec2::new(size.x * 0.25, size.y * 0.75), size * Vec2::new(0.5, 0.25));
                self.fill_pixels(legs, SUIT);
            }
            Sprite::Satellite => {
                let core = Rect::new(pos + size * Vec2::new(0.3, 0.2), size * Vec2::new(0.4, 0.6));
                let wings = Rect::new(pos + size * Vec2::new(0.0, 0.35), size * Vec2::new(1.0, 0.3));
                self.fill_pixels(wings, PANEL);
                self.fill_pixels(core, BODY);
            }
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color) {
        let (col, row) = self.view.cell_at(pos);
        self.put_text(text, col, row, color);
    }

    fn draw_text_centered(&mut self, text: &str, center: Vec2, color: Color) {
        let (col, row) = self.view.cell_at(center);
        let half = text.chars().count() as i32 / 2;
        self.put_text(text, col - half, row, color);
    }

    fn present(&mut self) -> anyhow::Result<()> {
        let cols = self.view.cols;
        queue!(self.out, terminal::BeginSynchronizedUpdate, cursor::MoveTo(0, 0))?;
        for row in 0..self.view.rows {
            for col in 0..cols {
                let top = self.pixels[(row * 2) * cols + col];
                let bottom = self.pixels[(row * 2 + 1) * cols + col];
                match self.text[row * cols + col] {
                    Some((ch, fg)) => queue!(
                        self.out,
                        style::SetForegroundColor(term_color(fg)),
                        style::SetBackgroundColor(term_color(top)),
                        style::Print(ch)
                    )?,
                    None => queue!(
                        self.out,
                        style::SetForegroundColor(term_color(top)),
                        style::SetBackgroundColor(term_color(bottom)),
                        style::Print('\u{2580}')
                    )?,
                }
            }
            if row + 1 < self.view.rows {
                queue!(self.out, style::ResetColor, style::Print("\r\n"))?;
            }
        }
        queue!(self.out, style::ResetColor, terminal::EndSynchronizedUpdate)?;
        self.out.flush().context("flushing frame")?;
        Ok(())
    }

    fn wait_next_tick(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame_duration {
            std::thread::sleep(self.frame_duration - elapsed);
        }
        self.frame_start = Instant::now();
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let restored = execute!(
            self.out,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )
        .and_then(|_| terminal::disable_raw_mode());
        if let Err(e) = restored {
            log::error!("Failed to restore terminal: {}", e);
        }
    }
}
