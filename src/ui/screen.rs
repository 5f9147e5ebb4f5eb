//! Top-level screen state machine
//!
//! Pure: no rendering, no input polling. The app feeds in the event each
//! screen loop finished with and gets back the next screen.

/// Top-level screens. Game over is part of `Play`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Menu,
    Instructions,
    Scores,
    NameEntry,
    Play,
}

/// How a screen loop finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    Start,
    ViewInstructions,
    ViewScores,
    Back,
    NameSubmitted,
    /// The run ended and its score was submitted
    SessionFinished,
}

/// What a screen loop hands back to the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenOutcome {
    Event(ScreenEvent),
    /// Leave the game from any screen
    Quit,
}

/// Next screen after `event`. Pairs with no transition stay put.
pub fn transition(screen: Screen, event: ScreenEvent) -> Screen {
    use Screen::*;
    use ScreenEvent::*;

    match (screen, event) {
        (Menu, Start) => NameEntry,
        (Menu, ViewInstructions) => Instructions,
        (Menu, ViewScores) => Scores,
        (Instructions | Scores | NameEntry, Back) => Menu,
        (NameEntry, NameSubmitted) => Play,
        (Play, SessionFinished) => Menu,
        (current, _) => current,
    }
}
