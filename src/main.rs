//! Astro Jump entry point
//!
//! Loads settings, takes over the terminal and runs the game until the player
//! quits. Logs go to stderr (`RUST_LOG`, default `warn`).

use astro_jump::platform::TerminalSurface;
use astro_jump::settings::{self, Settings};
use astro_jump::{App, ScoreStore};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let data_dir = settings::data_dir();
    let settings_path = data_dir.join(Settings::FILE_NAME);
    let settings = if settings_path.exists() {
        Settings::load(&settings_path)
    } else {
        let defaults = Settings::default();
        if let Err(e) = defaults.save(&settings_path) {
            log::warn!("Could not write default settings: {:#}", e);
        }
        defaults
    };

    let store = ScoreStore::new(settings.scores_path(&data_dir));
    let surface = TerminalSurface::new(settings.effective_frame_rate())?;

    let mut app = App::new(surface, settings, store);
    app.run()
}
