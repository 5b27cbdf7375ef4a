//! Terminal pasture runner (default binary).
//!
//! Loads the save, the map, and the translations, then hands the terminal to
//! the game loop. Logs go to a file because the terminal is in raw mode.

use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tui_pasture::core::Localize;
use tui_pasture::engine::{load_or_generate, Config, GameLoop, GameState, Timing};
use tui_pasture::input::{CrosstermKeys, InputSource};
use tui_pasture::store::{MapStore, SaveData, SaveStore, Translator};
use tui_pasture::term::{TermSize, WorldRenderer};

fn main() -> Result<()> {
    let config = Config::from_env();
    let _log_guard = setup_logging(&config.log_dir)?;

    let mut renderer = WorldRenderer::new(config.view_w, config.view_h).with_color(config.color);
    let game = build_game(&config)?;

    renderer.terminal_mut().enter()?;
    let result = run(&game, &mut renderer);

    // Always try to restore terminal state.
    let _ = renderer.terminal_mut().exit();
    if let Err(err) = &result {
        tracing::error!(error = %err, "game loop failed");
    }
    result
}

fn run(game: &GameLoop, renderer: &mut WorldRenderer) -> Result<()> {
    let input = InputSource::start(CrosstermKeys)?;
    game.run(input, renderer, TermSize::probe)
}

fn build_game(config: &Config) -> Result<GameLoop> {
    let saves = SaveStore::new(&config.save_path);
    let save = saves.load_or_default().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "could not write default save");
        SaveData::default()
    });

    let world = load_or_generate(&MapStore::new(&config.map_dir), &save.world);
    let translator = Translator::load(&config.lang_dir, save.settings.language.as_str());

    let mut state = GameState::from_save(world, &save);
    state.notice = Some(translator.format("ui", "welcome", &[("world", state.world.name())]));

    let timing = Timing::new(config, &save.settings);
    tracing::info!(
        world = state.world.name(),
        x = state.player.x,
        y = state.player.y,
        language = translator.language(),
        fps = timing.fps,
        "session loaded"
    );

    Ok(GameLoop::new(state, save.settings, Box::new(translator), Box::new(saves)).with_timing(timing))
}

/// File-only logging; stderr would scribble over the game screen.
fn setup_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::never(log_dir, "tui-pasture.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!(log_dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}
