//! Terminal runner (default binary).
//!
//! Reads `BLOCKFALL_*` settings, optionally logs to `BLOCKFALL_LOG_PATH`, and
//! drives the game at a fixed tick with crossterm input and the framebuffer
//! renderer.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing::{info, warn, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use blockfall::core::{Game, GameConfig, GameLoop};
use blockfall::input::{disable_keyboard_enhancement, enable_keyboard_enhancement, CrosstermInput};
use blockfall::term::TerminalRenderer;
use blockfall::types::TICK_MS;

fn main() -> Result<()> {
    init_logging()?;

    let mut config = GameConfig::from_env();
    if std::env::var_os("BLOCKFALL_SEED").is_none() {
        config.seed = clock_seed();
    }
    config.validate().context("invalid BLOCKFALL_* configuration")?;
    let game = Game::new(config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let enhanced = enable_keyboard_enhancement().unwrap_or_else(|err| {
        warn!(%err, "keyboard enhancement query failed");
        false
    });

    let result = run(game, enhanced, term);

    if enhanced {
        let _ = disable_keyboard_enhancement();
    }
    result
}

fn run(game: Game, enhanced: bool, term: TerminalRenderer) -> Result<()> {
    let mut game_loop = GameLoop::new(game, CrosstermInput::new(enhanced), term);

    let epoch = Instant::now();
    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_frame = epoch;

    let outcome = (|| -> Result<()> {
        game_loop.start(0)?;
        loop {
            let elapsed = last_frame.elapsed();
            if elapsed < tick {
                std::thread::sleep(tick - elapsed);
            }
            let now = Instant::now();
            let delta = now.duration_since(last_frame).as_millis() as u64;
            last_frame = now;

            if !game_loop.frame(delta)? {
                return Ok(());
            }
        }
    })();

    game_loop.stop();
    info!(
        lines = game_loop.game().lines(),
        uptime_ms = epoch.elapsed().as_millis() as u64,
        "session ended"
    );

    // Always try to restore terminal state.
    let (_, _, mut term) = game_loop.into_parts();
    let _ = term.exit();
    outcome
}

/// Log to `BLOCKFALL_LOG_PATH` when set; stdout belongs to the game.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var("BLOCKFALL_LOG_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Ok(());
    };

    let level = std::env::var("BLOCKFALL_LOG_LEVEL")
        .ok()
        .and_then(|s| s.trim().parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    let file = File::create(&path).with_context(|| format!("cannot open log file {path}"))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(LevelFilter::from_level(level))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}
