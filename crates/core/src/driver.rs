//! Host seams and the frame driver.
//!
//! The controller never touches a terminal or a clock. A host supplies an
//! [`InputSource`] and a [`RenderSink`] and calls [`GameLoop::frame`] once per
//! tick with the elapsed time.

use anyhow::Result;
use tracing::info;

use crate::game::Game;
use crate::snapshot::GameSnapshot;
use crate::types::InputEvent;

/// Out-of-game request from the input side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostSignal {
    #[default]
    Continue,
    Restart,
    Quit,
}

pub trait InputSource {
    /// Append pending events to `events` and report any host request.
    /// `now_ms` is the host clock, used by sources that synthesize key-up.
    fn poll(&mut self, now_ms: u64, events: &mut Vec<InputEvent>) -> Result<HostSignal>;
}

pub trait RenderSink {
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()>;
}

/// Drives one [`Game`] from an input source to a render sink.
pub struct GameLoop<I, R> {
    game: Game,
    input: I,
    sink: R,
    events: Vec<InputEvent>,
    snapshot: GameSnapshot,
    host_clock: u64,
    restarts: u32,
    stopped: bool,
}

impl<I: InputSource, R: RenderSink> GameLoop<I, R> {
    pub fn new(game: Game, input: I, sink: R) -> Self {
        Self {
            game,
            input,
            sink,
            events: Vec::with_capacity(16),
            snapshot: GameSnapshot::default(),
            host_clock: 0,
            restarts: 0,
            stopped: false,
        }
    }

    /// Start the game at `now_ms` and present the first frame.
    pub fn start(&mut self, now_ms: u64) -> Result<()> {
        self.host_clock = now_ms;
        self.game.start(now_ms);
        self.present()
    }

    /// Poll input, advance the game by `delta_ms`, present.
    ///
    /// Returns `Ok(false)` once the host asked to quit or the loop was stopped.
    pub fn frame(&mut self, delta_ms: u64) -> Result<bool> {
        if self.stopped {
            return Ok(false);
        }
        self.host_clock = self.host_clock.saturating_add(delta_ms);

        self.events.clear();
        match self.input.poll(self.host_clock, &mut self.events)? {
            HostSignal::Continue => {}
            HostSignal::Restart => {
                self.restart(self.host_clock);
                return self.present().map(|_| true);
            }
            HostSignal::Quit => {
                self.stop();
                return Ok(false);
            }
        }

        for &event in &self.events {
            self.game.handle_input(event);
        }
        self.game.update(delta_ms);
        self.present()?;
        Ok(true)
    }

    /// Stop the loop and the game. Idempotent.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.game.stop();
    }

    /// Replace the game with a fresh one from the same config and a new seed.
    pub fn restart(&mut self, now_ms: u64) {
        self.restarts = self.restarts.wrapping_add(1);
        let config = self.game.config().clone();
        let seed = config.seed.wrapping_add(self.restarts);
        let level = self.game.level();
        info!(restarts = self.restarts, seed, "restarting game");

        self.game.stop();
        self.game = Game::with_randomizer(
            config.clone().with_seed(seed),
            crate::rng::Randomizer::new(config.randomizer, seed),
        );
        self.game.set_level(level);
        self.stopped = false;
        self.game.start(now_ms);
    }

    fn present(&mut self) -> Result<()> {
        self.game.snapshot_into(&mut self.snapshot);
        self.sink.present(&self.snapshot)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn into_parts(self) -> (Game, I, R) {
        (self.game, self.input, self.sink)
    }
}
