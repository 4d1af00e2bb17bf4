//! Game controller - the per-frame timing state machine
//!
//! [`Game`] owns the grid, the falling piece, the queue and the hold slot. The
//! host feeds it [`InputEvent`]s and calls [`Game::update`] once per frame with
//! the elapsed time. All rate limits are measured against a logical clock that
//! advances by exactly `delta_ms` per update, so a stalled host never produces
//! a burst of catch-up steps.
//!
//! Order of work inside one update:
//!
//! 1. Edge-triggered actions: hold (ends the frame), rotate CW, rotate CCW,
//!    hard drop (locks and ends the frame)
//! 2. Lateral movement, at most one step per `LATERAL_REPEAT_MS`
//! 3. Soft drop, at most one step per `SOFT_DROP_INTERVAL_MS` once the piece
//!    is visible; a successful step resets gravity and ends the frame
//! 4. Gravity at the level's interval; a blocked step locks the piece

use tracing::{debug, info, trace};

use crate::config::{ConfigError, GameConfig};
use crate::grid::Grid;
use crate::hold::HoldSlot;
use crate::pieces::Piece;
use crate::queue::PieceQueue;
use crate::rng::Randomizer;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, GameStatus};
use crate::types::{
    gravity_interval_ms, Control, InputEvent, PieceKind, LATERAL_REPEAT_MS, PREVIEW_CAP,
    SOFT_DROP_INTERVAL_MS,
};

/// Pending input for the next update.
///
/// Level-triggered controls stay set until released. Edge-triggered controls
/// are set by a first press only and consumed by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFlags {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    pub rotate_cw: bool,
    pub rotate_ccw: bool,
    pub hold: bool,
    pub hard_drop: bool,
}

impl InputFlags {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(control) => self.set(control, true),
            // Auto-repeat never re-arms an edge action.
            InputEvent::Repeat(control) if control.is_level_triggered() => {
                self.set(control, true)
            }
            InputEvent::Repeat(_) => {}
            InputEvent::Release(control) if control.is_level_triggered() => {
                self.set(control, false)
            }
            InputEvent::Release(_) => {}
        }
    }

    fn set(&mut self, control: Control, value: bool) {
        match control {
            Control::Left => self.left = value,
            Control::Right => self.right = value,
            Control::Down => self.down = value,
            Control::RotateCw => self.rotate_cw = value,
            Control::RotateCcw => self.rotate_ccw = value,
            Control::Hold => self.hold = value,
            Control::HardDrop => self.hard_drop = value,
        }
    }

    /// Drop every flag, held or pending.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// What happened at the last lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    /// Cleared row indices, bottom-most first.
    pub rows: Vec<i32>,
    /// The piece locked with a cell above the field; the game is over.
    pub topped_out: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    current: Option<Piece>,
    queue: PieceQueue,
    hold: HoldSlot,
    can_hold: bool,
    level: u32,
    lines: u32,
    status: GameStatus,
    input: InputFlags,
    /// Logical clock, advanced by `delta_ms` each running update.
    last_tick: u64,
    last_gravity: u64,
    last_lateral: Option<u64>,
    last_soft_drop: Option<u64>,
    last_event: Option<LockEvent>,
}

impl Game {
    /// Create an idle game. Call [`Game::start`] to spawn the first piece.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let randomizer = Randomizer::new(config.randomizer, config.seed);
        Ok(Self::with_randomizer(config, randomizer))
    }

    /// Like [`Game::new`] with an explicit randomizer. The config is not
    /// validated; dimensions below the minimum are the caller's problem.
    pub fn with_randomizer(config: GameConfig, randomizer: Randomizer) -> Self {
        let queue = PieceQueue::for_width(randomizer, config.queue_size, config.cols);
        Self {
            grid: Grid::new(config.rows, config.cols),
            current: None,
            queue,
            hold: HoldSlot::for_width(config.cols),
            can_hold: true,
            level: config.level.max(1),
            lines: 0,
            status: GameStatus::Idle,
            input: InputFlags::default(),
            last_tick: 0,
            last_gravity: 0,
            last_lateral: None,
            last_soft_drop: None,
            last_event: None,
            config,
        }
    }

    /// Seed the clock at `now_ms` and draw the first piece. No-op unless idle.
    pub fn start(&mut self, now_ms: u64) {
        if self.status != GameStatus::Idle {
            return;
        }
        self.last_tick = now_ms;
        self.status = GameStatus::Running;
        info!(
            seed = self.config.seed,
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            level = self.level,
            "game started"
        );
        self.spawn_next();
    }

    /// Halt the simulation. Idempotent; a finished game stays game-over.
    pub fn stop(&mut self) {
        match self.status {
            GameStatus::Idle | GameStatus::Running => {
                self.status = GameStatus::Stopped;
                self.input.clear();
                info!(lines = self.lines, "game stopped");
            }
            GameStatus::Stopped | GameStatus::GameOver => {}
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        self.input.apply(event);
    }

    pub fn input(&self) -> &InputFlags {
        &self.input
    }

    /// Advance one frame of `delta_ms` milliseconds.
    pub fn update(&mut self, delta_ms: u64) {
        if !self.status.is_running() {
            return;
        }
        self.last_tick = self.last_tick.saturating_add(delta_ms);

        if std::mem::take(&mut self.input.hold) && self.hold_current() {
            return;
        }

        let Some(mut piece) = self.current else {
            return;
        };

        if std::mem::take(&mut self.input.rotate_cw) && !piece.rotate_cw(&self.grid) {
            trace!(kind = ?piece.kind(), from = piece.rotation().as_str(), "clockwise rotation blocked");
        }
        if std::mem::take(&mut self.input.rotate_ccw) && !piece.rotate_ccw(&self.grid) {
            trace!(kind = ?piece.kind(), from = piece.rotation().as_str(), "counter-clockwise rotation blocked");
        }

        if std::mem::take(&mut self.input.hard_drop) {
            while piece.move_down(&self.grid) {}
            self.current = Some(piece);
            self.lock_current();
            return;
        }

        if (self.input.left || self.input.right)
            && elapsed(self.last_lateral, self.last_tick, LATERAL_REPEAT_MS)
        {
            self.last_lateral = Some(self.last_tick);
            if self.input.left {
                piece.move_left(&self.grid);
            }
            if self.input.right {
                piece.move_right(&self.grid);
            }
        }

        if self.input.down
            && piece.is_visible()
            && elapsed(self.last_soft_drop, self.last_tick, SOFT_DROP_INTERVAL_MS)
        {
            self.last_soft_drop = Some(self.last_tick);
            if piece.move_down(&self.grid) {
                self.last_gravity = self.last_tick;
                self.current = Some(piece);
                return;
            }
        }

        self.current = Some(piece);

        if self.last_tick - self.last_gravity >= self.gravity_interval_ms() {
            self.last_gravity = self.last_tick;
            let landed = match self.current.as_mut() {
                Some(piece) => !piece.move_down(&self.grid),
                None => false,
            };
            if landed {
                self.lock_current();
            }
        }
    }

    /// Swap the falling piece with the hold slot. Returns false when holding
    /// is spent for this piece.
    fn hold_current(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };
        let next = self
            .hold
            .hold(&current)
            .unwrap_or_else(|| self.queue.dequeue());
        debug!(held = ?current.kind(), next = ?next.kind(), "hold");
        self.current = Some(next);
        self.can_hold = false;
        self.last_gravity = self.last_tick;
        true
    }

    /// Write the falling piece into the grid, clear rows, and spawn the next
    /// piece. A piece with any cell above the field ends the game instead.
    fn lock_current(&mut self) {
        let Some(piece) = self.current else {
            return;
        };

        if piece.extends_above_field() {
            self.status = GameStatus::GameOver;
            self.input.clear();
            self.last_event = Some(LockEvent {
                kind: piece.kind(),
                lines_cleared: 0,
                rows: Vec::new(),
                topped_out: true,
            });
            info!(lines = self.lines, kind = ?piece.kind(), "game over");
            return;
        }

        for &cell in piece.cells() {
            self.grid.set(cell, Some(piece.kind()));
        }
        let rows = self.grid.clear_full_rows();
        let cleared = rows.len() as u32;
        self.lines += cleared;

        debug!(kind = ?piece.kind(), rotation = piece.rotation().as_str(), "piece locked");
        if cleared > 0 {
            info!(cleared, total = self.lines, ?rows, "lines cleared");
        }

        self.last_event = Some(LockEvent {
            kind: piece.kind(),
            lines_cleared: cleared,
            rows,
            topped_out: false,
        });
        self.spawn_next();
    }

    fn spawn_next(&mut self) {
        let piece = self.queue.dequeue();
        debug!(kind = ?piece.kind(), "spawn");
        self.current = Some(piece);
        self.can_hold = true;
        self.last_gravity = self.last_tick;
    }

    /// Take the last lock event, if any, leaving `None`.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn gravity_interval_ms(&self) -> u64 {
        gravity_interval_ms(self.level)
    }

    /// Set the gravity level (raised to 1).
    pub fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.hold.held()
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    /// Replace the falling piece. Used by scripted scenarios and tests.
    pub fn replace_current(&mut self, piece: Piece) {
        self.current = Some(piece);
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current value of the logical clock.
    pub fn clock_ms(&self) -> u64 {
        self.last_tick
    }

    /// Landing position of the falling piece.
    pub fn ghost(&self) -> Option<Piece> {
        self.current.map(|piece| piece.ghost(&self.grid))
    }

    /// Fill `out` with the current state, reusing its allocations.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.rows = self.grid.rows();
        out.cols = self.grid.cols();
        out.board.clear();
        out.board.extend_from_slice(self.grid.cells());

        out.active = self.current.map(|piece| ActiveSnapshot {
            kind: piece.kind(),
            rotation: piece.rotation(),
            cells: *piece.cells(),
        });
        out.ghost = match self.status {
            GameStatus::Running => self.ghost().map(|ghost| *ghost.cells()),
            _ => None,
        };

        out.next_queue.clear();
        out.next_queue
            .extend(self.queue.preview().take(PREVIEW_CAP));
        out.hold = self.hold.held();
        out.can_hold = self.can_hold;
        out.level = self.level;
        out.lines = self.lines;
        out.status = self.status;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }
}

impl Default for Game {
    fn default() -> Self {
        let config = GameConfig::default();
        let randomizer = Randomizer::new(config.randomizer, config.seed);
        Self::with_randomizer(config, randomizer)
    }
}

/// True when `interval` has passed since `last`, or nothing has happened yet.
fn elapsed(last: Option<u64>, now: u64, interval: u64) -> bool {
    last.map_or(true, |t| now.saturating_sub(t) >= interval)
}
