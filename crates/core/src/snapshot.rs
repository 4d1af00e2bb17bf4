//! Read-only per-frame view of a game, consumed by renderers.

use arrayvec::ArrayVec;

use crate::types::{Cell, GridCoordinate, PieceKind, Rotation, GRID_COLS, GRID_ROWS, PREVIEW_CAP};

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    /// Constructed, `start` not called yet.
    #[default]
    Idle,
    Running,
    /// Stopped by the host; may not be resumed.
    Stopped,
    /// A piece locked above the field.
    GameOver,
}

impl GameStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, GameStatus::Running)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub cells: [GridCoordinate; 4],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub rows: u16,
    pub cols: u16,
    /// Row-major copy of the grid.
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub ghost: Option<[GridCoordinate; 4]>,
    pub next_queue: ArrayVec<PieceKind, PREVIEW_CAP>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub level: u32,
    pub lines: u32,
    pub status: GameStatus,
}

impl GameSnapshot {
    /// Reset to an empty view, keeping the board allocation.
    pub fn clear(&mut self) {
        self.board.fill(None);
        self.active = None;
        self.ghost = None;
        self.next_queue.clear();
        self.hold = None;
        self.can_hold = true;
        self.level = 1;
        self.lines = 0;
        self.status = GameStatus::Idle;
    }

    pub fn cell(&self, coord: GridCoordinate) -> Cell {
        if coord.row < 0
            || coord.col < 0
            || coord.row >= self.rows as i32
            || coord.col >= self.cols as i32
        {
            return None;
        }
        self.board[coord.row as usize * self.cols as usize + coord.col as usize]
    }

    /// Occupied grid cells with their kinds.
    pub fn filled(&self) -> impl Iterator<Item = (GridCoordinate, PieceKind)> + '_ {
        let cols = self.cols.max(1) as usize;
        self.board.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|kind| {
                (
                    GridCoordinate::new((idx / cols) as i32, (idx % cols) as i32),
                    kind,
                )
            })
        })
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            board: vec![None; GRID_ROWS as usize * GRID_COLS as usize],
            active: None,
            ghost: None,
            next_queue: ArrayVec::new(),
            hold: None,
            can_hold: true,
            level: 1,
            lines: 0,
            status: GameStatus::Idle,
        }
    }
}
