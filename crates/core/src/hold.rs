//! Hold slot - one banked piece kind.

use crate::pieces::Piece;
use crate::types::{PieceKind, GRID_COLS};

/// Single-piece swap buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldSlot {
    held: Option<PieceKind>,
    cols: u16,
}

impl HoldSlot {
    pub fn new() -> Self {
        Self::for_width(GRID_COLS)
    }

    pub fn for_width(cols: u16) -> Self {
        Self { held: None, cols }
    }

    /// Store `current`'s kind and return the previously held kind as a
    /// fresh spawn-orientation piece, or `None` if the slot was empty.
    pub fn hold(&mut self, current: &Piece) -> Option<Piece> {
        self.held
            .replace(current.kind())
            .map(|kind| Piece::spawn_for_width(kind, self.cols))
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }
}

impl Default for HoldSlot {
    fn default() -> Self {
        Self::new()
    }
}
