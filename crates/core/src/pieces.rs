//! Pieces module - tetromino spawn layouts and movement
//!
//! A [`Piece`] is plain `Copy` data: four cells, a pivot, an orientation and a
//! kind. Nothing outside the controller ever holds a live piece; the queue and
//! hold slot keep [`PieceKind`]s and spawn fresh pieces on demand.
//!
//! Spawn layouts (10 columns, pivot at row -1, col 4 for every kind):
//!
//! ```text
//!        col 3 4 5 6
//! row -2     . T . .      I: row -1, cols 3..=6
//! row -1     T T T .      O: rows -2..=-1, cols 4..=5
//! ```

use crate::grid::Grid;
use crate::rotation::{try_rotate, RotationFamily};
use crate::types::{GridCoordinate, PieceKind, Rotation, RotationDirection, GRID_COLS};

/// Pivot shared by every spawn layout on a 10-wide field.
pub const SPAWN_PIVOT: GridCoordinate = GridCoordinate::new(-1, 4);

const fn gc(row: i32, col: i32) -> GridCoordinate {
    GridCoordinate::new(row, col)
}

/// Spawn cells for a piece kind on a 10-wide field
pub fn spawn_cells(kind: PieceKind) -> [GridCoordinate; 4] {
    match kind {
        PieceKind::I => [gc(-1, 3), gc(-1, 4), gc(-1, 5), gc(-1, 6)],
        PieceKind::O => [gc(-2, 4), gc(-2, 5), gc(-1, 4), gc(-1, 5)],
        PieceKind::T => [gc(-2, 4), gc(-1, 3), gc(-1, 4), gc(-1, 5)],
        PieceKind::S => [gc(-2, 4), gc(-2, 5), gc(-1, 3), gc(-1, 4)],
        PieceKind::Z => [gc(-2, 3), gc(-2, 4), gc(-1, 4), gc(-1, 5)],
        PieceKind::J => [gc(-2, 3), gc(-1, 3), gc(-1, 4), gc(-1, 5)],
        PieceKind::L => [gc(-2, 5), gc(-1, 3), gc(-1, 4), gc(-1, 5)],
    }
}

/// Falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    cells: [GridCoordinate; 4],
    pivot: GridCoordinate,
    rotation: Rotation,
}

impl Piece {
    /// Create a new piece in spawn orientation on a 10-wide field
    pub fn spawn(kind: PieceKind) -> Self {
        Self::spawn_for_width(kind, GRID_COLS)
    }

    /// Spawn layout re-centered for a field `cols` wide.
    pub fn spawn_for_width(kind: PieceKind, cols: u16) -> Self {
        let shift = cols as i32 / 2 - GRID_COLS as i32 / 2;
        Self {
            kind,
            cells: spawn_cells(kind).map(|c| c.offset(0, shift)),
            pivot: SPAWN_PIVOT.offset(0, shift),
            rotation: Rotation::North,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn cells(&self) -> &[GridCoordinate; 4] {
        &self.cells
    }

    pub fn pivot(&self) -> GridCoordinate {
        self.pivot
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn color(&self) -> (u8, u8, u8) {
        self.kind.color()
    }

    pub fn family(&self) -> RotationFamily {
        RotationFamily::of(self.kind)
    }

    /// Cells and pivot shifted by `(d_row, d_col)`. Does not check legality.
    pub fn translate(&self, d_row: i32, d_col: i32) -> ([GridCoordinate; 4], GridCoordinate) {
        (
            self.cells.map(|c| c.offset(d_row, d_col)),
            self.pivot.offset(d_row, d_col),
        )
    }

    /// Same piece moved by `(d_row, d_col)` without any collision check.
    pub fn shifted(mut self, d_row: i32, d_col: i32) -> Self {
        (self.cells, self.pivot) = self.translate(d_row, d_col);
        self
    }

    /// Check if every cell is free on the grid
    pub fn fits(&self, grid: &Grid) -> bool {
        self.cells.iter().all(|&c| grid.is_free(c))
    }

    fn try_shift(&mut self, d_row: i32, d_col: i32, legal: impl Fn(GridCoordinate) -> bool) -> bool {
        let (cells, pivot) = self.translate(d_row, d_col);
        if !cells.iter().all(|&c| legal(c)) {
            return false;
        }
        self.cells = cells;
        self.pivot = pivot;
        true
    }

    /// Move one row down. Returns false (piece unchanged) when blocked;
    /// the caller treats that as "landed".
    pub fn move_down(&mut self, grid: &Grid) -> bool {
        self.try_shift(1, 0, |c| grid.is_free(c))
    }

    /// Move one column left. Every target cell must be an empty field cell,
    /// so a piece still partly above the field cannot slide.
    pub fn move_left(&mut self, grid: &Grid) -> bool {
        self.try_shift(0, -1, |c| grid.is_empty_at(c))
    }

    pub fn move_right(&mut self, grid: &Grid) -> bool {
        self.try_shift(0, 1, |c| grid.is_empty_at(c))
    }

    /// Rotate with wall kicks. Returns false (piece unchanged) when every
    /// kick candidate is blocked.
    pub fn rotate(&mut self, direction: RotationDirection, grid: &Grid) -> bool {
        match try_rotate(
            self.family(),
            &self.cells,
            self.pivot,
            self.rotation,
            direction,
            |c| grid.is_free(c),
        ) {
            Some(rotated) => {
                self.cells = rotated.cells;
                self.pivot = rotated.pivot;
                self.rotation = rotated.rotation;
                true
            }
            None => false,
        }
    }

    pub fn rotate_cw(&mut self, grid: &Grid) -> bool {
        self.rotate(RotationDirection::Clockwise, grid)
    }

    pub fn rotate_ccw(&mut self, grid: &Grid) -> bool {
        self.rotate(RotationDirection::CounterClockwise, grid)
    }

    /// True once at least one cell has entered the field.
    pub fn is_visible(&self) -> bool {
        self.cells.iter().any(|c| c.row >= 0)
    }

    /// True while any cell is still above the field.
    pub fn extends_above_field(&self) -> bool {
        self.cells.iter().any(|c| c.row < 0)
    }

    /// Landing preview: a copy dropped until blocked.
    pub fn ghost(&self, grid: &Grid) -> Piece {
        let mut ghost = *self;
        while ghost.move_down(grid) {}
        ghost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_layouts_sit_above_the_field() {
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind);
            assert!(!piece.is_visible(), "{:?} spawned visible", kind);
            assert_eq!(piece.rotation(), Rotation::North);
            let lowest = piece.cells().iter().map(|c| c.row).max().unwrap();
            assert_eq!(lowest, -1, "{:?}", kind);
        }
    }

    #[test]
    fn lateral_moves_wait_for_the_whole_piece_to_enter() {
        let grid = Grid::default();
        let mut piece = Piece::spawn(PieceKind::T);
        assert!(!piece.move_left(&grid));
        assert!(!piece.move_right(&grid));
        assert_eq!(piece, Piece::spawn(PieceKind::T));

        // Bottom row entered, top cell still at row -1.
        assert!(piece.move_down(&grid));
        assert!(piece.is_visible());
        assert!(!piece.move_left(&grid));
        assert!(!piece.move_right(&grid));

        assert!(piece.move_down(&grid));
        assert!(!piece.extends_above_field());
        assert!(piece.move_left(&grid));
        assert!(piece.move_right(&grid));
    }

    #[test]
    fn wide_field_recenters_spawn() {
        let piece = Piece::spawn_for_width(PieceKind::I, 20);
        let cols: Vec<i32> = piece.cells().iter().map(|c| c.col).collect();
        assert_eq!(cols, vec![8, 9, 10, 11]);
        assert_eq!(piece.pivot(), GridCoordinate::new(-1, 9));
    }

    #[test]
    fn shifted_moves_pivot_with_cells() {
        let piece = Piece::spawn(PieceKind::T).shifted(5, -2);
        assert_eq!(piece.pivot(), GridCoordinate::new(4, 2));
        assert!(piece.cells().contains(&GridCoordinate::new(3, 2)));
    }

    #[test]
    fn ghost_does_not_move_original() {
        let grid = Grid::default();
        let piece = Piece::spawn(PieceKind::J);
        let ghost = piece.ghost(&grid);
        assert_eq!(piece, Piece::spawn(PieceKind::J));
        assert_eq!(ghost.cells().iter().map(|c| c.row).max(), Some(19));
    }
}
