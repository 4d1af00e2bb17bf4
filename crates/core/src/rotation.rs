//! Rotation module - SRS rotation families and wall kick tables
//!
//! Rotation is a pure function over `(cells, pivot, rotation, direction)` plus a
//! collision predicate. Each family owns its own transform and kick table:
//!
//! - **O**: identity; always accepted, geometry never changes
//! - **I**: rotates about the center of its 4x4 box, which sits half a cell
//!   below and right of the stored pivot
//! - **JLSTZ**: rotates about the stored pivot (center of the 3x3 box)
//!
//! Kick offsets are `(d_row, d_col)` with rows growing downward.
//! Reference: https://tetris.wiki/Super_Rotation_System

use crate::types::{GridCoordinate, PieceKind, Rotation, RotationDirection};

/// `(d_row, d_col)` translation applied after the raw rotation.
pub type Offset = (i32, i32);

/// Five candidate offsets for each of the eight transitions.
/// Order: 0=basic rotation, 1-4=wall kicks
pub type KickTable = [[Offset; 5]; 8];

/// Rotation family a piece kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationFamily {
    I,
    O,
    Jlstz,
}

impl RotationFamily {
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => RotationFamily::I,
            PieceKind::O => RotationFamily::O,
            PieceKind::T | PieceKind::S | PieceKind::Z | PieceKind::J | PieceKind::L => {
                RotationFamily::Jlstz
            }
        }
    }
}

/// Get kick table for a rotation family
pub fn kick_table(family: RotationFamily) -> &'static KickTable {
    match family {
        RotationFamily::O => &O_KICKS,
        RotationFamily::I => &I_KICKS,
        RotationFamily::Jlstz => &JLSTZ_KICKS,
    }
}

/// Candidate offsets for rotating out of `from` in `direction`, in trial order.
pub fn kicks(family: RotationFamily, from: Rotation, direction: RotationDirection) -> &'static [Offset; 5] {
    &kick_table(family)[kick_index(from, direction)]
}

const O_KICKS: KickTable = [[(0, 0); 5]; 8];

const JLSTZ_KICKS: KickTable = [
    // 0->R
    [(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)],
    // R->0
    [(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],
    // R->2
    [(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],
    // 2->R
    [(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)],
    // 2->L
    [(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],
    // L->2
    [(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)],
    // L->0
    [(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)],
    // 0->L
    [(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],
];

const I_KICKS: KickTable = [
    // 0->R
    [(0, 0), (0, -2), (0, 1), (1, -2), (-2, 1)],
    // R->0
    [(0, 0), (0, 2), (0, -1), (-1, 2), (2, -1)],
    // R->2
    [(0, 0), (0, -1), (0, 2), (-2, -1), (1, 2)],
    // 2->R
    [(0, 0), (0, 1), (0, -2), (2, 1), (-1, -2)],
    // 2->L
    [(0, 0), (0, 2), (0, -1), (-1, 2), (2, -1)],
    // L->2
    [(0, 0), (0, -2), (0, 1), (1, -2), (-2, 1)],
    // L->0
    [(0, 0), (0, 1), (0, -2), (2, 1), (-1, -2)],
    // 0->L
    [(0, 0), (0, -1), (0, 2), (-2, -1), (1, 2)],
];

/// Get the kick index for a rotation transition
fn kick_index(from: Rotation, direction: RotationDirection) -> usize {
    use RotationDirection::{Clockwise as Cw, CounterClockwise as Ccw};
    match (from, direction) {
        (Rotation::North, Cw) => 0,  // 0->R
        (Rotation::East, Ccw) => 1,  // R->0
        (Rotation::East, Cw) => 2,   // R->2
        (Rotation::South, Ccw) => 3, // 2->R
        (Rotation::South, Cw) => 4,  // 2->L
        (Rotation::West, Ccw) => 5,  // L->2
        (Rotation::West, Cw) => 6,   // L->0
        (Rotation::North, Ccw) => 7, // 0->L
    }
}

/// Turn one cell 90° about `pivot`.
///
/// With rows growing downward, clockwise maps `(d_row, d_col)` to
/// `(d_col, -d_row)`. The I box center is `pivot + (0.5, 0.5)`; folding that
/// half-cell back into integer space adds `(0, 1)` clockwise and `(1, 0)`
/// counter-clockwise.
fn rotate_cell(
    family: RotationFamily,
    cell: GridCoordinate,
    pivot: GridCoordinate,
    direction: RotationDirection,
) -> GridCoordinate {
    let d_row = cell.row - pivot.row;
    let d_col = cell.col - pivot.col;

    let (r_row, r_col) = match direction {
        RotationDirection::Clockwise => (d_col, -d_row),
        RotationDirection::CounterClockwise => (-d_col, d_row),
    };

    let (fix_row, fix_col) = match (family, direction) {
        (RotationFamily::I, RotationDirection::Clockwise) => (0, 1),
        (RotationFamily::I, RotationDirection::CounterClockwise) => (1, 0),
        _ => (0, 0),
    };

    GridCoordinate::new(pivot.row + r_row + fix_row, pivot.col + r_col + fix_col)
}

/// Accepted rotation: new geometry plus the kick that made it legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotated {
    pub cells: [GridCoordinate; 4],
    pub pivot: GridCoordinate,
    pub rotation: Rotation,
    pub kick: Offset,
}

/// Try to rotate a piece with wall kicks
///
/// Candidates are tried in table order; the first whose four cells all satisfy
/// `is_free` wins and the pivot moves by the same offset.
/// Returns None if every candidate is blocked.
pub fn try_rotate(
    family: RotationFamily,
    cells: &[GridCoordinate; 4],
    pivot: GridCoordinate,
    rotation: Rotation,
    direction: RotationDirection,
    is_free: impl Fn(GridCoordinate) -> bool,
) -> Option<Rotated> {
    let new_rotation = rotation.step(direction);

    if family == RotationFamily::O {
        return Some(Rotated {
            cells: *cells,
            pivot,
            rotation: new_rotation,
            kick: (0, 0),
        });
    }

    let raw = (*cells).map(|cell| rotate_cell(family, cell, pivot, direction));

    for &(d_row, d_col) in kicks(family, rotation, direction) {
        let candidate = raw.map(|cell| cell.offset(d_row, d_col));
        if candidate.iter().all(|&cell| is_free(cell)) {
            return Some(Rotated {
                cells: candidate,
                pivot: pivot.offset(d_row, d_col),
                rotation: new_rotation,
                kick: (d_row, d_col),
            });
        }
    }

    None
}
