//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data with no external dependencies, so they can be used
//! by the simulation core, the terminal renderer and the input layer alike.
//!
//! # Coordinates
//!
//! Cells are addressed by [`GridCoordinate`] `(row, col)`:
//!
//! - `row` grows downward, `col` grows rightward
//! - `row` may be negative: the region above the playfield is where pieces spawn
//!
//! # Timing Constants
//!
//! All timing values are milliseconds on the controller's logical clock:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host frame interval (~60 FPS) |
//! | `LATERAL_REPEAT_MS` | 60 | Minimum spacing of left/right steps |
//! | `SOFT_DROP_INTERVAL_MS` | 20 | Minimum spacing of soft-drop steps |
//! | `BASE_GRAVITY_MS` | 1000 | Gravity at level 1 |
//! | `GRAVITY_STEP_MS` | 100 | Gravity speed-up per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity floor |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GridCoordinate, PieceKind, Rotation};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! let coord: GridCoordinate = "row=-1,col=4".parse().unwrap();
//! assert_eq!(coord, GridCoordinate::new(-1, 4));
//! ```

use std::fmt;

/// Canonical playfield height (20 rows)
pub const GRID_ROWS: u16 = 20;

/// Canonical playfield width (10 columns)
pub const GRID_COLS: u16 = 10;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Lateral auto-repeat window: at most one left/right step per 60ms.
pub const LATERAL_REPEAT_MS: u64 = 60;

/// Soft drop window: at most one soft-drop step per 20ms.
pub const SOFT_DROP_INTERVAL_MS: u64 = 20;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_GRAVITY_MS: u64 = 1000;

/// Gravity speed-up per level above 1
pub const GRAVITY_STEP_MS: u64 = 100;

/// Gravity never gets faster than this
pub const DROP_INTERVAL_MIN_MS: u64 = 100;

/// Default number of pieces kept in the look-ahead queue
pub const DEFAULT_QUEUE_SIZE: usize = 5;

/// Maximum number of queued pieces exposed to renderers
pub const PREVIEW_CAP: usize = 5;

/// Gravity interval for a level: `1000 - (level - 1) * 100`, floored.
///
/// ```
/// use blockfall_types::gravity_interval_ms;
///
/// assert_eq!(gravity_interval_ms(1), 1000);
/// assert_eq!(gravity_interval_ms(8), 300);
/// assert_eq!(gravity_interval_ms(40), 100);
/// ```
pub fn gravity_interval_ms(level: u32) -> u64 {
    let speedup = (level.max(1) as u64 - 1).saturating_mul(GRAVITY_STEP_MS);
    BASE_GRAVITY_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}

/// A cell address on the playfield.
///
/// Rows above the visible field are negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoordinate {
    pub row: i32,
    pub col: i32,
}

impl GridCoordinate {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Shift by `(d_row, d_col)`.
    #[inline]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row={},col={}", self.row, self.col)
    }
}

/// Error returned when a `row=R,col=C` encoding cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateParseError {
    input: String,
}

impl CoordinateParseError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for CoordinateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed grid coordinate: {:?}", self.input)
    }
}

impl std::error::Error for CoordinateParseError {}

impl std::str::FromStr for GridCoordinate {
    type Err = CoordinateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || CoordinateParseError {
            input: s.to_string(),
        };

        let (row_part, col_part) = s.split_once(',').ok_or_else(err)?;
        let row = row_part
            .strip_prefix("row=")
            .and_then(|v| v.parse::<i32>().ok())
            .ok_or_else(err)?;
        let col = col_part
            .strip_prefix("col=")
            .and_then(|v| v.parse::<i32>().ok())
            .ok_or_else(err)?;

        Ok(Self { row, col })
    }
}

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase letter, as shown in previews.
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Display color as `(r, g, b)`.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0x00, 0xff, 0xff),
            PieceKind::O => (0xff, 0xff, 0x00),
            PieceKind::T => (0x80, 0x00, 0x80),
            PieceKind::S => (0x00, 0xff, 0x00),
            PieceKind::Z => (0xff, 0x00, 0x00),
            PieceKind::J => (0x00, 0x00, 0xff),
            PieceKind::L => (0xff, 0x7f, 0x00),
        }
    }
}

/// Orientation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation
/// - **East**: One clockwise step from spawn
/// - **South**: Two steps from spawn in either direction
/// - **West**: One counter-clockwise step from spawn
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Step one position in `direction`.
    pub fn step(&self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.rotate_cw(),
            RotationDirection::CounterClockwise => self.rotate_ccw(),
        }
    }

    /// SRS state label: `0`, `R`, `2`, `L`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "0",
            Rotation::East => "R",
            Rotation::South => "2",
            Rotation::West => "L",
        }
    }
}

/// Direction of a single 90° turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Player controls understood by the controller.
///
/// Rotation, hold and hard drop are edge-triggered (one action per press);
/// left, right and down are level-triggered (active while held).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Down,
    RotateCw,
    RotateCcw,
    Hold,
    HardDrop,
}

impl Control {
    /// True for controls that stay active while the key is held.
    pub fn is_level_triggered(&self) -> bool {
        matches!(self, Control::Left | Control::Right | Control::Down)
    }
}

/// A key transition delivered by an input source.
///
/// `Repeat` is the host's auto-repeat of an already held key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    Press(Control),
    Repeat(Control),
    Release(Control),
}

/// A cell on the playfield
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Occupied, tagged with the kind that locked there
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_curve_is_linear_then_floored() {
        assert_eq!(gravity_interval_ms(0), 1000);
        assert_eq!(gravity_interval_ms(1), 1000);
        assert_eq!(gravity_interval_ms(2), 900);
        assert_eq!(gravity_interval_ms(10), 100);
        assert_eq!(gravity_interval_ms(11), 100);
        assert_eq!(gravity_interval_ms(u32::MAX), 100);
    }

    #[test]
    fn coordinate_encoding_roundtrips_negative_rows() {
        let c = GridCoordinate::new(-2, 7);
        assert_eq!(c.to_string(), "row=-2,col=7");
        assert_eq!("row=-2,col=7".parse::<GridCoordinate>(), Ok(c));
    }

    #[test]
    fn coordinate_decoding_rejects_malformed_input() {
        for bad in ["", "row=1", "col=1,row=2", "row=a,col=1", "row=1,col=", "row=1,col=2,"] {
            assert!(bad.parse::<GridCoordinate>().is_err(), "accepted {:?}", bad);
        }
    }
}
