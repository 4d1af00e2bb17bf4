//! Grid module - the playfield cell matrix
//!
//! Every in-bounds coordinate always has an entry: either empty (`None`) or
//! the kind of the piece that locked there. Storage is a flat row-major array.
//! Coordinates with `row < 0` are the spawn region above the field; they are
//! never stored and read as implicitly empty for collision checks.

use crate::types::{Cell, GridCoordinate, PieceKind, GRID_COLS, GRID_ROWS};

/// The playfield - `rows x cols` cells, fixed for the life of a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: u16,
    cols: u16,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows as usize * cols as usize],
        }
    }

    #[inline(always)]
    fn index(&self, coord: GridCoordinate) -> Option<usize> {
        if !self.has(coord) {
            return None;
        }
        Some(coord.row as usize * self.cols as usize + coord.col as usize)
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// True if `coord` is a stored (in-bounds) cell.
    pub fn has(&self, coord: GridCoordinate) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && coord.row < self.rows as i32
            && coord.col < self.cols as i32
    }

    /// Get cell at `coord`
    /// Returns None if out of bounds
    pub fn get(&self, coord: GridCoordinate) -> Option<Cell> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// Set cell at `coord`
    /// Returns false if out of bounds
    pub fn set(&mut self, coord: GridCoordinate, cell: Cell) -> bool {
        match self.index(coord) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// True if `coord` is in bounds and empty.
    pub fn is_empty_at(&self, coord: GridCoordinate) -> bool {
        matches!(self.get(coord), Some(None))
    }

    /// Collision predicate for descent and rotation.
    ///
    /// A cell is free when its column is inside the walls, it is above the
    /// floor, and it is either above the field or over an empty cell. Lateral
    /// moves use [`Grid::is_empty_at`] instead.
    pub fn is_free(&self, coord: GridCoordinate) -> bool {
        if coord.col < 0 || coord.col >= self.cols as i32 || coord.row >= self.rows as i32 {
            return false;
        }
        coord.row < 0 || self.is_empty_at(coord)
    }

    /// Occupied coordinates with their kinds, in row-major order.
    pub fn filled_coordinates(&self) -> impl Iterator<Item = (GridCoordinate, PieceKind)> + '_ {
        let cols = self.cols as usize;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|kind| {
                (
                    GridCoordinate::new((idx / cols) as i32, (idx % cols) as i32),
                    kind,
                )
            })
        })
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    fn row_slice(&self, row: i32) -> Option<&[Cell]> {
        if row < 0 || row >= self.rows as i32 {
            return None;
        }
        let start = row as usize * self.cols as usize;
        Some(&self.cells[start..start + self.cols as usize])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: i32) -> bool {
        self.row_slice(row)
            .map(|cells| cells.iter().all(|c| c.is_some()))
            .unwrap_or(false)
    }

    /// Full rows, bottom-most first.
    ///
    /// Descending order lets a caller collapse rows downward without
    /// overwriting rows it has not processed yet.
    pub fn rows_to_clear(&self) -> Vec<i32> {
        (0..self.rows as i32)
            .rev()
            .filter(|&row| self.is_row_full(row))
            .collect()
    }

    /// Set every cell in `row` to empty.
    pub fn clear_row(&mut self, row: i32) {
        if row < 0 || row >= self.rows as i32 {
            return;
        }
        let start = row as usize * self.cols as usize;
        self.cells[start..start + self.cols as usize].fill(None);
    }

    /// Move the contents of `from` into `to` and empty `from`.
    fn move_row(&mut self, from: i32, to: i32) {
        let width = self.cols as usize;
        let src = from as usize * width;
        let dst = to as usize * width;
        self.cells.copy_within(src..src + width, dst);
        self.cells[src..src + width].fill(None);
    }

    /// Clear every full row and collapse the rows above it.
    ///
    /// Rows are processed bottom-most first with a running shift count: each
    /// run of surviving rows between two cleared rows moves down by the number
    /// of cleared rows beneath it. Returns the cleared row indices (descending).
    pub fn clear_full_rows(&mut self) -> Vec<i32> {
        let rows_to_clear = self.rows_to_clear();
        let mut shift = 0;

        for &cleared in &rows_to_clear {
            self.clear_row(cleared);
            shift += 1;

            let mut row = cleared - 1;
            while row >= 0 && !rows_to_clear.contains(&row) {
                self.move_row(row, row + shift);
                row -= 1;
            }
        }

        rows_to_clear
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a grid from ASCII rows, top row first: `.` is empty and any
    /// piece letter is that kind. Used by tests and benches.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let cols = rows.first().map(|r| r.chars().count()).unwrap_or(0) as u16;
        let mut grid = Grid::new(rows.len() as u16, cols);
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                let kind = PieceKind::from_str(&ch.to_string());
                grid.set(GridCoordinate::new(r as i32, c as i32), kind);
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_ROWS, GRID_COLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(grid: &mut Grid, row: i32, kind: PieceKind) {
        for col in 0..grid.cols() as i32 {
            grid.set(GridCoordinate::new(row, col), Some(kind));
        }
    }

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::default();
        assert_eq!(grid.index(GridCoordinate::new(0, 0)), Some(0));
        assert_eq!(grid.index(GridCoordinate::new(0, 9)), Some(9));
        assert_eq!(grid.index(GridCoordinate::new(1, 0)), Some(10));
        assert_eq!(grid.index(GridCoordinate::new(19, 9)), Some(199));
        assert_eq!(grid.index(GridCoordinate::new(-1, 0)), None);
        assert_eq!(grid.index(GridCoordinate::new(0, 10)), None);
        assert_eq!(grid.index(GridCoordinate::new(20, 0)), None);
    }

    #[test]
    fn above_field_is_free_but_walls_and_floor_are_not() {
        let grid = Grid::default();
        assert!(grid.is_free(GridCoordinate::new(-3, 0)));
        assert!(!grid.is_free(GridCoordinate::new(-3, -1)));
        assert!(!grid.is_free(GridCoordinate::new(-3, 10)));
        assert!(!grid.is_free(GridCoordinate::new(20, 4)));
    }

    #[test]
    fn non_adjacent_rows_collapse_by_rows_cleared_beneath() {
        let mut grid = Grid::default();
        fill_row(&mut grid, 19, PieceKind::I);
        grid.set(GridCoordinate::new(18, 2), Some(PieceKind::T));
        fill_row(&mut grid, 17, PieceKind::I);
        grid.set(GridCoordinate::new(16, 7), Some(PieceKind::S));

        assert_eq!(grid.clear_full_rows(), vec![19, 17]);

        // Row 18 had one cleared row below it, row 16 had two.
        assert_eq!(grid.get(GridCoordinate::new(19, 2)), Some(Some(PieceKind::T)));
        assert_eq!(grid.get(GridCoordinate::new(18, 7)), Some(Some(PieceKind::S)));
        assert_eq!(grid.filled_count(), 2);
    }

    #[test]
    fn from_ascii_reads_letters_as_kinds() {
        let grid = Grid::from_ascii(&["..", "IO"]);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.get(GridCoordinate::new(1, 0)), Some(Some(PieceKind::I)));
        assert_eq!(grid.get(GridCoordinate::new(1, 1)), Some(Some(PieceKind::O)));
        assert_eq!(grid.get(GridCoordinate::new(0, 0)), Some(None));
    }
}
