//! Board module - manages the game grid
//!
//! The board is a fixed `width x height` grid where each cell is empty or tagged
//! with the piece kind that filled it. Cells live in a flat row-major vector.
//! Coordinates: `(x, y)` with `x` left to right and `y` top to bottom. Rows with
//! `y < 0` are the spawn buffer: always free, never stored.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// A lock wrote at least one mino above the visible top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOut;

impl fmt::Display for LockOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("piece locked above the visible board")
    }
}

impl std::error::Error for LockOut {}

/// The game board using flat vector storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Row-major cells (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board. Dimensions are validated by `EngineConfig`.
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y); `None` if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// True for filled cells and for anything outside the grid on any side.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        !matches!(self.get(x, y), Some(None))
    }

    /// Whether a single cell may hold a mino
    #[inline]
    fn is_free(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= self.width as i8 || y >= self.height as i8 {
            return false;
        }
        y < 0 || matches!(self.get(x, y), Some(None))
    }

    /// Check whether every coordinate may hold a mino.
    ///
    /// Out of bounds left, right or below is invalid, as is an occupied cell.
    /// Anything above the top row is valid.
    pub fn is_valid(&self, cells: &[(i8, i8)]) -> bool {
        cells.iter().all(|&(x, y)| self.is_free(x, y))
    }

    /// Write a piece's cells with the given color tag.
    ///
    /// Visible cells are always written. If any cell lies above the top row the
    /// caller gets `Err(LockOut)` and must end the game.
    pub fn lock(&mut self, cells: &[(i8, i8)], kind: PieceKind) -> Result<(), LockOut> {
        let mut above_top = false;
        for &(x, y) in cells {
            if y < 0 {
                above_top = true;
                continue;
            }
            if let Some(idx) = self.index(x, y) {
                self.cells[idx] = Some(kind);
            }
        }
        if above_top {
            Err(LockOut)
        } else {
            Ok(())
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Row indices (ascending) where every column is occupied.
    ///
    /// A single lock touches at most 4 rows, so at most 4 can be full at once.
    pub fn full_rows(&self) -> ArrayVec<usize, 4> {
        let mut rows = ArrayVec::new();
        for y in 0..self.height as usize {
            if self.is_row_full(y) && rows.try_push(y).is_err() {
                break;
            }
        }
        rows
    }

    /// Remove the given rows and compact everything above them downward.
    ///
    /// Surviving rows keep their relative order; empty rows fill the top.
    /// Indices outside the board are ignored.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        let width = self.width as usize;
        let mut write_y = self.height as usize;

        // Two-pointer compaction, scanning bottom to top
        for read_y in (0..self.height as usize).rev() {
            if rows.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Read-only row-major view of every cell
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Set cell at position (x, y); returns false if out of bounds
    #[cfg(test)]
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Fill the listed rows completely except for the `holes` columns (tests only).
    #[cfg(test)]
    pub fn fill_rows(&mut self, rows: std::ops::Range<i8>, holes: &[i8], kind: PieceKind) {
        for y in rows {
            for x in 0..self.width as i8 {
                if !holes.contains(&x) {
                    self.set(x, y, Some(kind));
                }
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::default();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_spawn_buffer_is_valid() {
        let board = Board::default();
        assert!(board.is_valid(&[(0, -1), (9, -3)]));
        assert!(!board.is_valid(&[(-1, -1)]));
        assert!(!board.is_valid(&[(10, -1)]));
        assert!(!board.is_valid(&[(0, 20)]));
    }

    #[test]
    fn test_occupied_cell_is_invalid() {
        let mut board = Board::default();
        board.set(4, 10, Some(PieceKind::Z));
        assert!(!board.is_valid(&[(3, 10), (4, 10)]));
        assert!(board.is_valid(&[(3, 10), (5, 10)]));
    }

    #[test]
    fn test_lock_writes_tag() {
        let mut board = Board::default();
        assert_eq!(
            board.lock(&[(0, 19), (1, 19), (2, 19), (3, 19)], PieceKind::I),
            Ok(())
        );
        assert_eq!(board.get(2, 19), Some(Some(PieceKind::I)));
        assert_eq!(board.get(4, 19), Some(None));
    }

    #[test]
    fn test_lock_above_top_reports_lock_out() {
        let mut board = Board::default();
        let result = board.lock(&[(4, -1), (4, 0), (5, 0), (6, 0)], PieceKind::L);
        assert_eq!(result, Err(LockOut));
        // Visible cells were still written.
        assert_eq!(board.get(4, 0), Some(Some(PieceKind::L)));
    }

    #[test]
    fn test_full_rows() {
        let mut board = Board::default();
        board.fill_rows(17..20, &[], PieceKind::O);
        board.fill_rows(16..17, &[3], PieceKind::O);
        assert_eq!(board.full_rows().as_slice(), &[17, 18, 19]);
    }

    #[test]
    fn test_remove_rows_compacts() {
        let mut board = Board::new(4, 8);
        // Tag each row by its index so order can be checked.
        let tags = [
            PieceKind::I,
            PieceKind::O,
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::J,
            PieceKind::L,
            PieceKind::I,
        ];
        for (y, kind) in tags.iter().enumerate() {
            board.set(0, y as i8, Some(*kind));
        }

        board.remove_rows(&[2, 5]);

        assert_eq!(board.get(0, 0), Some(None));
        assert_eq!(board.get(0, 1), Some(None));
        assert_eq!(board.get(0, 2), Some(Some(PieceKind::I)));
        assert_eq!(board.get(0, 3), Some(Some(PieceKind::O)));
        assert_eq!(board.get(0, 4), Some(Some(PieceKind::S)));
        assert_eq!(board.get(0, 5), Some(Some(PieceKind::Z)));
        assert_eq!(board.get(0, 6), Some(Some(PieceKind::L)));
        assert_eq!(board.get(0, 7), Some(Some(PieceKind::I)));
    }

    #[test]
    fn test_out_of_bounds_counts_as_occupied() {
        let board = Board::default();
        assert!(board.is_occupied(-1, 5));
        assert!(board.is_occupied(10, 5));
        assert!(board.is_occupied(3, 20));
        assert!(board.is_occupied(3, -1));
        assert!(!board.is_occupied(3, 5));
    }

    #[test]
    fn test_clear() {
        let mut board = Board::default();
        board.fill_rows(0..20, &[], PieceKind::T);
        board.clear();
        assert!(board.cells().iter().all(|c| c.is_none()));
    }
}
