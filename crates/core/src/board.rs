//! Board module - the grid, the falling piece and the piece queued next
//!
//! The grid is `total_rows x total_columns` cells stored row-major in a flat
//! vector. Coordinates are `(column, row)`, with row 0 at the top.
//!
//! The falling piece is kept apart from the grid until it is inserted, so a
//! cell is never both "falling" and "locked". After insertion the piece stays
//! readable as `current` (its rows feed the line-clear check) but can no longer
//! move; `use_next_tetromino` replaces it.

use crate::rng::{PieceQueue, SimpleRng};
use crate::tetromino::Tetromino;
use crate::types::{BoardSettings, Cell, Direction, RowState, ShapeKind, Square};

/// Lifecycle of the current piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceState {
    Falling,
    Locked,
}

#[derive(Debug, Clone)]
pub struct Board {
    columns: u16,
    rows: u16,
    /// Flat array of cells, row-major order (row * columns + col)
    cells: Vec<Cell>,
    current: Tetromino,
    current_state: PieceState,
    next: Tetromino,
    queue: PieceQueue,
    topped_out: bool,
}

impl Board {
    /// Create a board, seed its bottom rows and deal the first two pieces.
    ///
    /// `settings` are expected to have passed `GameSettings::validate`. The
    /// first piece is placed after the pre-fill; when its spawn cells are
    /// taken the board starts topped out and nothing is falling.
    pub fn new(settings: &BoardSettings, seed: u32) -> Self {
        let columns = settings.total_columns;
        let rows = settings.total_rows;
        let mut queue = PieceQueue::new(seed);
        let current = Tetromino::spawn(queue.draw(), columns);
        let next = Tetromino::spawn(queue.draw(), columns);

        let mut board = Self {
            columns,
            rows,
            cells: vec![None; columns as usize * rows as usize],
            current,
            current_state: PieceState::Locked,
            next,
            queue,
            topped_out: false,
        };

        // Separate stream so the piece order does not depend on the fill.
        let mut rng = SimpleRng::new(seed.rotate_left(16) ^ 0x5EED);
        board.prefill(settings.prefilled_rows, settings.prefill_ratio, &mut rng);
        board.spawn_tetromino(current.kind());
        board
    }

    /// Randomly fill the bottom `count` rows with mushrooms, leaving at least
    /// one hole in every row.
    fn prefill(&mut self, count: u16, ratio: f32, rng: &mut SimpleRng) {
        let count = count.min(self.rows);
        for row in (self.rows - count)..self.rows {
            let row = row as i32;
            for col in 0..self.columns as i32 {
                if rng.chance(ratio) {
                    self.set(col, row, Some(Square::Mushroom));
                }
            }
            if self.row_state(row) == RowState::Full {
                let hole = rng.next_range(self.columns as u32) as i32;
                self.set(hole, row, None);
            }
        }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if self.is_out_of_bounds(col, row) {
            return None;
        }
        Some(row as usize * self.columns as usize + col as usize)
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Get cell at position (col, row)
    /// Returns None if out of bounds
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        self.index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at position (col, row)
    /// Returns false if out of bounds
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) -> bool {
        match self.index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and not locked
    pub fn is_free(&self, col: i32, row: i32) -> bool {
        matches!(self.get(col, row), Some(None))
    }

    pub fn is_out_of_bounds(&self, col: i32, row: i32) -> bool {
        col < 0 || col >= self.columns as i32 || row < 0 || row >= self.rows as i32
    }

    /// Every cell of the piece is inside the grid and unoccupied
    pub fn fits(&self, piece: &Tetromino) -> bool {
        piece
            .cells()
            .iter()
            .all(|&(col, row)| self.is_free(col, row))
    }

    fn row_slice(&self, row: i32) -> &[Cell] {
        let width = self.columns as usize;
        let start = row as usize * width;
        &self.cells[start..start + width]
    }

    /// Classify a row by its occupied-cell count. Out-of-range rows are empty.
    pub fn row_state(&self, row: i32) -> RowState {
        if row < 0 || row >= self.rows as i32 {
            return RowState::Empty;
        }
        let used = self.row_slice(row).iter().filter(|c| c.is_some()).count();
        if used == 0 {
            RowState::Empty
        } else if used == self.columns as usize {
            RowState::Full
        } else {
            RowState::Used
        }
    }

    pub fn current_tetromino(&self) -> &Tetromino {
        &self.current
    }

    pub fn next_tetromino(&self) -> &Tetromino {
        &self.next
    }

    pub fn piece_state(&self) -> PieceState {
        self.current_state
    }

    /// The last spawn attempt was blocked
    pub fn is_topped_out(&self) -> bool {
        self.topped_out
    }

    /// Locked cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of locked cells on the grid
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Try to move or rotate the falling piece.
    ///
    /// Returns false and leaves everything untouched when the result would
    /// leave the grid or overlap a locked cell. `Drop` keeps stepping down and
    /// succeeds if it moved at least once.
    pub fn move_tetromino(&mut self, direction: Direction) -> bool {
        if self.current_state != PieceState::Falling {
            return false;
        }

        match direction {
            Direction::Drop => {
                let mut moved = false;
                while self.try_place(self.current.shifted(0, 1)) {
                    moved = true;
                }
                moved
            }
            Direction::Down => self.try_place(self.current.shifted(0, 1)),
            Direction::Left => self.try_place(self.current.shifted(-1, 0)),
            Direction::Right => self.try_place(self.current.shifted(1, 0)),
            Direction::Up => self.try_place(self.current.rotated()),
        }
    }

    fn try_place(&mut self, candidate: Tetromino) -> bool {
        if self.fits(&candidate) {
            self.current = candidate;
            true
        } else {
            false
        }
    }

    /// Commit the falling piece's squares to the grid.
    ///
    /// Only a falling piece can be inserted; a second call is a no-op that
    /// returns false.
    pub fn insert_falling_tetromino(&mut self) -> bool {
        if self.current_state != PieceState::Falling {
            return false;
        }

        let square = Square::Piece(self.current.kind());
        for (col, row) in self.current.cells() {
            self.set(col, row, Some(square));
        }
        self.current_state = PieceState::Locked;
        true
    }

    /// Remove the full rows among `candidate_rows` and return how many went.
    ///
    /// Candidates are handled top to bottom. Removing a row only moves the
    /// rows above it, so the indices of the remaining (lower) candidates stay
    /// valid.
    pub fn delete_completed_rows(&mut self, candidate_rows: &[i32]) -> usize {
        let mut rows: Vec<i32> = candidate_rows
            .iter()
            .copied()
            .filter(|&row| row >= 0 && row < self.rows as i32)
            .collect();
        rows.sort_unstable();
        rows.dedup();

        let mut deleted = 0;
        for row in rows {
            if self.row_state(row) == RowState::Full {
                self.delete_row(row as usize);
                deleted += 1;
            }
        }
        deleted
    }

    /// Remove a row, shift everything above it down, add an empty top row
    fn delete_row(&mut self, row: usize) {
        let width = self.columns as usize;

        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..row * width, width);
        self.cells[..width].fill(None);
    }

    /// Promote the queued piece to falling and queue a fresh one.
    ///
    /// Returns false when the spawn cells are already taken; the board is then
    /// topped out and the old piece stays where it locked.
    pub fn use_next_tetromino(&mut self) -> bool {
        let kind = self.next.kind();
        if !self.spawn_tetromino(kind) {
            return false;
        }
        self.next = Tetromino::spawn(self.queue.draw(), self.columns);
        true
    }

    /// Put a piece of `kind` at the spawn position as the falling piece.
    pub fn spawn_tetromino(&mut self, kind: ShapeKind) -> bool {
        let piece = Tetromino::spawn(kind, self.columns);
        if !self.fits(&piece) {
            self.topped_out = true;
            return false;
        }
        self.current = piece;
        self.current_state = PieceState::Falling;
        true
    }

    /// Create from row strings for testing: `.` is empty, anything else locked
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let settings = BoardSettings {
            total_columns: rows[0].len() as u16,
            total_rows: rows.len() as u16,
            prefilled_rows: 0,
            prefill_ratio: 0.0,
        };
        let mut board = Self::new(&settings, 1);
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                if ch != '.' {
                    board.set(c as i32, r as i32, Some(Square::Mushroom));
                }
            }
        }
        board
    }

    /// Render rows back to strings for testing
    #[cfg(test)]
    pub(crate) fn to_rows(&self) -> Vec<String> {
        (0..self.rows as i32)
            .map(|r| {
                self.row_slice(r)
                    .iter()
                    .map(|c| if c.is_some() { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_settings(columns: u16, rows: u16) -> BoardSettings {
        BoardSettings {
            total_columns: columns,
            total_rows: rows,
            prefilled_rows: 0,
            prefill_ratio: 0.0,
        }
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(&empty_settings(10, 20), 1);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_row_states() {
        let board = Board::from_rows(&["....", "#...", "####"]);
        assert_eq!(board.row_state(0), RowState::Empty);
        assert_eq!(board.row_state(1), RowState::Used);
        assert_eq!(board.row_state(2), RowState::Full);
        assert_eq!(board.row_state(3), RowState::Empty);
        assert_eq!(board.row_state(-1), RowState::Empty);
    }

    #[test]
    fn test_delete_row_shifts_down() {
        let mut board = Board::from_rows(&["#...", ".#..", "####", "..#."]);
        assert_eq!(board.delete_completed_rows(&[2]), 1);
        assert_eq!(board.to_rows(), vec!["....", "#...", ".#..", "..#."]);
    }

    #[test]
    fn test_delete_adjacent_full_rows() {
        let mut board = Board::from_rows(&["#...", "####", "####", ".#.."]);
        assert_eq!(board.delete_completed_rows(&[2, 1]), 2);
        assert_eq!(board.to_rows(), vec!["....", "....", "#...", ".#.."]);
    }

    #[test]
    fn test_delete_split_full_rows() {
        let mut board = Board::from_rows(&["..#.", "####", "#...", "####"]);
        assert_eq!(board.delete_completed_rows(&[1, 3, 3, 99, -4]), 2);
        assert_eq!(board.to_rows(), vec!["....", "....", "..#.", "#..."]);
    }

    #[test]
    fn test_delete_ignores_non_candidates() {
        let mut board = Board::from_rows(&["....", "####", "#..."]);
        assert_eq!(board.delete_completed_rows(&[2]), 0);
        assert_eq!(board.to_rows(), vec!["....", "####", "#..."]);
    }

    #[test]
    fn test_prefill_never_fills_a_row() {
        let settings = BoardSettings {
            total_columns: 6,
            total_rows: 8,
            prefilled_rows: 3,
            prefill_ratio: 1.0,
        };
        for seed in 1..50 {
            let board = Board::new(&settings, seed);
            for row in 0..5 {
                assert_eq!(board.row_state(row), RowState::Empty);
            }
            for row in 5..8 {
                assert_eq!(board.row_state(row), RowState::Used);
                assert_eq!(
                    board.row_slice(row).iter().filter(|c| c.is_none()).count(),
                    1
                );
            }
            assert!(board
                .cells()
                .iter()
                .flatten()
                .all(|&square| square == Square::Mushroom));
        }
    }

    #[test]
    fn test_insert_twice_is_noop() {
        let mut board = Board::new(&empty_settings(10, 20), 3);
        assert!(board.insert_falling_tetromino());
        let before = board.occupied_count();
        assert!(!board.insert_falling_tetromino());
        assert_eq!(board.occupied_count(), before);
        assert_eq!(board.piece_state(), PieceState::Locked);
        assert!(!board.move_tetromino(Direction::Down));
    }
}
