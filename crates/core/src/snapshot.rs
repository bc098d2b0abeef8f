//! Read-only copy of what the rendering layer needs from a board.

use crate::board::{Board, PieceState};
use crate::tetromino::Tetromino;
use crate::types::{Cell, Square};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub columns: u16,
    pub rows: u16,
    /// Locked cells, row-major
    pub cells: Vec<Cell>,
    /// The falling piece, if one is still falling
    pub falling: Option<Tetromino>,
    pub next: Option<Tetromino>,
    pub topped_out: bool,
}

impl GameSnapshot {
    /// Locked square or falling-piece square at `(col, row)`
    pub fn square_at(&self, col: i32, row: i32) -> Cell {
        if col < 0 || row < 0 || col >= self.columns as i32 || row >= self.rows as i32 {
            return None;
        }
        if let Some(piece) = self.falling {
            if piece.cells().contains(&(col, row)) {
                return Some(Square::Piece(piece.kind()));
            }
        }
        self.cells[row as usize * self.columns as usize + col as usize]
    }
}

impl Board {
    /// Copy the board into `out`, reusing its allocation
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.columns = self.columns();
        out.rows = self.rows();
        out.cells.clear();
        out.cells.extend_from_slice(self.cells());
        out.falling = match self.piece_state() {
            PieceState::Falling => Some(*self.current_tetromino()),
            PieceState::Locked => None,
        };
        out.next = Some(*self.next_tetromino());
        out.topped_out = self.is_topped_out();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
