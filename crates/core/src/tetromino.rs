//! Runtime piece instance
//!
//! A `Tetromino` is a `TetrominoSpec` reference plus a rotation state and a grid offset.
//! It never touches the board; the board asks it for candidate positions
//! (`shifted`, `rotated`) and keeps or discards them.

use arrayvec::ArrayVec;

use crate::specs::{spec, Coord, TetrominoSpec};
use crate::types::{ShapeKind, ROTATION_STATES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetromino {
    spec: &'static TetrominoSpec,
    rotation: u8,
    /// Top-left anchor of the local frame, `(column, row)`
    col: i32,
    row: i32,
}

impl Tetromino {
    pub fn new(kind: ShapeKind, rotation: usize, col: i32, row: i32) -> Self {
        Self {
            spec: spec(kind),
            rotation: (rotation % ROTATION_STATES) as u8,
            col,
            row,
        }
    }

    /// Canonical spawn placement: rotation state 0, bounding box centred
    /// horizontally and the topmost square on row 0.
    pub fn spawn(kind: ShapeKind, total_columns: u16) -> Self {
        let coords = spec(kind).base_coords(0);
        let min_col = coords.iter().map(|&(c, _)| c).min().unwrap_or(0);
        let max_col = coords.iter().map(|&(c, _)| c).max().unwrap_or(0);
        let min_row = coords.iter().map(|&(_, r)| r).min().unwrap_or(0);

        let width = max_col - min_col + 1;
        let col = (total_columns as i32 - width) / 2 - min_col;
        Self::new(kind, 0, col, -min_row)
    }

    pub fn kind(&self) -> ShapeKind {
        self.spec.kind()
    }

    pub fn spec(&self) -> &'static TetrominoSpec {
        self.spec
    }

    pub fn css_class(&self) -> &'static str {
        self.spec.css_class()
    }

    pub fn rotation(&self) -> usize {
        self.rotation as usize
    }

    /// `(column, row)` of the local frame origin
    pub fn offset(&self) -> Coord {
        (self.col, self.row)
    }

    /// Absolute board cells occupied by this piece
    pub fn cells(&self) -> [Coord; 4] {
        let base = *self.spec.base_coords(self.rotation());
        base.map(|(dc, dr)| (self.col + dc, self.row + dr))
    }

    /// Distinct occupied rows, top to bottom
    pub fn rows(&self) -> ArrayVec<i32, 4> {
        let mut rows = ArrayVec::<i32, 4>::new();
        for (_, row) in self.cells() {
            if !rows.contains(&row) {
                rows.push(row);
            }
        }
        rows.sort_unstable();
        rows
    }

    /// Same piece moved by `(dc, dr)`
    pub fn shifted(&self, dc: i32, dr: i32) -> Self {
        Self {
            col: self.col + dc,
            row: self.row + dr,
            ..*self
        }
    }

    /// Same piece in the next rotation state
    pub fn rotated(&self) -> Self {
        Self {
            rotation: ((self.rotation() + 1) % ROTATION_STATES) as u8,
            ..*self
        }
    }
}
