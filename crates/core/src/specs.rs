//! Tetromino specifications - the fixed shape catalog
//!
//! Each shape has four rotation states, each a list of four `(column, row)`
//! offsets inside the piece's local 4x4 frame. All shapes share at least one
//! calibration point so that pieces line up when spawned at the same offset.
//!
//! Reference: http://harddrop.com/wiki/File:SRS-pieces.png

use crate::types::{ShapeKind, ROTATION_STATES};

/// Offset of a single square relative to the piece origin, `(column, row)`
pub type Coord = (i32, i32);

/// The four squares of one rotation state
pub type BaseCoords = [Coord; 4];

/// Immutable description of one shape
#[derive(Debug, PartialEq, Eq)]
pub struct TetrominoSpec {
    kind: ShapeKind,
    base_coords: [BaseCoords; ROTATION_STATES],
}

impl TetrominoSpec {
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn css_class(&self) -> &'static str {
        self.kind.css_class()
    }

    /// Offsets for a rotation state. The state wraps modulo 4.
    pub fn base_coords(&self, rotation: usize) -> &BaseCoords {
        &self.base_coords[rotation % ROTATION_STATES]
    }
}

/// The catalog, in `ShapeKind::ALL` order
static SPECS: [TetrominoSpec; 7] = [
    //   0 1 2 3  0 1 2 3 0 1 2 3 0 1 2 3
    // 0              x             x
    // 1 x x x x      x             x
    // 2              x   x x x x   x
    // 3              x             x
    TetrominoSpec {
        kind: ShapeKind::Line,
        base_coords: [
            [(0, 1), (1, 1), (2, 1), (3, 1)],
            [(2, 0), (2, 1), (2, 2), (2, 3)],
            [(0, 2), (1, 2), (2, 2), (3, 2)],
            [(1, 0), (1, 1), (1, 2), (1, 3)],
        ],
    },
    //   0 1 2 3 0 1 2 3 0 1 2 3 0 1 2 3
    // 0   a b     d a     c d     b c
    // 1   d c     c b     b a     a d
    TetrominoSpec {
        kind: ShapeKind::Square,
        base_coords: [
            [(1, 0), (2, 0), (2, 1), (1, 1)],
            [(2, 0), (2, 1), (1, 1), (1, 0)],
            [(2, 1), (1, 1), (1, 0), (2, 0)],
            [(1, 1), (1, 0), (2, 0), (2, 1)],
        ],
    },
    //   0 1 2 3 0 1 2 3 0 1 2 3 0 1 2 3
    // 0   x       x               x
    // 1 x x x     x x   x x x   x x
    // 2           x       x       x
    TetrominoSpec {
        kind: ShapeKind::T,
        base_coords: [
            [(0, 1), (1, 0), (1, 1), (2, 1)],
            [(1, 0), (1, 1), (1, 2), (2, 1)],
            [(0, 1), (1, 1), (1, 2), (2, 1)],
            [(0, 1), (1, 0), (1, 1), (1, 2)],
        ],
    },
    //   0 1 2 3 0 1 2 3 0 1 2 3 0 1 2 3
    // 0   x x     x             x
    // 1 x x       x x     x x   x x
    // 2             x   x x       x
    TetrominoSpec {
        kind: ShapeKind::SRight,
        base_coords: [
            [(0, 1), (1, 0), (1, 1), (2, 0)],
            [(1, 0), (1, 1), (2, 1), (2, 2)],
            [(0, 2), (1, 1), (1, 2), (2, 1)],
            [(0, 0), (0, 1), (1, 1), (1, 2)],
        ],
    },
    //   0 1 2 3 0 1 2 3 0 1 2 3 0 1 2 3
    // 0 x x         x             x
    // 1   x x     x x   x x     x x
    // 2           x       x x   x
    TetrominoSpec {
        kind: ShapeKind::SLeft,
        base_coords: [
            [(0, 0), (1, 0), (1, 1), (2, 1)],
            [(1, 1), (1, 2), (2, 0), (2, 1)],
            [(0, 1), (1, 1), (1, 2), (2, 2)],
            [(0, 1), (0, 2), (1, 0), (1, 1)],
        ],
    },
    //   0 1 2 3 0 1 2 3 0 1 2 3 0 1 2 3
    // 0 x         x x             x
    // 1 x x x     x     x x x     x
    // 2           x         x   x x
    TetrominoSpec {
        kind: ShapeKind::LRight,
        base_coords: [
            [(0, 0), (0, 1), (1, 1), (2, 1)],
            [(1, 0), (1, 1), (1, 2), (2, 0)],
            [(0, 1), (1, 1), (2, 1), (2, 2)],
            [(0, 2), (1, 0), (1, 1), (1, 2)],
        ],
    },
    //   0 1 2 3 0 1 2 3 0 1 2 3 0 1 2 3
    // 0     x     x             x x
    // 1 x x x     x     x x x     x
    // 2           x x   x         x
    TetrominoSpec {
        kind: ShapeKind::LLeft,
        base_coords: [
            [(0, 1), (1, 1), (2, 0), (2, 1)],
            [(1, 0), (1, 1), (1, 2), (2, 2)],
            [(0, 1), (0, 2), (1, 1), (2, 1)],
            [(0, 0), (1, 0), (1, 1), (1, 2)],
        ],
    },
];

/// The whole catalog
pub fn all_specs() -> &'static [TetrominoSpec; 7] {
    &SPECS
}

/// Look up the spec for a shape
pub fn spec(kind: ShapeKind) -> &'static TetrominoSpec {
    &SPECS[kind.index()]
}

/// Offsets for a shape and rotation state (wraps modulo 4)
pub fn base_coords(kind: ShapeKind, rotation: usize) -> &'static BaseCoords {
    spec(kind).base_coords(rotation)
}
