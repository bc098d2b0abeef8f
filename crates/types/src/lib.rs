//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Everything here is plain data: shape identities, movement directions,
//! board cell contents, row classifications and the game settings value.
//!
//! # Board Coordinates
//!
//! Cells are addressed as `(column, row)`:
//!
//! - **Columns** grow left to right, `0..total_columns`
//! - **Rows** grow top to bottom, `0..total_rows`
//!
//! The default playfield is 10 columns by 20 rows.
//!
//! # Game Timing Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_INTERVAL_MS` | 1000 | One row per second at the start |
//! | `MIN_INTERVAL_MS` | 333 | Fastest tick interval |
//! | `SPEED_INCREMENT_MS` | 50 | Interval reduction per speed step |
//! | `TIME_TO_MAX_SPEED_MS` | 180000 | Play time until the fastest speed |
//!
//! # Examples
//!
//! ```
//! use tlol_tetris_types::{Direction, ShapeKind};
//!
//! assert_eq!(ShapeKind::from_str("tshp"), Some(ShapeKind::T));
//! assert_eq!(ShapeKind::LRight.css_class(), "LSHP_R");
//!
//! // Unknown input directions fall back to a plain downward step.
//! assert_eq!(Direction::from_str("left"), Direction::Left);
//! assert_eq!(Direction::from_str("sideways"), Direction::Down);
//! ```

pub mod error;
pub mod settings;

pub use error::ConfigError;
pub use settings::{BoardSettings, GameSettings, ScoringSettings, SpeedSettings};

/// Default board width in cells
pub const DEFAULT_COLUMNS: u16 = 10;

/// Default board height in cells
pub const DEFAULT_ROWS: u16 = 20;

/// Number of bottom rows randomly filled when a board is created
pub const DEFAULT_PREFILLED_ROWS: u16 = 2;

/// Fraction of cells filled in each pre-filled row
pub const DEFAULT_PREFILL_RATIO: f32 = 0.5;

/// Tick interval at the start of a game (1 row per second)
pub const BASE_INTERVAL_MS: u32 = 1000;

/// Fastest tick interval (1/3 of a second)
pub const MIN_INTERVAL_MS: u32 = 333;

/// How much faster each speed step gets
pub const SPEED_INCREMENT_MS: u32 = 50;

/// Play time needed to reach the fastest speed (3 minutes)
pub const TIME_TO_MAX_SPEED_MS: u32 = 1000 * 60 * 3;

/// Points for every piece that locks into the board
pub const PIECE_LOCK_POINTS: u32 = 10;

/// Row-clear bonus unit; `n` rows cleared at once are worth `n * n` units
pub const SINGLE_ROW_POINTS: u32 = 40;

/// The falling piece must pass this row before the next-piece preview shows
pub const NEXT_PREVIEW_ROW_DELAY: i32 = 2;

/// Number of rotation states per shape
pub const ROTATION_STATES: usize = 4;

/// CSS class used for the randomly pre-filled squares
pub const MUSHROOM_CSS_CLASS: &str = "MUSHROOM";

/// The seven tetromino shapes
///
/// Catalog order matches the shape registry:
/// - **Line**: four in a row
/// - **Square**: 2x2 block
/// - **T**: T-shaped
/// - **SRight** / **SLeft**: the two S/Z skews
/// - **LRight** / **LLeft**: the two L/J hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    Square,
    T,
    SRight,
    SLeft,
    LRight,
    LLeft,
}

impl ShapeKind {
    /// Every shape, in catalog order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Line,
        ShapeKind::Square,
        ShapeKind::T,
        ShapeKind::SRight,
        ShapeKind::SLeft,
        ShapeKind::LRight,
        ShapeKind::LLeft,
    ];

    /// Position of this shape in the catalog
    pub fn index(self) -> usize {
        match self {
            ShapeKind::Line => 0,
            ShapeKind::Square => 1,
            ShapeKind::T => 2,
            ShapeKind::SRight => 3,
            ShapeKind::SLeft => 4,
            ShapeKind::LRight => 5,
            ShapeKind::LLeft => 6,
        }
    }

    /// Shape class tag used by the rendering layer
    pub fn css_class(self) -> &'static str {
        match self {
            ShapeKind::Line => "LINESHP",
            ShapeKind::Square => "SQUARESHP",
            ShapeKind::T => "TSHP",
            ShapeKind::SRight => "SSHP_R",
            ShapeKind::SLeft => "SSHP_L",
            ShapeKind::LRight => "LSHP_R",
            ShapeKind::LLeft => "LSHP_L",
        }
    }

    /// Short lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Square => "square",
            ShapeKind::T => "t",
            ShapeKind::SRight => "s_right",
            ShapeKind::SLeft => "s_left",
            ShapeKind::LRight => "l_right",
            ShapeKind::LLeft => "l_left",
        }
    }

    /// Parse from a short name or a class tag (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tlol_tetris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("line"), Some(ShapeKind::Line));
    /// assert_eq!(ShapeKind::from_str("SSHP_L"), Some(ShapeKind::SLeft));
    /// assert_eq!(ShapeKind::from_str("mushroom"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower || kind.css_class().to_lowercase() == lower)
    }
}

/// Movement requested for the falling piece
///
/// `Up` rotates; `Drop` moves down until blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Down,
    Drop,
    Left,
    Right,
    Up,
}

impl Direction {
    /// Parse an input direction; anything unrecognised becomes `Down`.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "drop" => Direction::Drop,
            "left" => Direction::Left,
            "right" => Direction::Right,
            "up" => Direction::Up,
            _ => Direction::Down,
        }
    }

    /// Whether this direction moves the piece towards the floor
    pub fn is_downward(self) -> bool {
        matches!(self, Direction::Down | Direction::Drop)
    }
}

/// Contents of an occupied board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Square {
    /// Square left behind by a locked tetromino
    Piece(ShapeKind),
    /// Randomly pre-filled square
    Mushroom,
}

impl Square {
    pub fn css_class(self) -> &'static str {
        match self {
            Square::Piece(kind) => kind.css_class(),
            Square::Mushroom => MUSHROOM_CSS_CLASS,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Square)`: Locked square
pub type Cell = Option<Square>;

/// Row classification by occupied-cell count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Empty,
    Used,
    Full,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_values() {
        assert_eq!(BASE_INTERVAL_MS, 1000);
        assert_eq!(MIN_INTERVAL_MS, 333);
        assert_eq!(SPEED_INCREMENT_MS, 50);
        assert_eq!(TIME_TO_MAX_SPEED_MS, 180_000);
    }

    #[test]
    fn shape_index_matches_catalog_order() {
        for (i, kind) in ShapeKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn shape_parse_accepts_names_and_tags() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_str(kind.as_str()), Some(kind));
            assert_eq!(ShapeKind::from_str(kind.css_class()), Some(kind));
        }
        assert_eq!(ShapeKind::from_str(""), None);
    }

    #[test]
    fn direction_normalizes_unknown_to_down() {
        assert_eq!(Direction::from_str("DROP"), Direction::Drop);
        assert_eq!(Direction::from_str("Right"), Direction::Right);
        assert_eq!(Direction::from_str("up"), Direction::Up);
        assert_eq!(Direction::from_str("down"), Direction::Down);
        assert_eq!(Direction::from_str(""), Direction::Down);
        assert_eq!(Direction::from_str("hold"), Direction::Down);
        assert_eq!(Direction::default(), Direction::Down);
    }

    #[test]
    fn square_css_classes() {
        assert_eq!(Square::Piece(ShapeKind::Square).css_class(), "SQUARESHP");
        assert_eq!(Square::Mushroom.css_class(), "MUSHROOM");
    }
}
