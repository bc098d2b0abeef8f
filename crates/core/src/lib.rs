//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the game and nothing else: no timers, no
//! terminal, no I/O. Given the same settings and seed it plays out the same
//! way every time.
//!
//! # Module Structure
//!
//! - [`specs`]: the seven shapes and their four rotation-state tables
//! - [`tetromino`]: a piece instance (shape, rotation, grid offset)
//! - [`board`]: grid, collision checks, locking, row clearing, spawning
//! - [`scoring`]: score keeping and the speed curve
//! - [`rng`]: seeded randomness and the bag-of-seven piece queue
//! - [`snapshot`]: read-only board copies for renderers
//!
//! # Example
//!
//! ```
//! use tlol_tetris_core::Board;
//! use tlol_tetris_core::types::{BoardSettings, Direction};
//!
//! let settings = BoardSettings { prefilled_rows: 0, ..BoardSettings::default() };
//! let mut board = Board::new(&settings, 12345);
//!
//! // Slam the piece to the floor and lock it.
//! assert!(board.move_tetromino(Direction::Drop));
//! assert!(!board.move_tetromino(Direction::Down));
//! assert!(board.insert_falling_tetromino());
//!
//! let rows = board.current_tetromino().rows();
//! assert_eq!(board.delete_completed_rows(&rows), 0);
//! assert!(board.use_next_tetromino());
//! ```

pub mod board;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod specs;
pub mod tetromino;

pub use tlol_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, PieceState};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{row_clear_bonus, tick_interval, ScoreSummary, ScoreTracker};
pub use snapshot::GameSnapshot;
pub use specs::{all_specs, base_coords, spec, BaseCoords, Coord, TetrominoSpec};
pub use tetromino::Tetromino;
