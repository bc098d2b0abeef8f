//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`InputCommand`]s. Movement commands carry
//! a [`types::Direction`] that goes straight into `GameSession::run`.

pub mod map;

pub use tlol_tetris_types as types;

pub use map::{map_key, InputCommand};
