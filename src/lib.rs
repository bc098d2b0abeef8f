//! TLOL Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `tlol_tetris::{core,engine,input,term,types}`
//! so the binary, integration tests and benches share one import path.

pub use tlol_tetris_core as core;
pub use tlol_tetris_engine as engine;
pub use tlol_tetris_input as input;
pub use tlol_tetris_term as term;
pub use tlol_tetris_types as types;
