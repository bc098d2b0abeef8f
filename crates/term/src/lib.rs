//! Terminal rendering module.
//!
//! A small game-oriented rendering layer: [`TermView`] draws into a
//! [`FrameBuffer`] and [`TerminalRenderer`] flushes it to the terminal,
//! writing only what changed since the previous frame.
//!
//! [`layout::CanvasLayout`] decides how big a board square can be on the
//! current screen.

pub mod fb;
pub mod game_view;
pub mod layout;
pub mod renderer;

pub use tlol_tetris_core as core;
pub use tlol_tetris_engine as engine;
pub use tlol_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{TermView, Viewport};
pub use layout::{Borders, CanvasLayout, Dimensions};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
