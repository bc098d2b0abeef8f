//! Game engine - timers and the game session
//!
//! The core crate decides what a move does; this crate decides when moves
//! happen. A [`GameSession`] owns the board, the score and a
//! [`GameLoopService`] that drives it on a [`Ticker`].
//!
//! - [`ticker`]: repeating timers (tokio-backed and manual)
//! - [`game_loop`]: start/stop/re-arm around a ticker
//! - [`session`]: lifecycle, the run step, game over

pub mod game_loop;
pub mod session;
pub mod ticker;

pub use tlol_tetris_core as core;
pub use tlol_tetris_types as types;

pub use game_loop::GameLoopService;
pub use session::{GameSession, GameView, RunOutcome, SessionPhase};
pub use ticker::{tokio_ticker, ManualTicker, Tick, TickReceiver, Ticker, TokioTicker};
