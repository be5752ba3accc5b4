//! Game engine for Gridduel.
//!
//! Everything in this crate is pure data and pure functions: no I/O, no
//! async. The server layers above own a single [`GameState`] and feed it
//! move intents one at a time.
//!
//! # Key types
//!
//! - [`Board`] — the 5×5 grid of optional [`Piece`]s
//! - [`Direction`] and [`destination`] — movement rules
//! - [`GameState`] — board, turn ownership, and the game-over flag
//! - [`MoveIntent`] — what a client asks for (fields may be missing)
//! - [`MoveError`] — why a move was rejected

mod board;
mod error;
mod rules;
mod state;

pub use board::{Board, Kind, Piece, Position, Slot, BOARD_SIZE};
pub use error::MoveError;
pub use rules::{destination, Direction};
pub use state::{GameState, MoveIntent, MoveOutcome};
