//! The game state machine.
//!
//! ```text
//! ┌──────────────┐  apply_move (no edge reached)  ┌──────────────┐
//! │ turn: A      │ ─────────────────────────────→ │ turn: B      │
//! │ over: false  │ ←───────────────────────────── │ over: false  │
//! └──────┬───────┘                                └──────┬───────┘
//!        │ apply_move lands on row 0 or row N-1          │
//!        ▼                                               ▼
//!                 ┌───────────────────────────┐
//!                 │ over: true, winner: mover │  (terminal)
//!                 └───────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::{destination, Board, Direction, Kind, MoveError, Piece, Position, Slot};

/// A move as submitted by a client.
///
/// Both fields are optional because clients can omit them; a missing field
/// is rejected as [`MoveError::MalformedMove`] only after the turn check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
}

impl MoveIntent {
    pub fn new(character: Kind, direction: Direction) -> Self {
        Self {
            character: Some(character.code().to_string()),
            direction: Some(direction.to_string()),
        }
    }
}

/// The result of a successfully applied move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub piece: Piece,
    pub from: Position,
    pub to: Position,
    /// The opposing piece that was overwritten, if any.
    pub captured: Option<Piece>,
    /// Set when the move ended the game.
    pub winner: Option<Slot>,
}

impl MoveOutcome {
    pub fn is_win(&self) -> bool {
        self.winner.is_some()
    }
}

/// The authoritative game: board, whose turn it is, and whether it's over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_turn: Slot,
    over: bool,
    winner: Option<Slot>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A fresh game: starting layout, A to move.
    pub fn new() -> Self {
        Self::with_board(Board::starting(), Slot::A)
    }

    /// A game from an arbitrary position.
    pub fn with_board(board: Board, current_turn: Slot) -> Self {
        Self {
            board,
            current_turn,
            over: false,
            winner: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Slot {
        self.current_turn
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn winner(&self) -> Option<Slot> {
        self.winner
    }

    /// Validates and applies a move for `slot`.
    ///
    /// Checks run in a fixed order: game over, turn, well-formedness,
    /// piece lookup, bounds, self-capture. The first failing check wins and
    /// the state is left untouched.
    ///
    /// Landing on row 0 or the last row wins for the mover, whichever edge
    /// it is. Otherwise the turn passes to the other slot.
    pub fn apply_move(
        &mut self,
        slot: Slot,
        intent: &MoveIntent,
    ) -> Result<MoveOutcome, MoveError> {
        if self.over {
            return Err(MoveError::GameOver);
        }
        if slot != self.current_turn {
            return Err(MoveError::TurnViolation);
        }

        // Empty strings count as missing.
        fn present(field: &Option<String>) -> Option<&str> {
            field.as_deref().filter(|s| !s.is_empty())
        }
        let (Some(character), Some(direction)) =
            (present(&intent.character), present(&intent.direction))
        else {
            return Err(MoveError::MalformedMove);
        };
        let direction: Direction =
            direction.parse().map_err(|_| MoveError::MalformedMove)?;
        let kind: Kind =
            character.parse().map_err(|_| MoveError::PieceNotFound)?;

        let from = self
            .board
            .find_piece(slot, kind)
            .ok_or(MoveError::PieceNotFound)?;
        let to = destination(from, direction, kind)
            .ok_or(MoveError::OutOfBounds)?;

        let captured = self.board.get(to);
        if captured.is_some_and(|p| p.owner == slot) {
            return Err(MoveError::SelfCapture);
        }

        let piece = Piece::new(slot, kind);
        self.board.set(from, None);
        self.board.set(to, Some(piece));

        if to.is_edge_row() {
            self.over = true;
            self.winner = Some(slot);
            tracing::info!(%slot, %piece, %to, "edge row reached, game over");
        } else {
            self.current_turn = slot.other();
        }

        Ok(MoveOutcome {
            piece,
            from,
            to,
            captured,
            winner: self.winner,
        })
    }
}
