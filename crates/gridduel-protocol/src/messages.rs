//! Messages that travel on the wire.
//!
//! Every message is a JSON object whose `type` field names the variant.
//! Field names are camelCase to match the browser client.

use gridduel_game::{Board, GameState, MoveIntent, Slot};
use serde::{Deserialize, Serialize};

/// Messages a client sends to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// A move request. A missing `move` object decodes as an empty intent,
    /// which the game rejects as malformed.
    Move {
        #[serde(rename = "move", default)]
        intent: MoveIntent,
    },
}

/// Messages the server sends to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Sent once to a newly seated client.
    Init {
        player: Slot,
        board: Board,
        #[serde(rename = "currentTurn")]
        current_turn: Slot,
    },

    /// Broadcast after every accepted, non-winning move. `winner` is
    /// always `null` here but is still present on the wire.
    Update {
        board: Board,
        #[serde(rename = "currentTurn")]
        current_turn: Slot,
        #[serde(rename = "move")]
        applied: MoveIntent,
        winner: Option<Slot>,
    },

    /// Broadcast after the move that ended the game.
    Win {
        board: Board,
        #[serde(rename = "currentTurn")]
        current_turn: Slot,
        #[serde(rename = "move")]
        applied: MoveIntent,
        winner: Option<Slot>,
    },

    /// Sent to one client only.
    Error { message: String },
}

impl ServerMessage {
    /// The initial snapshot for a client seated at `player`.
    pub fn init(player: Slot, game: &GameState) -> Self {
        Self::Init {
            player,
            board: game.board().clone(),
            current_turn: game.current_turn(),
        }
    }

    /// The broadcast for a move that was just applied to `game`.
    ///
    /// Picks `win` or `update` from the game's winner.
    pub fn after_move(game: &GameState, applied: MoveIntent) -> Self {
        let board = game.board().clone();
        let current_turn = game.current_turn();
        match game.winner() {
            Some(winner) => Self::Win {
                board,
                current_turn,
                applied,
                winner: Some(winner),
            },
            None => Self::Update {
                board,
                current_turn,
                applied,
                winner: None,
            },
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
