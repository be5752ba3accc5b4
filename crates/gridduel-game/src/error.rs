//! Error types for the game engine.

/// Why a move was rejected. No variant ever mutates the game state.
///
/// The `Display` text is what the browser client shows; the server may
/// collapse it to a generic "Invalid move" depending on configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The game already has a winner.
    #[error("Invalid move: game is over")]
    GameOver,

    /// The requesting slot does not own the current turn.
    #[error("Invalid move: not your turn")]
    TurnViolation,

    /// `character` or `direction` is missing, or the direction is unknown.
    #[error("Invalid move")]
    MalformedMove,

    /// The mover has no piece of the requested kind on the board.
    #[error("Character not found on board")]
    PieceNotFound,

    /// The destination lies outside the board.
    #[error("Invalid move direction")]
    OutOfBounds,

    /// The destination holds one of the mover's own pieces.
    #[error("Cannot move to a position occupied by your own piece")]
    SelfCapture,
}
