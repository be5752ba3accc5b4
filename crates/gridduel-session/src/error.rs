//! Error types for the session layer.

/// Errors that can occur while seating a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Both slots are taken.
    #[error("Game is full")]
    GameFull,
}
