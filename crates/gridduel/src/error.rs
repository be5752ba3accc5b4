//! Unified error type for the Gridduel server.

use gridduel_transport::TransportError;

/// Top-level error for failures of the server itself.
///
/// Client mistakes never surface here: rejected moves, undecodable frames
/// and a full table all become `error` messages to the offending client.
#[derive(Debug, thiserror::Error)]
pub enum GridduelError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The table actor has stopped and no longer accepts commands.
    #[error("table is unavailable")]
    TableUnavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::SendFailed(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "gone",
        ));
        let gridduel_err: GridduelError = err.into();
        assert!(matches!(gridduel_err, GridduelError::Transport(_)));
        assert!(gridduel_err.to_string().contains("gone"));
    }

    #[test]
    fn test_table_unavailable_display() {
        assert_eq!(
            GridduelError::TableUnavailable.to_string(),
            "table is unavailable"
        );
    }
}
