//! Table configuration.

use gridduel_game::MoveError;
use serde::{Deserialize, Serialize};

/// How much a rejected client learns about why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorDetail {
    /// Each rejection carries its own reason.
    #[default]
    Specific,
    /// Every rejected move reads "Invalid move".
    Generic,
}

impl ErrorDetail {
    /// The text sent to a client whose move was rejected.
    pub fn describe(self, error: MoveError) -> String {
        match self {
            Self::Specific => error.to_string(),
            Self::Generic => MoveError::MalformedMove.to_string(),
        }
    }
}

/// Configuration for the single game table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Reason reporting for rejected moves.
    pub error_detail: ErrorDetail,

    /// Capacity of the table actor's command channel. Connection tasks
    /// wait when it's full.
    pub command_buffer: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            error_detail: ErrorDetail::Specific,
            command_buffer: 64,
        }
    }
}
