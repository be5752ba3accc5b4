//! # Gridduel
//!
//! Authoritative server for a two-player, turn-based duel on a 5×5 grid.
//!
//! The server owns the only copy of the game. Clients submit move intents;
//! the [`Table`] validates them against the game rules and tells every
//! connected client what the board looks like now.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gridduel::prelude::*;
//!
//! # async fn run() -> Result<(), GridduelError> {
//! let server = GridduelServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod actor;
mod config;
mod error;
mod handler;
mod server;
mod table;

pub use actor::{Outbound, OutboundSender, TableHandle};
pub use config::{ErrorDetail, TableConfig};
pub use error::GridduelError;
pub use server::{GridduelServer, GridduelServerBuilder};
pub use table::{Delivery, Table};

/// Everything needed to run a server or drive a [`Table`] directly.
pub mod prelude {
    pub use crate::{
        Delivery, ErrorDetail, GridduelError, GridduelServer,
        GridduelServerBuilder, Table, TableConfig, TableHandle,
    };
    pub use gridduel_game::{
        Board, Direction, GameState, Kind, MoveError, MoveIntent, Piece,
        Position, Slot, BOARD_SIZE,
    };
    pub use gridduel_protocol::{ClientMessage, ServerMessage};
    pub use gridduel_session::SessionError;
    pub use gridduel_transport::ConnectionId;
}
