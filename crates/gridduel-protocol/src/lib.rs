//! Wire protocol for Gridduel.
//!
//! - **Messages** ([`ClientMessage`], [`ServerMessage`]) — closed sets of
//!   JSON objects discriminated by their `type` field.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — conversion between
//!   messages and text frames.
//! - **Errors** ([`ProtocolError`]).
//!
//! ```text
//! Transport (text) → Protocol (ClientMessage) → Table (game + slots)
//! ```

mod codec;
mod error;
mod messages;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use messages::{ClientMessage, ServerMessage};
