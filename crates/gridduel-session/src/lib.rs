//! Player slot management for Gridduel.
//!
//! A game has exactly two seats, A and B. [`SlotManager`] hands them out
//! first-come to connections and takes them back on disconnect.
//!
//! ```text
//! Table (above)  ← asks which slot a connection holds
//!     ↕
//! Session Layer (this crate)  ← ConnectionId ↔ Slot
//!     ↕
//! Transport (below)  ← provides ConnectionId
//! ```

mod error;
mod manager;

pub use error::SessionError;
pub use manager::SlotManager;
