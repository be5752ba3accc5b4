//! The slot manager: which connection sits in which seat.
//!
//! # Concurrency note
//!
//! `SlotManager` is plain data. It is owned by the table actor and only
//! touched from that single task, so no locking happens here.

use gridduel_game::Slot;
use gridduel_transport::ConnectionId;

use crate::SessionError;

/// Maps slots A and B to at most one connection each.
///
/// A connection holds at most one slot. Vacated slots are handed to the
/// next connection that asks; there is no reservation or resume.
#[derive(Debug, Default)]
pub struct SlotManager {
    a: Option<ConnectionId>,
    b: Option<ConnectionId>,
}

impl SlotManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seats `conn` in the first free slot, A before B.
    ///
    /// A connection that is already seated gets its existing slot back.
    ///
    /// # Errors
    /// Returns [`SessionError::GameFull`] if both slots are taken.
    pub fn assign(&mut self, conn: ConnectionId) -> Result<Slot, SessionError> {
        if let Some(slot) = self.slot_of(conn) {
            return Ok(slot);
        }

        let slot = if self.a.is_none() {
            self.a = Some(conn);
            Slot::A
        } else if self.b.is_none() {
            self.b = Some(conn);
            Slot::B
        } else {
            return Err(SessionError::GameFull);
        };

        tracing::info!(%conn, %slot, "connection seated");
        Ok(slot)
    }

    /// Frees whichever slot `conn` holds. Idempotent.
    ///
    /// Returns the slot that was freed, if any.
    pub fn release(&mut self, conn: ConnectionId) -> Option<Slot> {
        let slot = self.slot_of(conn)?;
        *self.seat_mut(slot) = None;
        tracing::info!(%conn, %slot, "slot released");
        Some(slot)
    }

    /// Looks up the slot held by `conn`.
    pub fn slot_of(&self, conn: ConnectionId) -> Option<Slot> {
        if self.a == Some(conn) {
            Some(Slot::A)
        } else if self.b == Some(conn) {
            Some(Slot::B)
        } else {
            None
        }
    }

    /// Returns the connection seated at `slot`.
    pub fn occupant(&self, slot: Slot) -> Option<ConnectionId> {
        match slot {
            Slot::A => self.a,
            Slot::B => self.b,
        }
    }

    /// Returns `true` if both slots are taken.
    pub fn is_full(&self) -> bool {
        self.a.is_some() && self.b.is_some()
    }

    fn seat_mut(&mut self, slot: Slot) -> &mut Option<ConnectionId> {
        match slot {
            Slot::A => &mut self.a,
            Slot::B => &mut self.b,
        }
    }
}
