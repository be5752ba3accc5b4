//! Table actor: the one task that owns the [`Table`].
//!
//! Connection tasks never touch the table directly. They send commands
//! through a [`TableHandle`] and the actor handles them one at a time, in
//! arrival order, so a move is validated, applied and broadcast before the
//! next command is even looked at.

use std::collections::HashMap;

use gridduel_game::{GameState, Slot};
use gridduel_protocol::{ClientMessage, Codec};
use gridduel_transport::ConnectionId;
use tokio::sync::{mpsc, oneshot};

use crate::{Delivery, GridduelError, Table};

/// An outbound instruction for one connection's writer task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// An encoded message to send as a text frame.
    Text(String),
    /// Close the connection.
    Close,
}

/// Channel sender for delivering outbound frames to a connection.
pub type OutboundSender = mpsc::UnboundedSender<Outbound>;

/// Commands sent to the table actor through its channel.
pub(crate) enum TableCommand {
    /// A connection opened. `outbound` feeds its writer task.
    Connect {
        conn_id: ConnectionId,
        outbound: OutboundSender,
    },

    /// A text frame arrived from a connection.
    Inbound {
        conn_id: ConnectionId,
        text: String,
    },

    /// A connection closed.
    Disconnect { conn_id: ConnectionId },

    /// Request a copy of the current game.
    Snapshot { reply: oneshot::Sender<GameState> },

    /// Request the occupants of slots A and B.
    Seats {
        reply: oneshot::Sender<[Option<ConnectionId>; 2]>,
    },
}

/// Handle to the running table actor. Cheap to clone.
#[derive(Clone)]
pub struct TableHandle {
    sender: mpsc::Sender<TableCommand>,
}

impl TableHandle {
    /// Registers a new connection. The table replies through `outbound`.
    pub async fn connect(
        &self,
        conn_id: ConnectionId,
        outbound: OutboundSender,
    ) -> Result<(), GridduelError> {
        self.send(TableCommand::Connect { conn_id, outbound }).await
    }

    /// Forwards a raw text frame from a connection.
    pub async fn inbound(
        &self,
        conn_id: ConnectionId,
        text: String,
    ) -> Result<(), GridduelError> {
        self.send(TableCommand::Inbound { conn_id, text }).await
    }

    /// Reports that a connection closed.
    pub async fn disconnect(
        &self,
        conn_id: ConnectionId,
    ) -> Result<(), GridduelError> {
        self.send(TableCommand::Disconnect { conn_id }).await
    }

    /// Returns a copy of the current game.
    pub async fn snapshot(&self) -> Result<GameState, GridduelError> {
        let (reply, rx) = oneshot::channel();
        self.send(TableCommand::Snapshot { reply }).await?;
        rx.await.map_err(|_| GridduelError::TableUnavailable)
    }

    /// Returns who sits in slots A and B, in that order.
    pub async fn seats(
        &self,
    ) -> Result<[Option<ConnectionId>; 2], GridduelError> {
        let (reply, rx) = oneshot::channel();
        self.send(TableCommand::Seats { reply }).await?;
        rx.await.map_err(|_| GridduelError::TableUnavailable)
    }

    async fn send(&self, cmd: TableCommand) -> Result<(), GridduelError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| GridduelError::TableUnavailable)
    }
}

/// The internal actor state. Runs inside a Tokio task.
struct TableActor<C: Codec> {
    table: Table,
    codec: C,
    /// Writer queues of every open connection, seated or not.
    outbound: HashMap<ConnectionId, OutboundSender>,
    receiver: mpsc::Receiver<TableCommand>,
}

impl<C: Codec> TableActor<C> {
    /// Runs the actor loop until every handle is dropped.
    async fn run(mut self) {
        tracing::info!("table actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                TableCommand::Connect { conn_id, outbound } => {
                    self.outbound.insert(conn_id, outbound);
                    let deliveries = self.table.connect(conn_id);
                    self.deliver(deliveries);
                }
                TableCommand::Inbound { conn_id, text } => {
                    let deliveries =
                        match self.codec.decode::<ClientMessage>(&text) {
                            Ok(msg) => self.table.receive(conn_id, msg),
                            Err(e) => {
                                self.table.receive_undecodable(conn_id, &e)
                            }
                        };
                    self.deliver(deliveries);
                }
                TableCommand::Disconnect { conn_id } => {
                    self.table.disconnect(conn_id);
                    // Dropping the sender ends the writer task.
                    self.outbound.remove(&conn_id);
                }
                TableCommand::Snapshot { reply } => {
                    let _ = reply.send(self.table.game().clone());
                }
                TableCommand::Seats { reply } => {
                    let slots = self.table.slots();
                    let _ = reply.send([
                        slots.occupant(Slot::A),
                        slots.occupant(Slot::B),
                    ]);
                }
            }
        }

        tracing::info!("table actor stopped");
    }

    /// Carries out the table's deliveries. Silently drops frames for
    /// connections whose writer is gone.
    fn deliver(&mut self, deliveries: Vec<Delivery>) {
        for delivery in deliveries {
            match delivery {
                Delivery::Send { to, message } => {
                    let text = match self.codec.encode(&message) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::error!(conn = %to, error = %e, "failed to encode message");
                            continue;
                        }
                    };
                    if let Some(sender) = self.outbound.get(&to) {
                        let _ = sender.send(Outbound::Text(text));
                    }
                }
                Delivery::Close(conn_id) => {
                    if let Some(sender) = self.outbound.remove(&conn_id) {
                        let _ = sender.send(Outbound::Close);
                    }
                }
            }
        }
    }
}

/// Spawns the table actor and returns a handle to it.
///
/// `channel_size` bounds the command queue; senders wait when it's full.
pub(crate) fn spawn_table<C: Codec>(
    table: Table,
    codec: C,
    channel_size: usize,
) -> TableHandle {
    let (tx, rx) = mpsc::channel(channel_size.max(1));

    let actor = TableActor {
        table,
        codec,
        outbound: HashMap::new(),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    TableHandle { sender: tx }
}
