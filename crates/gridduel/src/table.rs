//! The table: game state, seats, and the synchronization protocol.
//!
//! `Table` is pure. Each event (connect, message, disconnect) mutates the
//! table and returns the [`Delivery`] list the caller must carry out. It
//! never touches a socket, which keeps every protocol rule testable
//! without a network.
//!
//! ```text
//! connect ──→ seat? ──yes──→ Send(init) to that connection
//!                  └──no───→ Send(error "Game is full"), Close
//!
//! move ─────→ seated? ──→ GameState::apply_move
//!                            ├─ Ok  → Send(update | win) to every connection
//!                            └─ Err → Send(error) to the sender only
//! ```

use std::collections::BTreeSet;

use gridduel_game::{GameState, MoveError};
use gridduel_protocol::{ClientMessage, ProtocolError, ServerMessage};
use gridduel_session::SlotManager;
use gridduel_transport::ConnectionId;

use crate::TableConfig;

/// Something the runtime must do on behalf of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Send `message` to one connection.
    Send {
        to: ConnectionId,
        message: ServerMessage,
    },
    /// Close the connection after everything queued before it is sent.
    Close(ConnectionId),
}

/// The single game instance together with who is sitting at it.
#[derive(Debug)]
pub struct Table {
    game: GameState,
    slots: SlotManager,
    /// Every open, seated connection. Broadcasts go to all of these.
    connected: BTreeSet<ConnectionId>,
    config: TableConfig,
}

impl Default for Table {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}

impl Table {
    /// A fresh game with both seats empty.
    pub fn new(config: TableConfig) -> Self {
        Self::with_game(GameState::new(), config)
    }

    /// A table around an existing game.
    pub fn with_game(game: GameState, config: TableConfig) -> Self {
        Self {
            game,
            slots: SlotManager::new(),
            connected: BTreeSet::new(),
            config,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn slots(&self) -> &SlotManager {
        &self.slots
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Connections that receive broadcasts.
    pub fn connected(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.connected.iter().copied()
    }

    /// A new connection arrived.
    ///
    /// Seats it and sends it the snapshot, or turns it away if both seats
    /// are taken.
    pub fn connect(&mut self, conn: ConnectionId) -> Vec<Delivery> {
        match self.slots.assign(conn) {
            Ok(slot) => {
                self.connected.insert(conn);
                vec![Delivery::Send {
                    to: conn,
                    message: ServerMessage::init(slot, &self.game),
                }]
            }
            Err(e) => {
                tracing::info!(%conn, "rejecting connection: {e}");
                vec![
                    Delivery::Send {
                        to: conn,
                        message: ServerMessage::error(e.to_string()),
                    },
                    Delivery::Close(conn),
                ]
            }
        }
    }

    /// A decoded message arrived from `conn`.
    pub fn receive(
        &mut self,
        conn: ConnectionId,
        msg: ClientMessage,
    ) -> Vec<Delivery> {
        let Some(slot) = self.slots.slot_of(conn) else {
            tracing::warn!(%conn, "message from unseated connection");
            return vec![Delivery::Send {
                to: conn,
                message: ServerMessage::error("Not seated at this table"),
            }];
        };

        match msg {
            ClientMessage::Move { intent } => {
                match self.game.apply_move(slot, &intent) {
                    Ok(outcome) => {
                        tracing::debug!(
                            %conn,
                            %slot,
                            piece = %outcome.piece,
                            from = %outcome.from,
                            to = %outcome.to,
                            captured = outcome.captured.is_some(),
                            "move applied"
                        );
                        let message =
                            ServerMessage::after_move(&self.game, intent);
                        self.broadcast(message)
                    }
                    Err(e) => {
                        tracing::debug!(%conn, %slot, error = %e, "move rejected");
                        self.reject(conn, e)
                    }
                }
            }
        }
    }

    /// A frame from `conn` could not be decoded. Treated as a malformed
    /// move; nothing changes.
    pub fn receive_undecodable(
        &mut self,
        conn: ConnectionId,
        error: &ProtocolError,
    ) -> Vec<Delivery> {
        tracing::debug!(%conn, %error, "undecodable message");
        self.reject(conn, MoveError::MalformedMove)
    }

    /// A connection closed. Frees its seat; the game is left as it is.
    pub fn disconnect(&mut self, conn: ConnectionId) {
        self.connected.remove(&conn);
        if let Some(slot) = self.slots.release(conn) {
            tracing::info!(
                %conn,
                %slot,
                current_turn = %self.game.current_turn(),
                "player left the table"
            );
        }
    }

    fn reject(&self, conn: ConnectionId, error: MoveError) -> Vec<Delivery> {
        vec![Delivery::Send {
            to: conn,
            message: ServerMessage::error(
                self.config.error_detail.describe(error),
            ),
        }]
    }

    fn broadcast(&self, message: ServerMessage) -> Vec<Delivery> {
        self.connected
            .iter()
            .map(|&to| Delivery::Send {
                to,
                message: message.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use gridduel_game::{Board, Direction, Kind, MoveIntent, Piece, Position, Slot};

    use super::*;
    use crate::ErrorDetail;

    fn conn(id: u64) -> ConnectionId {
        ConnectionId::new(id)
    }

    fn mv(kind: Kind, dir: Direction) -> ClientMessage {
        ClientMessage::Move {
            intent: MoveIntent::new(kind, dir),
        }
    }

    /// A table with conn-1 in A and conn-2 in B, init messages discarded.
    fn seated() -> Table {
        let mut table = Table::default();
        table.connect(conn(1));
        table.connect(conn(2));
        table
    }

    fn error_text(deliveries: &[Delivery]) -> &str {
        match deliveries {
            [Delivery::Send {
                message: ServerMessage::Error { message },
                ..
            }] => message,
            other => panic!("expected a single error, got {other:?}"),
        }
    }

    #[test]
    fn test_connect_sends_init_to_new_connection_only() {
        let mut table = Table::default();
        let out = table.connect(conn(1));
        assert_eq!(
            out,
            vec![Delivery::Send {
                to: conn(1),
                message: ServerMessage::Init {
                    player: Slot::A,
                    board: Board::starting(),
                    current_turn: Slot::A,
                },
            }]
        );

        let out = table.connect(conn(2));
        assert!(matches!(
            out.as_slice(),
            [Delivery::Send {
                to,
                message: ServerMessage::Init { player: Slot::B, .. },
            }] if *to == conn(2)
        ));
    }

    #[test]
    fn test_third_connection_gets_error_then_close() {
        let mut table = seated();
        let out = table.connect(conn(3));
        assert_eq!(
            out,
            vec![
                Delivery::Send {
                    to: conn(3),
                    message: ServerMessage::error("Game is full"),
                },
                Delivery::Close(conn(3)),
            ]
        );
        assert_eq!(table.slots().occupant(Slot::A), Some(conn(1)));
        assert_eq!(table.slots().occupant(Slot::B), Some(conn(2)));
        assert_eq!(table.connected().collect::<Vec<_>>(), vec![conn(1), conn(2)]);
    }

    #[test]
    fn test_accepted_move_broadcasts_update() {
        let mut table = seated();
        let out = table.receive(conn(1), mv(Kind::Pawn, Direction::F));

        assert_eq!(out.len(), 2);
        let recipients: Vec<_> = out
            .iter()
            .map(|d| match d {
                Delivery::Send { to, .. } => *to,
                Delivery::Close(_) => panic!("unexpected close"),
            })
            .collect();
        assert_eq!(recipients, vec![conn(1), conn(2)]);

        match &out[0] {
            Delivery::Send {
                message:
                    ServerMessage::Update {
                        board,
                        current_turn,
                        applied,
                        winner,
                    },
                ..
            } => {
                assert_eq!(board.get(Position::new(3, 0)), Some(Piece::new(Slot::A, Kind::Pawn)));
                assert_eq!(*current_turn, Slot::B);
                assert_eq!(applied, &MoveIntent::new(Kind::Pawn, Direction::F));
                assert_eq!(*winner, None);
            }
            other => panic!("expected update, got {other:?}"),
        }
        assert_eq!(table.game().current_turn(), Slot::B);
    }

    #[test]
    fn test_wrong_turn_replies_to_sender_only() {
        let mut table = seated();
        let out = table.receive(conn(2), mv(Kind::Pawn, Direction::B));
        assert!(matches!(out[0], Delivery::Send { to, .. } if to == conn(2)));
        assert_eq!(error_text(&out), "Invalid move: not your turn");
        assert_eq!(table.game(), &GameState::new());
    }

    #[test]
    fn test_missing_direction_leaves_board_unchanged() {
        let mut table = seated();
        let msg = ClientMessage::Move {
            intent: MoveIntent {
                character: Some("P1".into()),
                direction: None,
            },
        };
        let out = table.receive(conn(1), msg);
        assert_eq!(error_text(&out), "Invalid move");
        assert_eq!(table.game().board(), &Board::starting());
        assert_eq!(table.game().current_turn(), Slot::A);
    }

    #[test]
    fn test_generic_errors_hide_reason() {
        let mut table = Table::new(TableConfig {
            error_detail: ErrorDetail::Generic,
            ..TableConfig::default()
        });
        table.connect(conn(1));
        table.connect(conn(2));

        let out = table.receive(conn(1), mv(Kind::Pawn, Direction::R));
        assert_eq!(error_text(&out), "Invalid move");
    }

    #[test]
    fn test_specific_errors_name_reason() {
        let mut table = seated();
        let out = table.receive(conn(1), mv(Kind::Pawn, Direction::R));
        assert_eq!(
            error_text(&out),
            "Cannot move to a position occupied by your own piece"
        );
        let out = table.receive(conn(1), mv(Kind::Pawn, Direction::L));
        assert_eq!(error_text(&out), "Invalid move direction");
    }

    #[test]
    fn test_undecodable_frame_is_invalid_move() {
        let mut table = seated();
        let error = gridduel_protocol::Codec::decode::<ClientMessage>(
            &gridduel_protocol::JsonCodec,
            "{not json",
        )
        .unwrap_err();
        let out = table.receive_undecodable(conn(1), &error);
        assert_eq!(error_text(&out), "Invalid move");
        assert_eq!(table.game(), &GameState::new());
    }

    #[test]
    fn test_unseated_sender_gets_error() {
        let mut table = seated();
        let out = table.receive(conn(9), mv(Kind::Pawn, Direction::F));
        assert!(matches!(out[0], Delivery::Send { to, .. } if to == conn(9)));
        assert_eq!(error_text(&out), "Not seated at this table");
        assert_eq!(table.game(), &GameState::new());
    }

    #[test]
    fn test_winning_move_broadcasts_win() {
        let mut board = Board::empty();
        board.set(Position::new(1, 2), Some(Piece::new(Slot::A, Kind::Hero2)));
        board.set(Position::new(3, 3), Some(Piece::new(Slot::B, Kind::Pawn)));
        let mut table = Table::with_game(
            GameState::with_board(board, Slot::A),
            TableConfig::default(),
        );
        table.connect(conn(1));
        table.connect(conn(2));

        let out = table.receive(conn(1), mv(Kind::Hero2, Direction::FL));
        assert_eq!(out.len(), 2);
        for delivery in &out {
            assert!(matches!(
                delivery,
                Delivery::Send {
                    message: ServerMessage::Win { winner: Some(Slot::A), .. },
                    ..
                }
            ));
        }

        // Game over: B can't move any more.
        let out = table.receive(conn(2), mv(Kind::Pawn, Direction::F));
        assert_eq!(error_text(&out), "Invalid move: game is over");
    }

    #[test]
    fn test_disconnect_frees_seat_and_keeps_game() {
        let mut table = seated();
        table.receive(conn(1), mv(Kind::Pawn, Direction::F));
        let game = table.game().clone();

        table.disconnect(conn(2));
        table.disconnect(conn(2));
        assert_eq!(table.game(), &game);
        assert_eq!(table.slots().occupant(Slot::B), None);
        assert_eq!(table.connected().collect::<Vec<_>>(), vec![conn(1)]);

        // Broadcasts now reach only the remaining player.
        let out = table.receive(conn(1), mv(Kind::Pawn, Direction::F));
        assert_eq!(error_text(&out), "Invalid move: not your turn");

        // A newcomer takes the empty seat and sees the game in progress.
        let out = table.connect(conn(3));
        assert!(matches!(
            out.as_slice(),
            [Delivery::Send {
                message: ServerMessage::Init { player: Slot::B, current_turn: Slot::B, .. },
                ..
            }]
        ));
    }
}
