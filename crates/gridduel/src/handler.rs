//! Per-connection handler: register, pump frames, report disconnect.
//!
//! Each accepted peer gets its own Tokio task running this handler.
//! The flow is:
//!   1. Complete the WebSocket handshake
//!   2. Register with the table actor, handing it an outbound queue
//!   3. Spawn a writer that drains the queue onto the socket
//!   4. Loop: receive text frames → forward to the table actor, until the
//!      peer leaves or the writer closes the socket
//!   5. On exit, a drop guard tells the table the connection is gone

use std::sync::Arc;
use std::time::Duration;

use gridduel_transport::{
    Connection, ConnectionId, Handshake, PendingWebSocket, WebSocketConnection,
};
use tokio::sync::mpsc;

use crate::{GridduelError, Outbound, TableHandle};

/// How long to wait for the peer's close reply after the server closed.
const CLOSE_GRACE: Duration = Duration::from_secs(1);

/// Drop guard that reports the disconnect when the handler exits.
///
/// Covers early returns and panics alike. `Drop` is synchronous, so the
/// async send runs in a fire-and-forget task.
struct DisconnectGuard {
    conn_id: ConnectionId,
    table: TableHandle,
}

impl Drop for DisconnectGuard {
    fn drop(&mut self) {
        let conn_id = self.conn_id;
        let table = self.table.clone();
        tokio::spawn(async move {
            let _ = table.disconnect(conn_id).await;
        });
    }
}

/// Handles a single peer from handshake to close.
pub(crate) async fn handle_connection(
    pending: PendingWebSocket,
    table: TableHandle,
) -> Result<(), GridduelError> {
    let conn = Arc::new(pending.complete().await?);
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    table.connect(conn_id, outbound_tx).await?;
    let _guard = DisconnectGuard {
        conn_id,
        table: table.clone(),
    };

    let mut writer = tokio::spawn(write_loop(Arc::clone(&conn), outbound_rx));

    loop {
        tokio::select! {
            received = conn.recv() => match received {
                Ok(Some(text)) => table.inbound(conn_id, text).await?,
                Ok(None) => {
                    tracing::info!(%conn_id, "connection closed");
                    break;
                }
                Err(e) => {
                    tracing::debug!(%conn_id, error = %e, "recv error");
                    break;
                }
            },
            _ = &mut writer => {
                // Server-side close: drain the peer's reply, but not forever.
                let drain = async { while let Ok(Some(_)) = conn.recv().await {} };
                if tokio::time::timeout(CLOSE_GRACE, drain).await.is_err() {
                    tracing::debug!(%conn_id, "peer did not answer close");
                }
                break;
            }
        }
    }

    // _guard drops here → table releases the slot.
    Ok(())
}

/// Drains the outbound queue onto the socket until the table drops the
/// sender or asks for a close.
async fn write_loop(
    conn: Arc<WebSocketConnection>,
    mut outbound: mpsc::UnboundedReceiver<Outbound>,
) {
    let conn_id = conn.id();
    while let Some(frame) = outbound.recv().await {
        match frame {
            Outbound::Text(text) => {
                if let Err(e) = conn.send(&text).await {
                    tracing::debug!(%conn_id, error = %e, "send failed");
                    break;
                }
            }
            Outbound::Close => {
                if let Err(e) = conn.close().await {
                    tracing::debug!(%conn_id, error = %e, "close failed");
                }
                break;
            }
        }
    }
}
