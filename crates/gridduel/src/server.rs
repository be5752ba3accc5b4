//! `GridduelServer` builder and server loop.
//!
//! Ties the layers together: transport → handler → table actor.

use gridduel_protocol::JsonCodec;
use gridduel_transport::{Transport, WebSocketTransport};

use crate::actor::spawn_table;
use crate::handler::handle_connection;
use crate::{GridduelError, Table, TableConfig, TableHandle};

/// Builder for configuring and starting a Gridduel server.
///
/// # Example
///
/// ```rust,ignore
/// use gridduel::prelude::*;
///
/// let server = GridduelServer::builder()
///     .bind("0.0.0.0:8080")
///     .table_config(TableConfig { error_detail: ErrorDetail::Generic, ..Default::default() })
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct GridduelServerBuilder {
    bind_addr: String,
    table_config: TableConfig,
}

impl GridduelServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            table_config: TableConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the table configuration.
    pub fn table_config(mut self, config: TableConfig) -> Self {
        self.table_config = config;
        self
    }

    /// Binds the listener and starts the table actor.
    ///
    /// Uses `JsonCodec` and `WebSocketTransport`.
    pub async fn build(self) -> Result<GridduelServer, GridduelError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let buffer = self.table_config.command_buffer;
        let table = spawn_table(Table::new(self.table_config), JsonCodec, buffer);

        Ok(GridduelServer { transport, table })
    }
}

impl Default for GridduelServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Gridduel server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct GridduelServer {
    transport: WebSocketTransport,
    table: TableHandle,
}

impl GridduelServer {
    /// Creates a new builder.
    pub fn builder() -> GridduelServerBuilder {
        GridduelServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Returns a handle to the table, for inspection.
    pub fn table(&self) -> TableHandle {
        self.table.clone()
    }

    /// Runs the accept loop.
    ///
    /// Spawns a handler task per accepted peer; the handshake runs inside
    /// that task, so a slow peer never holds up the loop. Runs until the
    /// process is terminated; a failed accept is logged and skipped.
    pub async fn run(mut self) -> Result<(), GridduelError> {
        tracing::info!("Gridduel server running");

        loop {
            match self.transport.accept().await {
                Ok(pending) => {
                    let table = self.table.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(pending, table).await {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
