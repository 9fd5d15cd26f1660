//! Scoped ownership of a single MySQL session.

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection};

use crate::error::{ProvisionError, Result};

/// A live connection to the target server, owned for one provisioning call.
///
/// Closing consumes the session, so a double close is unrepresentable; the
/// provisioner closes it on every exit path after open succeeds.
pub struct Session {
    conn: MySqlConnection,
}

impl Session {
    /// Opens a connection and performs the authentication handshake.
    pub async fn open(opts: &MySqlConnectOptions) -> Result<Self> {
        let conn = opts.connect().await.map_err(ProvisionError::Connection)?;
        Ok(Self { conn })
    }

    /// Runs the existence probe, reading at most one row.
    pub async fn table_exists(&mut self, probe: &str) -> Result<bool> {
        let row = sqlx::query(probe)
            .fetch_optional(&mut self.conn)
            .await
            .map_err(ProvisionError::Probe)?;
        Ok(row.is_some())
    }

    /// The underlying connection, for running a transaction on it.
    pub fn connection(&mut self) -> &mut MySqlConnection {
        &mut self.conn
    }

    /// Sends the protocol-level quit and releases the connection.
    pub async fn close(self) -> sqlx::Result<()> {
        self.conn.close().await
    }
}
