//! Connection management for WebSocket clients.
//!
//! Tracks the outbound channel of every live connection. Session membership
//! lives in the session registry, not here.

use dashmap::DashMap;
use tokio::sync::mpsc::{self, error::TrySendError};

use tavern_domain::ConnectionId;
use tavern_shared::ServerMessage;

use crate::infrastructure::ports::BroadcastPort;

/// Manages all active WebSocket connections.
pub struct ConnectionManager {
    senders: DashMap<ConnectionId, mpsc::Sender<ServerMessage>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            senders: DashMap::new(),
        }
    }

    /// Register a new connection.
    pub fn register(&self, connection_id: ConnectionId, sender: mpsc::Sender<ServerMessage>) {
        self.senders.insert(connection_id, sender);
        tracing::debug!(connection_id = %connection_id, "Connection registered");
    }

    /// Unregister a connection.
    pub fn unregister(&self, connection_id: ConnectionId) {
        if self.senders.remove(&connection_id).is_some() {
            tracing::debug!(connection_id = %connection_id, "Connection unregistered");
        }
    }

    pub fn is_connected(&self, connection_id: ConnectionId) -> bool {
        self.senders.contains_key(&connection_id)
    }

    /// Number of live connections.
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    /// Queue `message` for `connection_id` without waiting.
    pub fn try_send(
        &self,
        connection_id: ConnectionId,
        message: ServerMessage,
    ) -> Result<(), ConnectionError> {
        let sender = self
            .senders
            .get(&connection_id)
            .ok_or(ConnectionError::NotFound)?;
        sender.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => ConnectionError::ChannelFull,
            TrySendError::Closed(_) => ConnectionError::Closed,
        })
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastPort for ConnectionManager {
    fn send_to(&self, connection_id: ConnectionId, message: ServerMessage) -> bool {
        let event = message.event_name();
        match self.try_send(connection_id, message) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    connection_id = %connection_id,
                    event,
                    error = %e,
                    "Failed to deliver message"
                );
                false
            }
        }
    }
}

/// Errors that can occur during connection operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    #[error("Connection not found")]
    NotFound,
    #[error("Outbound channel full")]
    ChannelFull,
    #[error("Connection closed")]
    Closed,
}
