//! Join session use case.
//!
//! The acknowledgement (success or failure) is sent to the caller while the
//! registry lock is held, so it always reaches the joiner before any group
//! traffic that follows the join.

use std::sync::Arc;

use tavern_domain::{Attributes, ConnectionId, PlayerJoined, SessionId};
use tavern_shared::{JoinError, ServerMessage, SessionSnapshot};

use super::fanout::{fan_out, leave_session};
use crate::infrastructure::ports::{BroadcastPort, ClockPort};
use crate::stores::SessionRegistry;

/// Adds the calling connection to a session as a new player.
pub struct JoinSession {
    registry: Arc<SessionRegistry>,
    broadcaster: Arc<dyn BroadcastPort>,
    clock: Arc<dyn ClockPort>,
}

impl JoinSession {
    pub fn new(
        registry: Arc<SessionRegistry>,
        broadcaster: Arc<dyn BroadcastPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            registry,
            broadcaster,
            clock,
        }
    }

    /// Join `session_id`, replying to the caller with a snapshot or a failure.
    ///
    /// A connection already in a different session leaves it first: its old
    /// player goes offline and that group receives `player_disconnected`.
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        request_id: Option<String>,
        session_id: SessionId,
        player_data: Attributes,
    ) -> Result<JoinedSession, JoinSessionError> {
        let mut state = self.registry.lock().await;

        if !state.sessions().contains(&session_id) {
            let error = JoinSessionError::SessionNotFound(session_id);
            tracing::info!(connection_id = %connection_id, error = %error, "Join rejected");
            self.broadcaster.send_to(
                connection_id,
                ServerMessage::session_join_failed(request_id, error.to_protocol()),
            );
            return Err(error);
        }

        let now = self.clock.now();

        // A connection lives in at most one group; joining elsewhere leaves
        // the previous session as if the connection had dropped.
        if let Some(previous) = state.associate(connection_id, session_id.clone()) {
            if previous != session_id {
                leave_session(
                    &mut state,
                    self.broadcaster.as_ref(),
                    connection_id,
                    &previous,
                    now,
                );
            }
        }

        let group = state.group(&session_id);
        let session = state
            .sessions_mut()
            .get_mut(&session_id)
            .ok_or_else(|| JoinSessionError::SessionNotFound(session_id.clone()))?;

        let joined = session.join(connection_id, player_data, now);
        let snapshot = SessionSnapshot::from(&*session);

        self.broadcaster.send_to(
            connection_id,
            ServerMessage::session_joined(request_id, snapshot.clone()),
        );
        let notified = fan_out(
            self.broadcaster.as_ref(),
            &group,
            Some(connection_id),
            &ServerMessage::PlayerJoined {
                player: joined.player.clone(),
            },
        );

        tracing::info!(
            connection_id = %connection_id,
            session_id = %session_id,
            player_name = ?joined.player.name(),
            master_claim = ?joined.master_claim,
            notified,
            "Player joined session"
        );

        Ok(JoinedSession { snapshot, joined })
    }
}

/// Result of a successful join.
#[derive(Debug, Clone)]
pub struct JoinedSession {
    /// What the joiner was sent
    pub snapshot: SessionSnapshot,
    pub joined: PlayerJoined,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JoinSessionError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),
}

impl JoinSessionError {
    /// Wire-level error code for this failure.
    pub fn to_protocol(&self) -> JoinError {
        match self {
            Self::SessionNotFound(_) => JoinError::SessionNotFound,
        }
    }
}
