//! Post game message use case.

use std::sync::Arc;

use tavern_domain::{Attributes, ConnectionId, GameMessage};
use tavern_shared::ServerMessage;

use super::fanout::fan_out;
use crate::infrastructure::ports::{BroadcastPort, ClockPort};
use crate::stores::SessionRegistry;

/// Stamps a chat / game entry, appends it to the sender's session log and
/// delivers it to the whole group, sender included.
pub struct PostGameMessage {
    registry: Arc<SessionRegistry>,
    broadcaster: Arc<dyn BroadcastPort>,
    clock: Arc<dyn ClockPort>,
}

impl PostGameMessage {
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

    /// Returns the stored entry, or `None` if the sender is not in a live
    /// session.
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        payload: Attributes,
    ) -> Option<GameMessage> {
        let mut state = self.registry.lock().await;

        let Some(session_id) = state.session_of(connection_id).cloned() else {
            tracing::debug!(connection_id = %connection_id, "Game message ignored, not in a session");
            return None;
        };
        let group = state.group(&session_id);
        let session = state.sessions_mut().get_mut(&session_id)?;

        let stored = session.append_message(payload, self.clock.now());
        let delivered = fan_out(
            self.broadcaster.as_ref(),
            &group,
            None,
            &ServerMessage::GameMessage(stored.clone()),
        );

        tracing::debug!(
            connection_id = %connection_id,
            session_id = %session_id,
            log_len = session.game_log().len(),
            delivered,
            "Game message appended"
        );
        Some(stored)
    }
}
