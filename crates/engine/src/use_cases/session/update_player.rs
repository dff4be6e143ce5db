//! Update player use case.

use std::sync::Arc;

use tavern_domain::{Attributes, ConnectionId, Player};
use tavern_shared::ServerMessage;

use super::fanout::fan_out;
use crate::infrastructure::ports::{BroadcastPort, ClockPort};
use crate::stores::SessionRegistry;

/// Merges a patch into the sender's own player record and tells the rest of
/// the group.
pub struct UpdatePlayer {
    registry: Arc<SessionRegistry>,
    broadcaster: Arc<dyn BroadcastPort>,
    clock: Arc<dyn ClockPort>,
}

impl UpdatePlayer {
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

    /// Returns the merged record, or `None` when the sender has no player in
    /// a live session. Nothing is broadcast in that case.
    pub async fn execute(&self, connection_id: ConnectionId, patch: Attributes) -> Option<Player> {
        let mut state = self.registry.lock().await;

        let session_id = state.session_of(connection_id).cloned()?;
        let group = state.group(&session_id);
        let session = state.sessions_mut().get_mut(&session_id)?;

        let player = match session.update_player(connection_id, patch, self.clock.now()) {
            Ok(player) => player,
            Err(e) => {
                tracing::debug!(
                    connection_id = %connection_id,
                    session_id = %session_id,
                    error = %e,
                    "Player update ignored"
                );
                return None;
            }
        };

        let notified = fan_out(
            self.broadcaster.as_ref(),
            &group,
            Some(connection_id),
            &ServerMessage::PlayerUpdated {
                player_id: connection_id,
                player_data: player.clone(),
            },
        );

        tracing::debug!(
            connection_id = %connection_id,
            session_id = %session_id,
            notified,
            "Player updated"
        );
        Some(player)
    }
}
