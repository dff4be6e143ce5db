//! Disconnect use case, run when a connection closes.

use std::sync::Arc;

use tavern_domain::{ConnectionId, PlayerWentOffline};

use super::fanout::leave_session;
use crate::infrastructure::ports::{BroadcastPort, ClockPort};
use crate::stores::SessionRegistry;

/// Removes a closed connection from its group and marks its player offline.
///
/// The player record stays in the session; it is never removed.
pub struct DisconnectPlayer {
    registry: Arc<SessionRegistry>,
    broadcaster: Arc<dyn BroadcastPort>,
    clock: Arc<dyn ClockPort>,
}

impl DisconnectPlayer {
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

    /// `None` if the connection never joined, or its session was reaped.
    pub async fn execute(&self, connection_id: ConnectionId) -> Option<PlayerWentOffline> {
        let mut state = self.registry.lock().await;
        let session_id = state.dissociate(connection_id)?;
        leave_session(
            &mut state,
            self.broadcaster.as_ref(),
            connection_id,
            &session_id,
            self.clock.now(),
        )
    }
}
