//! Group delivery helpers shared by the session use cases.

use chrono::{DateTime, Utc};

use tavern_domain::{ConnectionId, PlayerWentOffline, SessionId};
use tavern_shared::ServerMessage;

use crate::infrastructure::ports::BroadcastPort;
use crate::stores::RegistryState;

/// Send `message` to every connection in `group` other than `except`.
///
/// Delivery is best-effort per connection; returns how many sends were
/// queued.
pub(crate) fn fan_out(
    broadcaster: &dyn BroadcastPort,
    group: &[ConnectionId],
    except: Option<ConnectionId>,
    message: &ServerMessage,
) -> usize {
    group
        .iter()
        .filter(|cid| Some(**cid) != except)
        .filter(|cid| broadcaster.send_to(**cid, message.clone()))
        .count()
}

/// Mark `connection_id`'s player in `session_id` offline and notify the rest
/// of that session's group.
///
/// The caller must already have removed the connection from the group.
/// Returns `None` when the session is gone or the connection never had a
/// player there.
pub(crate) fn leave_session(
    state: &mut RegistryState,
    broadcaster: &dyn BroadcastPort,
    connection_id: ConnectionId,
    session_id: &SessionId,
    now: DateTime<Utc>,
) -> Option<PlayerWentOffline> {
    let group = state.group(session_id);
    let session = state.sessions_mut().get_mut(session_id)?;

    let outcome = match session.mark_offline(connection_id, now) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::debug!(
                connection_id = %connection_id,
                session_id = %session_id,
                error = %e,
                "Disconnect ignored, no player for connection"
            );
            return None;
        }
    };

    let message = ServerMessage::PlayerDisconnected {
        player_id: connection_id,
        player_name: outcome.player.name().map(str::to_string),
    };
    let notified = fan_out(broadcaster, &group, Some(connection_id), &message);

    tracing::info!(
        connection_id = %connection_id,
        session_id = %session_id,
        player_name = ?outcome.player.name(),
        notified,
        "Player disconnected"
    );
    Some(outcome)
}
