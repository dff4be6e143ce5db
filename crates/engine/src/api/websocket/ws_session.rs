use tavern_domain::{Attributes, SessionId};

use super::*;

pub(super) async fn handle_create_session(
    state: &WsState,
    connection_id: ConnectionId,
    request_id: Option<String>,
) -> Option<ServerMessage> {
    let session_id = state.app.use_cases.session.create.execute().await;
    tracing::debug!(
        connection_id = %connection_id,
        session_id = %session_id,
        "CreateSession handled"
    );
    Some(ServerMessage::session_created(request_id, session_id))
}

/// The join use case delivers the acknowledgement itself, success or not.
pub(super) async fn handle_join_session(
    state: &WsState,
    connection_id: ConnectionId,
    request_id: Option<String>,
    session_id: String,
    player_data: Attributes,
) -> Option<ServerMessage> {
    if let Err(e) = state
        .app
        .use_cases
        .session
        .join
        .execute(
            connection_id,
            request_id,
            SessionId::from(session_id),
            player_data,
        )
        .await
    {
        tracing::debug!(connection_id = %connection_id, error = %e, "JoinSession failed");
    }
    None
}

pub(super) async fn handle_game_message(
    state: &WsState,
    connection_id: ConnectionId,
    payload: Attributes,
) -> Option<ServerMessage> {
    state
        .app
        .use_cases
        .session
        .game_message
        .execute(connection_id, payload)
        .await;
    None
}

pub(super) async fn handle_update_player(
    state: &WsState,
    connection_id: ConnectionId,
    patch: Attributes,
) -> Option<ServerMessage> {
    state
        .app
        .use_cases
        .session
        .update_player
        .execute(connection_id, patch)
        .await;
    None
}
