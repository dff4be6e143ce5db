//! WebSocket handling for game clients.
//!
//! One socket per client. Each connection gets a bounded outbound channel
//! registered with the [`ConnectionManager`]; a dedicated task drains it into
//! the socket so use cases never wait on a slow client.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

mod ws_session;

use tavern_domain::ConnectionId;
use tavern_shared::{ClientMessage, ServerMessage};

use super::connections::ConnectionManager;
use crate::app::App;

/// Buffer size for per-connection message channel.
const CONNECTION_CHANNEL_BUFFER: usize = 256;

/// Combined state for WebSocket handlers.
pub struct WsState {
    pub app: Arc<App>,
    pub connections: Arc<ConnectionManager>,
}

/// WebSocket upgrade handler - entry point for new connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<WsState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<WsState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let connection_id = ConnectionId::new();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(CONNECTION_CHANNEL_BUFFER);

    state.connections.register(connection_id, tx.clone());
    tracing::info!(connection_id = %connection_id, "WebSocket connection established");

    // Forward queued messages to the socket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, event = msg.event_name(), "Failed to serialize message");
                }
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(text.as_str()) {
                Ok(msg) => {
                    if let Some(response) = handle_message(msg, &state, connection_id).await {
                        if tx.try_send(response).is_err() {
                            tracing::warn!(
                                connection_id = %connection_id,
                                "Failed to send response, channel full or closed"
                            );
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(connection_id = %connection_id, error = %e, "Failed to parse message");
                    let _ = tx.try_send(error_response(
                        "PARSE_ERROR",
                        &format!("Invalid message format: {}", e),
                    ));
                }
            },
            Ok(Message::Ping(_)) => {
                let _ = tx.try_send(ServerMessage::Pong { request_id: None });
            }
            Ok(Message::Close(_)) => {
                tracing::info!(connection_id = %connection_id, "WebSocket closed by client");
                break;
            }
            Err(e) => {
                tracing::warn!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
            _ => {}
        }
    }

    // Clean up
    state
        .app
        .use_cases
        .session
        .disconnect
        .execute(connection_id)
        .await;
    state.connections.unregister(connection_id);
    send_task.abort();

    tracing::info!(connection_id = %connection_id, "WebSocket connection terminated");
}

/// Dispatch a parsed client message to the appropriate handler.
///
/// A returned message is queued for the caller only.
async fn handle_message(
    msg: ClientMessage,
    state: &WsState,
    connection_id: ConnectionId,
) -> Option<ServerMessage> {
    match msg {
        ClientMessage::Ping { request_id } => Some(ServerMessage::Pong { request_id }),

        ClientMessage::CreateSession { request_id } => {
            ws_session::handle_create_session(state, connection_id, request_id).await
        }

        ClientMessage::JoinSession {
            request_id,
            session_id,
            player_data,
        } => {
            ws_session::handle_join_session(
                state,
                connection_id,
                request_id,
                session_id,
                player_data,
            )
            .await
        }

        ClientMessage::GameMessage(payload) => {
            ws_session::handle_game_message(state, connection_id, payload).await
        }

        ClientMessage::UpdatePlayer(patch) => {
            ws_session::handle_update_player(state, connection_id, patch).await
        }

        ClientMessage::Unknown => {
            tracing::debug!(connection_id = %connection_id, "Ignoring unknown client event");
            None
        }
    }
}

fn error_response(code: &str, message: &str) -> ServerMessage {
    ServerMessage::Error {
        code: code.to_string(),
        message: message.to_string(),
    }
}

// =============================================================================
// WebSocket Integration Tests
// =============================================================================
