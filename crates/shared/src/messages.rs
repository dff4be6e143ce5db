//! WebSocket message types for Engine-client communication
//!
//! Every frame is a JSON object tagged by `"type"` with a snake_case event
//! name; fields are camelCase. Calls that expect an acknowledgement
//! (`create_session`, `join_session`, `ping`) may carry a `requestId`, which
//! the server echoes back on the matching response.
//!
//! ## Versioning Policy
//!
//! - New variants can be added at the end (forward compatible)
//! - Renaming variants is a breaking change
//! - Unknown client events deserialize to `Unknown` and are ignored

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::responses::{JoinError, SessionSnapshot};
use tavern_domain::{Attributes, ConnectionId, GameMessage, Player, SessionId};

/// Accept any JSON for an attribute bag; non-objects become empty.
fn lenient_attributes<'de, D>(deserializer: D) -> Result<Attributes, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Attributes::from_value)
}

/// Accept any scalar as a request id; strings pass through, numbers and
/// booleans are stringified, anything else is dropped.
fn lenient_request_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Accept any JSON for a string field; non-strings become empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

// =============================================================================
// Client Messages (client → Engine)
// =============================================================================

/// Messages from a client to the server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Open a new session
    CreateSession {
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "lenient_request_id"
        )]
        request_id: Option<String>,
    },
    /// Join an existing session as a new player
    JoinSession {
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "lenient_request_id"
        )]
        request_id: Option<String>,
        /// Missing or non-string ids are treated as unknown sessions
        #[serde(default, deserialize_with = "lenient_string")]
        session_id: String,
        #[serde(default, deserialize_with = "lenient_attributes")]
        player_data: Attributes,
    },
    /// Chat / game log entry; every field besides `type` is the payload
    GameMessage(Attributes),
    /// Merge patch for the sender's own player record
    UpdatePlayer(Attributes),
    /// Liveness check
    Ping {
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "lenient_request_id"
        )]
        request_id: Option<String>,
    },
    /// Unknown variant for forward compatibility
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Server Messages (Engine → client)
// =============================================================================

/// Messages from the server to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Acknowledges `create_session`
    SessionCreated {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
        success: bool,
        session_id: SessionId,
    },
    /// Acknowledges a successful `join_session`
    SessionJoined {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
        success: bool,
        session: SessionSnapshot,
    },
    /// Acknowledges a failed `join_session`
    SessionJoinFailed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
        success: bool,
        error: JoinError,
    },
    /// A stamped game log entry, delivered to the whole session
    GameMessage(GameMessage),
    /// Another player joined the session
    PlayerJoined { player: Player },
    /// Another player changed their record
    PlayerUpdated {
        player_id: ConnectionId,
        player_data: Player,
    },
    /// Another player's connection went away
    PlayerDisconnected {
        player_id: ConnectionId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player_name: Option<String>,
    },
    /// Acknowledges `ping`
    Pong {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
    },
    /// Protocol-level error (e.g. an unparseable frame)
    Error { code: String, message: String },
}

impl ServerMessage {
    pub fn session_created(request_id: Option<String>, session_id: SessionId) -> Self {
        Self::SessionCreated {
            request_id,
            success: true,
            session_id,
        }
    }

    pub fn session_joined(request_id: Option<String>, session: SessionSnapshot) -> Self {
        Self::SessionJoined {
            request_id,
            success: true,
            session,
        }
    }

    pub fn session_join_failed(request_id: Option<String>, error: JoinError) -> Self {
        Self::SessionJoinFailed {
            request_id,
            success: false,
            error,
        }
    }

    /// Short event name, used in logs.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::SessionCreated { .. } => "session_created",
            Self::SessionJoined { .. } => "session_joined",
            Self::SessionJoinFailed { .. } => "session_join_failed",
            Self::GameMessage(_) => "game_message",
            Self::PlayerJoined { .. } => "player_joined",
            Self::PlayerUpdated { .. } => "player_updated",
            Self::PlayerDisconnected { .. } => "player_disconnected",
            Self::Pong { .. } => "pong",
            Self::Error { .. } => "error",
        }
    }
}
