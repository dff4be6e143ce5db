//! Acknowledgement payloads returned to the calling connection

use serde::{Deserialize, Serialize};

use tavern_domain::{ConnectionId, GameMessage, Player, Session, SessionId};

// =============================================================================
// Session snapshot
// =============================================================================

/// Full view of a session, sent to a connection when it joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: SessionId,
    /// Players in join order
    pub players: Vec<Player>,
    /// The complete game log, oldest first
    pub game_log: Vec<GameMessage>,
    pub master_id: Option<ConnectionId>,
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().clone(),
            players: session.players().to_vec(),
            game_log: session.game_log().to_vec(),
            master_id: session.master_id(),
        }
    }
}

// =============================================================================
// Join errors
// =============================================================================

/// Errors that can occur when joining a session.
///
/// Travels as a bare snake_case string in the `error` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum JoinError {
    /// No live session has the requested id
    #[error("Session not found")]
    SessionNotFound,
    /// Unknown variant for forward compatibility
    #[serde(other)]
    #[error("Unknown join error")]
    Unknown,
}
