//! Session aggregate - a shared game table
//!
//! A session owns its players and its game log. Every mutation goes through
//! the methods below so the master and log invariants hold no matter which
//! transport drives it.

use chrono::{DateTime, Duration, Utc};

use crate::entities::{GameMessage, Player};
use crate::error::DomainError;
use crate::events::{MasterClaim, PlayerJoined, PlayerWentOffline};
use crate::value_objects::Attributes;
use tavern_domain::{ConnectionId, SessionId};

/// Text of the entry every new session's log starts with.
pub const SESSION_CREATED_TEXT: &str = "Mission created.";

/// Player-data key a joiner sets (truthy) to ask for the master role.
pub const MASTER_REQUEST_KEY: &str = "wantsToBeMaster";

/// A multiplayer game session.
///
/// # Invariants
///
/// - `players` holds at most one entry per connection, in join order
/// - at most one player has `is_master() == true`, and `master_id` names it
/// - `master_id` is assigned at most once and never cleared
/// - `game_log` is append-only and never empty
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    master_id: Option<ConnectionId>,
    players: Vec<Player>,
    game_log: Vec<GameMessage>,
    last_activity: DateTime<Utc>,
}

impl Session {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create an empty session whose log is seeded with a system entry.
    pub fn new(id: SessionId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            master_id: None,
            players: Vec::new(),
            game_log: vec![GameMessage::system(SESSION_CREATED_TEXT, now)],
            last_activity: now,
        }
    }

    // =========================================================================
    // Accessors (read-only)
    // =========================================================================

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn master_id(&self) -> Option<ConnectionId> {
        self.master_id
    }

    /// Players in join order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, connection_id: ConnectionId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == connection_id)
    }

    pub fn game_log(&self) -> &[GameMessage] {
        &self.game_log
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    /// True when no player is online. Vacuously true for an empty session.
    pub fn all_offline(&self) -> bool {
        self.players.iter().all(|p| !p.is_online())
    }

    /// True when the session may be reclaimed: nobody is online and nothing
    /// has happened for strictly longer than `threshold`.
    pub fn is_idle(&self, now: DateTime<Utc>, threshold: Duration) -> bool {
        self.all_offline() && now.signed_duration_since(self.last_activity) > threshold
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a player for `connection_id`.
    ///
    /// The master role is first-come and one-shot: it goes to the first
    /// joiner whose data sets [`MASTER_REQUEST_KEY`], and later requests are
    /// ignored. A connection joining twice replaces its entry in place.
    pub fn join(
        &mut self,
        connection_id: ConnectionId,
        player_data: Attributes,
        now: DateTime<Utc>,
    ) -> PlayerJoined {
        self.touch(now);

        let wants_master = player_data.is_truthy(MASTER_REQUEST_KEY);
        let mut player = Player::new(connection_id, player_data);

        let master_claim = match (wants_master, self.master_id) {
            (false, _) => MasterClaim::NotRequested,
            (true, None) => {
                self.master_id = Some(connection_id);
                MasterClaim::Granted
            }
            (true, Some(_)) => MasterClaim::AlreadyTaken,
        };
        if self.master_id == Some(connection_id) {
            player.promote_to_master();
        }

        match self.players.iter_mut().find(|p| p.id() == connection_id) {
            Some(existing) => *existing = player.clone(),
            None => self.players.push(player.clone()),
        }

        PlayerJoined {
            player,
            master_claim,
        }
    }

    /// Stamp `payload` and append it to the log. Returns the stored entry.
    pub fn append_message(&mut self, payload: Attributes, now: DateTime<Utc>) -> GameMessage {
        self.touch(now);
        let message = GameMessage::stamp(payload, now);
        self.game_log.push(message.clone());
        message
    }

    /// Merge `patch` into the player owned by `connection_id`.
    ///
    /// # Errors
    ///
    /// `DomainError::NotFound` if the connection has no player here. The
    /// session is left untouched in that case.
    pub fn update_player(
        &mut self,
        connection_id: ConnectionId,
        patch: Attributes,
        now: DateTime<Utc>,
    ) -> Result<Player, DomainError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id() == connection_id)
            .ok_or_else(|| DomainError::not_found("Player", connection_id.to_string()))?;
        player.merge(patch);
        let updated = player.clone();
        self.touch(now);
        Ok(updated)
    }

    /// Mark the player owned by `connection_id` offline. The record is kept.
    ///
    /// # Errors
    ///
    /// `DomainError::NotFound` if the connection has no player here.
    pub fn mark_offline(
        &mut self,
        connection_id: ConnectionId,
        now: DateTime<Utc>,
    ) -> Result<PlayerWentOffline, DomainError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id() == connection_id)
            .ok_or_else(|| DomainError::not_found("Player", connection_id.to_string()))?;
        player.go_offline();
        let player = player.clone();
        self.touch(now);
        Ok(PlayerWentOffline { player })
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = now;
    }
}
