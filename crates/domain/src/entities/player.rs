//! Player entity - one participant of a session, bound to a single connection

use serde::{Deserialize, Serialize};

use crate::value_objects::Attributes;
use tavern_domain::ConnectionId;

/// Keys owned by the server. They are stripped from client payloads so a
/// client can never spoof its id, presence, or master flag.
pub const RESERVED_PLAYER_KEYS: [&str; 3] = ["id", "online", "isMaster"];

/// A player in a session.
///
/// Serializes as the client-supplied attributes with `id`, `online`, and
/// `isMaster` merged on top.
///
/// # Invariants
///
/// - `id` is the owning connection and never changes
/// - `attributes` never contain any of [`RESERVED_PLAYER_KEYS`]
/// - `is_master` is only ever set by the owning session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(flatten)]
    attributes: Attributes,
    id: ConnectionId,
    online: bool,
    #[serde(default)]
    is_master: bool,
}

impl Player {
    /// Create a freshly joined, online, non-master player.
    pub fn new(id: ConnectionId, attributes: Attributes) -> Self {
        Self {
            attributes: attributes.without(&RESERVED_PLAYER_KEYS),
            id,
            online: true,
            is_master: false,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Display name, if the client supplied a string `name`.
    pub fn name(&self) -> Option<&str> {
        self.attributes.get_str("name")
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn is_master(&self) -> bool {
        self.is_master
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Shallow-merge a client patch into this player. Reserved keys in the
    /// patch are ignored.
    pub fn merge(&mut self, patch: Attributes) {
        self.attributes.merge(patch.without(&RESERVED_PLAYER_KEYS));
    }

    pub(crate) fn go_offline(&mut self) {
        self.online = false;
    }

    pub(crate) fn promote_to_master(&mut self) {
        self.is_master = true;
    }
}
