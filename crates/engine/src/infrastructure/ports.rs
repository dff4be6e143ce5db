//! Port traits for the engine's external seams.
//!
//! Use cases depend on these traits only; production implementations live in
//! `infrastructure` (clock, random, store) and `api` (connections).

use chrono::{DateTime, Utc};

use tavern_domain::{ConnectionId, Session, SessionId};
use tavern_shared::ServerMessage;

// =============================================================================
// Session Storage
// =============================================================================

/// Storage for live sessions, keyed by session id.
///
/// Pure storage: no domain rules are enforced here. Implementations are not
/// required to be internally synchronized; callers serialize access through
/// the session registry lock.
pub trait SessionStore: Send + Sync {
    /// Insert a session, replacing any session with the same id.
    fn create(&mut self, session: Session);

    fn get(&self, id: &SessionId) -> Option<&Session>;

    fn get_mut(&mut self, id: &SessionId) -> Option<&mut Session>;

    /// Remove a session, returning it if it existed.
    fn delete(&mut self, id: &SessionId) -> Option<Session>;

    /// Every stored session, in no particular order.
    fn all(&self) -> Box<dyn Iterator<Item = (&SessionId, &Session)> + '_>;

    fn len(&self) -> usize;

    fn contains(&self, id: &SessionId) -> bool {
        self.get(id).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Outbound Delivery
// =============================================================================

/// Best-effort delivery of a message to one connection.
///
/// Must never block: a slow or vanished connection is skipped so the caller
/// (which may hold the registry lock) keeps going.
#[cfg_attr(test, mockall::automock)]
pub trait BroadcastPort: Send + Sync {
    /// Returns `false` if the message could not be queued.
    fn send_to(&self, connection_id: ConnectionId, message: ServerMessage) -> bool;
}

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform integer in `min..=max`.
    fn gen_range(&self, min: i32, max: i32) -> i32;
}
