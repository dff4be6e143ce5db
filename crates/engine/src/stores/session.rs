//! Session registry - the single lock around all session state.
//!
//! Every registry operation and every reaper sweep runs while holding this
//! lock, so each one is atomic with respect to the store and the
//! connection -> session side table.

use std::collections::HashMap;

use tokio::sync::{Mutex, MutexGuard};

use tavern_domain::{ConnectionId, SessionId};

use crate::infrastructure::memory_store::InMemorySessionStore;
use crate::infrastructure::ports::SessionStore;

/// Owns the session store and the membership side table.
pub struct SessionRegistry {
    state: Mutex<RegistryState>,
}

/// Registry contents, only reachable through [`SessionRegistry::lock`].
pub struct RegistryState {
    sessions: Box<dyn SessionStore>,
    /// connection -> the one session whose group it belongs to
    memberships: HashMap<ConnectionId, SessionId>,
}

impl SessionRegistry {
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self {
            state: Mutex::new(RegistryState {
                sessions: store,
                memberships: HashMap::new(),
            }),
        }
    }

    /// Registry backed by [`InMemorySessionStore`].
    pub fn in_memory() -> Self {
        Self::new(Box::new(InMemorySessionStore::new()))
    }

    /// Acquire exclusive access to all session state.
    pub async fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().await
    }

    /// Number of live (not yet reaped) sessions.
    pub async fn session_count(&self) -> usize {
        self.lock().await.sessions.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl RegistryState {
    pub fn sessions(&self) -> &dyn SessionStore {
        self.sessions.as_ref()
    }

    pub fn sessions_mut(&mut self) -> &mut dyn SessionStore {
        self.sessions.as_mut()
    }

    /// The session `connection_id` is currently associated with.
    pub fn session_of(&self, connection_id: ConnectionId) -> Option<&SessionId> {
        self.memberships.get(&connection_id)
    }

    /// Put `connection_id` in `session_id`'s group, returning the session it
    /// belonged to before, if any.
    pub fn associate(
        &mut self,
        connection_id: ConnectionId,
        session_id: SessionId,
    ) -> Option<SessionId> {
        self.memberships.insert(connection_id, session_id)
    }

    /// Drop `connection_id` from whatever group it is in.
    pub fn dissociate(&mut self, connection_id: ConnectionId) -> Option<SessionId> {
        self.memberships.remove(&connection_id)
    }

    /// Connections currently in `session_id`'s group.
    pub fn group(&self, session_id: &SessionId) -> Vec<ConnectionId> {
        self.memberships
            .iter()
            .filter(|(_, sid)| *sid == session_id)
            .map(|(cid, _)| *cid)
            .collect()
    }
}
