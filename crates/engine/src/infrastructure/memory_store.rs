//! In-memory session storage.

use std::collections::HashMap;

use tavern_domain::{Session, SessionId};

use crate::infrastructure::ports::SessionStore;

/// `HashMap`-backed [`SessionStore`]. State lives for the life of the process.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: HashMap<SessionId, Session>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&mut self, session: Session) {
        self.sessions.insert(session.id().clone(), session);
    }

    fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.get(id)
    }

    fn get_mut(&mut self, id: &SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    fn delete(&mut self, id: &SessionId) -> Option<Session> {
        self.sessions.remove(id)
    }

    fn all(&self) -> Box<dyn Iterator<Item = (&SessionId, &Session)> + '_> {
        Box::new(self.sessions.iter())
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}
