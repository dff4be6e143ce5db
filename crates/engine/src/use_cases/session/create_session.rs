//! Create session use case.

use std::sync::Arc;

use tavern_domain::{Session, SessionId};

use crate::infrastructure::ports::{ClockPort, RandomPort};
use crate::stores::SessionRegistry;

/// Length of the random part of a session id.
const SUFFIX_LEN: usize = 6;

const SUFFIX_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Produces `<prefix><6 base-36 chars>` candidates.
///
/// Candidates are not guaranteed unique; the caller checks them against live
/// sessions.
pub struct SessionIdGenerator {
    prefix: String,
    random: Arc<dyn RandomPort>,
}

impl SessionIdGenerator {
    pub fn new(prefix: impl Into<String>, random: Arc<dyn RandomPort>) -> Self {
        Self {
            prefix: prefix.into(),
            random,
        }
    }

    pub fn generate(&self) -> SessionId {
        let max = SUFFIX_ALPHABET.len() as i32 - 1;
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| {
                let idx = self.random.gen_range(0, max).clamp(0, max) as usize;
                SUFFIX_ALPHABET[idx] as char
            })
            .collect();
        SessionId::new(format!("{}{}", self.prefix, suffix))
    }
}

/// Opens a new, empty session.
pub struct CreateSession {
    registry: Arc<SessionRegistry>,
    clock: Arc<dyn ClockPort>,
    ids: SessionIdGenerator,
}

impl CreateSession {
    pub fn new(
        registry: Arc<SessionRegistry>,
        clock: Arc<dyn ClockPort>,
        ids: SessionIdGenerator,
    ) -> Self {
        Self {
            registry,
            clock,
            ids,
        }
    }

    /// Always succeeds. The returned id is unique among live sessions.
    pub async fn execute(&self) -> SessionId {
        let mut state = self.registry.lock().await;

        let session_id = loop {
            let candidate = self.ids.generate();
            if !state.sessions().contains(&candidate) {
                break candidate;
            }
            tracing::debug!(session_id = %candidate, "Session id collision, regenerating");
        };

        state
            .sessions_mut()
            .create(Session::new(session_id.clone(), self.clock.now()));

        tracing::info!(session_id = %session_id, "Session created");
        session_id
    }
}
