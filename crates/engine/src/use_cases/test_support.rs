//! Shared fixtures for use case tests.

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use serde_json::Value;

use tavern_domain::{Attributes, ConnectionId, SessionId};
use tavern_shared::ServerMessage;

use crate::infrastructure::clock::{SteppingClock, SystemRandom};
use crate::infrastructure::ports::{BroadcastPort, RandomPort};
use crate::stores::SessionRegistry;
use crate::use_cases::session::{
    CreateSession, DisconnectPlayer, JoinSession, JoinSessionError, JoinedSession,
    PostGameMessage, SessionIdGenerator, SessionUseCases, UpdatePlayer,
};

pub(crate) fn data(value: Value) -> Attributes {
    Attributes::from_value(value)
}

/// Broadcaster that records every send and always succeeds.
#[derive(Default)]
pub(crate) struct RecordingBroadcaster {
    sent: Mutex<Vec<(ConnectionId, ServerMessage)>>,
}

impl RecordingBroadcaster {
    /// Everything sent to `connection_id`, in send order.
    pub fn sent_to(&self, connection_id: ConnectionId) -> Vec<ServerMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(cid, _)| *cid == connection_id)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

impl BroadcastPort for RecordingBroadcaster {
    fn send_to(&self, connection_id: ConnectionId, message: ServerMessage) -> bool {
        self.sent.lock().unwrap().push((connection_id, message));
        true
    }
}

/// Wires the session use cases over an in-memory registry and a manual clock.
pub(crate) struct Harness {
    pub registry: Arc<SessionRegistry>,
    pub broadcaster: Arc<RecordingBroadcaster>,
    pub clock: Arc<SteppingClock>,
    pub use_cases: SessionUseCases,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(Arc::new(SystemRandom::new()), None)
    }

    pub fn with_random(random: Arc<dyn RandomPort>) -> Self {
        Self::build(random, None)
    }

    /// Use `broadcaster` instead of the recording one; `self.broadcaster`
    /// then sees nothing.
    pub fn with_broadcaster(broadcaster: Arc<dyn BroadcastPort>) -> Self {
        Self::build(Arc::new(SystemRandom::new()), Some(broadcaster))
    }

    fn build(random: Arc<dyn RandomPort>, broadcaster: Option<Arc<dyn BroadcastPort>>) -> Self {
        let registry = Arc::new(SessionRegistry::in_memory());
        let recorder = Arc::new(RecordingBroadcaster::default());
        let clock = Arc::new(SteppingClock::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap(),
        ));
        let outbound: Arc<dyn BroadcastPort> = broadcaster.unwrap_or_else(|| recorder.clone() as Arc<dyn BroadcastPort>);

        let use_cases = SessionUseCases::new(
            Arc::new(CreateSession::new(
                registry.clone(),
                clock.clone(),
                SessionIdGenerator::new("ucronie-", random),
            )),
            Arc::new(JoinSession::new(registry.clone(), outbound.clone(), clock.clone())),
            Arc::new(PostGameMessage::new(registry.clone(), outbound.clone(), clock.clone())),
            Arc::new(UpdatePlayer::new(registry.clone(), outbound.clone(), clock.clone())),
            Arc::new(DisconnectPlayer::new(registry.clone(), outbound, clock.clone())),
        );

        Self {
            registry,
            broadcaster: recorder,
            clock,
            use_cases,
        }
    }

    pub async fn create(&self) -> SessionId {
        self.use_cases.create.execute().await
    }

    pub async fn join(
        &self,
        connection_id: ConnectionId,
        session_id: &SessionId,
        player_data: Value,
    ) -> Result<JoinedSession, JoinSessionError> {
        self.use_cases
            .join
            .execute(connection_id, None, session_id.clone(), data(player_data))
            .await
    }
}
