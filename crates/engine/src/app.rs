//! Application state and composition.

use std::sync::Arc;
use std::time::Instant;

use crate::infrastructure::{
    ports::{BroadcastPort, ClockPort, RandomPort},
    settings::Settings,
};
use crate::stores::SessionRegistry;
use crate::use_cases;
use crate::use_cases::session::{
    CreateSession, DisconnectPlayer, JoinSession, PostGameMessage, SessionIdGenerator,
    UpdatePlayer,
};

/// Main application state.
///
/// Passed to HTTP/WebSocket handlers via Axum state.
pub struct App {
    pub registry: Arc<SessionRegistry>,
    pub use_cases: UseCases,
    pub clock: Arc<dyn ClockPort>,
    /// Process start, for the uptime reported by the health route
    pub started_at: Instant,
}

/// Container for all use cases.
pub struct UseCases {
    pub session: use_cases::SessionUseCases,
    pub reaper: Arc<use_cases::ReapIdleSessions>,
}

impl App {
    /// Wire the use cases over a fresh in-memory registry.
    ///
    /// `broadcaster` is how use cases reach connections; in production this is
    /// the WebSocket `ConnectionManager`.
    pub fn new(
        settings: &Settings,
        broadcaster: Arc<dyn BroadcastPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let registry = Arc::new(SessionRegistry::in_memory());

        let session = use_cases::SessionUseCases::new(
            Arc::new(CreateSession::new(
                registry.clone(),
                clock.clone(),
                SessionIdGenerator::new(settings.session_id_prefix.clone(), random),
            )),
            Arc::new(JoinSession::new(
                registry.clone(),
                broadcaster.clone(),
                clock.clone(),
            )),
            Arc::new(PostGameMessage::new(
                registry.clone(),
                broadcaster.clone(),
                clock.clone(),
            )),
            Arc::new(UpdatePlayer::new(
                registry.clone(),
                broadcaster.clone(),
                clock.clone(),
            )),
            Arc::new(DisconnectPlayer::new(
                registry.clone(),
                broadcaster,
                clock.clone(),
            )),
        );

        let reaper = Arc::new(use_cases::ReapIdleSessions::new(
            registry.clone(),
            clock.clone(),
            settings.session_idle_timeout,
        ));

        Self {
            registry,
            use_cases: UseCases { session, reaper },
            clock,
            started_at: Instant::now(),
        }
    }
}
