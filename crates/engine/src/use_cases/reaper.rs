//! Idle session reaper.
//!
//! Sessions are never closed explicitly; they are evicted once nobody is
//! online and nothing has happened for longer than the idle timeout.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use tavern_domain::SessionId;

use crate::infrastructure::ports::ClockPort;
use crate::stores::SessionRegistry;

/// One eviction pass over every live session.
pub struct ReapIdleSessions {
    registry: Arc<SessionRegistry>,
    clock: Arc<dyn ClockPort>,
    idle_timeout: chrono::Duration,
}

impl ReapIdleSessions {
    pub fn new(
        registry: Arc<SessionRegistry>,
        clock: Arc<dyn ClockPort>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            clock,
            idle_timeout: chrono::Duration::from_std(idle_timeout)
                .unwrap_or(chrono::Duration::MAX),
        }
    }

    /// Evict every idle session. Returns the evicted ids.
    ///
    /// Runs under the registry lock, so a session is either evicted before a
    /// join reaches it or sees that join's activity.
    pub async fn execute(&self) -> Vec<SessionId> {
        let mut state = self.registry.lock().await;
        let now = self.clock.now();

        let idle: Vec<SessionId> = state
            .sessions()
            .all()
            .filter(|(_, session)| session.is_idle(now, self.idle_timeout))
            .map(|(id, _)| id.clone())
            .collect();

        for session_id in &idle {
            if let Some(session) = state.sessions_mut().delete(session_id) {
                tracing::info!(
                    session_id = %session_id,
                    players = session.players().len(),
                    log_len = session.game_log().len(),
                    "Idle session evicted"
                );
            }
        }

        tracing::debug!(
            evicted = idle.len(),
            remaining = state.sessions().len(),
            "Reaper sweep complete"
        );
        idle
    }
}

/// Run `reaper` every `interval` until the task is aborted.
///
/// The first sweep happens one full interval after start.
pub fn spawn_reaper(reaper: Arc<ReapIdleSessions>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            reaper.execute().await;
        }
    })
}
