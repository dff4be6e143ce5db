//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area. Use cases talk to the
//! session registry and the outbound ports only; transports call into them.

pub mod reaper;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use reaper::{spawn_reaper, ReapIdleSessions};
pub use session::SessionUseCases;
