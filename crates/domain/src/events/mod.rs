//! Domain events - outcomes returned from aggregate mutations

mod session_events;

pub use session_events::{MasterClaim, PlayerJoined, PlayerWentOffline};
