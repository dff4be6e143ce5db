//! In-memory state storage modules.
//!
//! Stores manage runtime state that lives only as long as the process:
//! - `SessionRegistry` - sessions plus connection memberships, behind one lock

pub mod session;

// Re-export store types
pub use session::{RegistryState, SessionRegistry};
