//! Tavern Domain - sessions, players, and the game log.
//!
//! Pure domain types with no I/O. The engine drives these through its
//! session registry; the shared crate serializes them onto the wire.

extern crate self as tavern_domain;

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;

pub use aggregates::{Session, MASTER_REQUEST_KEY, SESSION_CREATED_TEXT};
pub use entities::{GameMessage, Player, RESERVED_PLAYER_KEYS, SYSTEM_AUTHOR};
pub use error::DomainError;
pub use events::{MasterClaim, PlayerJoined, PlayerWentOffline};
pub use ids::{ConnectionId, SessionId};
pub use value_objects::Attributes;
