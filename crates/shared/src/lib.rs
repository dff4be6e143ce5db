//! Tavern Protocol - Shared types for Engine and client communication
//!
//! This crate contains the wire-format types exchanged over a WebSocket:
//! - WebSocket message types (`ClientMessage`, `ServerMessage`)
//! - Acknowledgement payloads (`SessionSnapshot`, `JoinError`)
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json, and thiserror
//! 2. **No business logic** - Pure data types and serialization

pub mod messages;
pub mod responses;

pub use messages::{ClientMessage, ServerMessage};
pub use responses::{JoinError, SessionSnapshot};
