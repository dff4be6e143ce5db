//! Domain entities - Core business objects with identity

mod game_message;
mod player;

pub use game_message::{GameMessage, SYSTEM_AUTHOR};
pub use player::{Player, RESERVED_PLAYER_KEYS};
