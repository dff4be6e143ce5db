//! Session use cases.
//!
//! Every flow takes the registry lock for its whole duration, including the
//! sends it triggers, so the order clients observe matches the order the
//! registry applied the changes.

use std::sync::Arc;

mod create_session;
mod disconnect;
mod fanout;
mod game_message;
mod join_session;
mod update_player;

pub use create_session::{CreateSession, SessionIdGenerator};
pub use disconnect::DisconnectPlayer;
pub use game_message::PostGameMessage;
pub use join_session::{JoinSession, JoinSessionError, JoinedSession};
pub use update_player::UpdatePlayer;

/// Container for session use cases.
pub struct SessionUseCases {
    pub create: Arc<CreateSession>,
    pub join: Arc<JoinSession>,
    pub game_message: Arc<PostGameMessage>,
    pub update_player: Arc<UpdatePlayer>,
    pub disconnect: Arc<DisconnectPlayer>,
}

impl SessionUseCases {
    pub fn new(
        create: Arc<CreateSession>,
        join: Arc<JoinSession>,
        game_message: Arc<PostGameMessage>,
        update_player: Arc<UpdatePlayer>,
        disconnect: Arc<DisconnectPlayer>,
    ) -> Self {
        Self {
            create,
            join,
            game_message,
            update_player,
            disconnect,
        }
    }
}
