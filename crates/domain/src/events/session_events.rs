//! Outcomes returned by `Session` mutations

use crate::entities::Player;

/// What happened to a join's request for the master role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterClaim {
    /// The joiner did not ask to be master
    NotRequested,
    /// No master existed; the joiner is now master
    Granted,
    /// A master already exists; the request was ignored
    AlreadyTaken,
}

/// Outcome of a player joining a session
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerJoined {
    /// Snapshot of the new player as stored
    pub player: Player,
    pub master_claim: MasterClaim,
}

/// Outcome of a player's connection going away
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerWentOffline {
    /// Snapshot of the player after being marked offline
    pub player: Player,
}
