//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;
use wordplay_core::model::{PartyError, PartyId, PlayerId, RoundError};

/// Errors emitted by `GameService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameError {
    #[error(transparent)]
    Round(#[from] RoundError),
}

/// Errors emitted by the lobby views.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LobbyError {
    #[error("no player with id {0}")]
    UnknownPlayer(PlayerId),
    #[error("no party with id {0}")]
    UnknownParty(PartyId),
    #[error(transparent)]
    Party(#[from] PartyError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
