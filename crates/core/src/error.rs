use thiserror::Error;

use crate::model::{PartyError, RoundError, RulesError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error(transparent)]
    Party(#[from] PartyError),
}
