use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::PartyId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PartyError {
    #[error("party name cannot be empty")]
    EmptyName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyStatus {
    Waiting,
    Playing,
    Finished,
}

impl PartyStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyStatus::Waiting => "waiting",
            PartyStatus::Playing => "playing",
            PartyStatus::Finished => "finished",
        }
    }
}

impl fmt::Display for PartyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    Solo,
    Versus,
}

impl PartyKind {
    /// Short badge text for listings.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PartyKind::Solo => "1 Player",
            PartyKind::Versus => "VS",
        }
    }
}

/// A mock matchmaking session grouping one or two named players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    pub name: String,
    pub players: Vec<String>,
    pub status: PartyStatus,
    pub created_at: DateTime<Utc>,
    pub kind: PartyKind,
}

impl Party {
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == PartyStatus::Playing
    }
}

/// Request to open a new party hosted by the local player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyDraft {
    name: String,
    kind: PartyKind,
    opponent: Option<String>,
}

impl PartyDraft {
    /// Name used for the local player in rosters.
    pub const HOST: &'static str = "You";
    /// Placeholder when a versus party has no named opponent.
    pub const UNKNOWN_OPPONENT: &'static str = "Unknown";

    /// # Errors
    ///
    /// Returns `PartyError::EmptyName` for a blank name.
    pub fn solo(name: impl Into<String>) -> Result<Self, PartyError> {
        Self::build(name.into(), PartyKind::Solo, None)
    }

    /// # Errors
    ///
    /// Returns `PartyError::EmptyName` for a blank name.
    pub fn versus(name: impl Into<String>, opponent: Option<String>) -> Result<Self, PartyError> {
        Self::build(name.into(), PartyKind::Versus, opponent)
    }

    fn build(name: String, kind: PartyKind, opponent: Option<String>) -> Result<Self, PartyError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(PartyError::EmptyName);
        }
        let opponent = opponent
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty());
        Ok(Self {
            name,
            kind,
            opponent,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> PartyKind {
        self.kind
    }

    /// Roster for the new party: the host alone, or host and opponent.
    #[must_use]
    pub fn roster(&self) -> Vec<String> {
        match self.kind {
            PartyKind::Solo => vec![Self::HOST.to_string()],
            PartyKind::Versus => vec![
                Self::HOST.to_string(),
                self.opponent
                    .clone()
                    .unwrap_or_else(|| Self::UNKNOWN_OPPONENT.to_string()),
            ],
        }
    }

    /// New parties always start out waiting.
    #[must_use]
    pub fn into_party(self, id: PartyId, created_at: DateTime<Utc>) -> Party {
        let players = self.roster();
        Party {
            id,
            name: self.name,
            players,
            status: PartyStatus::Waiting,
            created_at,
            kind: self.kind,
        }
    }
}
