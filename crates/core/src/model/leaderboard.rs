use serde::{Deserialize, Serialize};

use crate::model::ids::EntryId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: EntryId,
    pub player_name: String,
    pub avatar: String,
    pub score: u32,
    pub wins: u32,
    pub rank: u32,
}

/// The top three entries by rank, best first.
#[must_use]
pub fn podium(entries: &[LeaderboardEntry]) -> Vec<&LeaderboardEntry> {
    let mut ranked: Vec<&LeaderboardEntry> = entries.iter().collect();
    ranked.sort_by_key(|entry| (entry.rank, entry.id));
    ranked.truncate(3);
    ranked
}
