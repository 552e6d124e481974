//! Literal lobby data the in-memory repository is seeded with.

use chrono::{DateTime, Utc};
use wordplay_core::model::{
    EntryId, LeaderboardEntry, Party, PartyId, PartyKind, PartyStatus, Player, PlayerId,
};

fn player(
    id: u64,
    name: &str,
    avatar: &str,
    level: u32,
    wins: u32,
    losses: u32,
    is_online: bool,
) -> Player {
    Player {
        id: PlayerId::new(id),
        name: name.to_string(),
        avatar: avatar.to_string(),
        level,
        wins,
        losses,
        is_online,
    }
}

#[must_use]
pub fn players() -> Vec<Player> {
    vec![
        player(1, "Alex Storm", "⚡", 15, 23, 5, true),
        player(2, "Maya Swift", "🌟", 12, 18, 7, true),
        player(3, "Rio Dash", "🚀", 20, 45, 10, false),
        player(4, "Luna Grace", "🌙", 8, 12, 8, true),
        player(5, "Kai Thunder", "⚔️", 18, 35, 15, true),
    ]
}

/// Mock parties, stamped with `now` as their creation time.
#[must_use]
pub fn parties(now: DateTime<Utc>) -> Vec<Party> {
    let party = |id: u64, name: &str, players: &[&str], status: PartyStatus, kind: PartyKind| Party {
        id: PartyId::new(id),
        name: name.to_string(),
        players: players.iter().map(|p| (*p).to_string()).collect(),
        status,
        created_at: now,
        kind,
    };
    vec![
        party(
            1,
            "Quick Challenge",
            &["Alex Storm", "Maya Swift"],
            PartyStatus::Playing,
            PartyKind::Versus,
        ),
        party(
            2,
            "Solo Sprint",
            &["Rio Dash"],
            PartyStatus::Playing,
            PartyKind::Solo,
        ),
        party(
            3,
            "Battle Royale",
            &["Luna Grace", "Kai Thunder"],
            PartyStatus::Waiting,
            PartyKind::Versus,
        ),
        party(
            4,
            "Speed Run",
            &["Alex Storm"],
            PartyStatus::Finished,
            PartyKind::Solo,
        ),
    ]
}

#[must_use]
pub fn leaderboard() -> Vec<LeaderboardEntry> {
    let entry = |id: u64, player_name: &str, avatar: &str, score: u32, wins: u32, rank: u32| {
        LeaderboardEntry {
            id: EntryId::new(id),
            player_name: player_name.to_string(),
            avatar: avatar.to_string(),
            score,
            wins,
            rank,
        }
    };
    vec![
        entry(1, "Rio Dash", "🚀", 4500, 45, 1),
        entry(2, "Kai Thunder", "⚔️", 3500, 35, 2),
        entry(3, "Alex Storm", "⚡", 2300, 23, 3),
        entry(4, "Maya Swift", "🌟", 1800, 18, 4),
        entry(5, "Luna Grace", "🌙", 1200, 12, 5),
    ]
}
