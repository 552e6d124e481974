use serde::{Deserialize, Serialize};

use crate::model::ids::PlayerId;

/// A player shown in the lobby.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub avatar: String,
    pub level: u32,
    pub wins: u32,
    pub losses: u32,
    pub is_online: bool,
}

impl Player {
    /// Percentage of games won, rounded to the nearest whole number.
    ///
    /// Players without any recorded games report 0.
    #[must_use]
    pub fn win_rate_percent(&self) -> u32 {
        let played = u64::from(self.wins) + u64::from(self.losses);
        if played == 0 {
            return 0;
        }
        let scaled = u64::from(self.wins) * 100;
        u32::try_from((scaled + played / 2) / played).unwrap_or(100)
    }

    /// Case-insensitive substring match on the display name.
    #[must_use]
    pub fn name_matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Filter players by name; an empty or blank needle keeps everyone.
#[must_use]
pub fn search_players<'a>(players: &'a [Player], needle: &str) -> Vec<&'a Player> {
    let needle = needle.trim();
    players
        .iter()
        .filter(|player| needle.is_empty() || player.name_matches(needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, wins: u32, losses: u32) -> Player {
        Player {
            id: PlayerId::new(1),
            name: name.to_string(),
            avatar: "*".to_string(),
            level: 1,
            wins,
            losses,
            is_online: true,
        }
    }

    #[test]
    fn win_rate_rounds_to_nearest() {
        assert_eq!(player("Alex Storm", 23, 5).win_rate_percent(), 82);
        assert_eq!(player("Luna Grace", 12, 8).win_rate_percent(), 60);
        assert_eq!(player("Kai Thunder", 35, 15).win_rate_percent(), 70);
        assert_eq!(player("New", 0, 0).win_rate_percent(), 0);
    }

    #[test]
    fn search_ignores_case() {
        let players = vec![player("Maya Swift", 1, 1), player("Rio Dash", 1, 1)];
        let found = search_players(&players, "mAyA");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Maya Swift");
        assert_eq!(search_players(&players, "  ").len(), 2);
        assert!(search_players(&players, "zed").is_empty());
    }
}
