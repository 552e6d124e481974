use super::parties::PartyBoard;
use super::players::PlayerDirectory;

/// Headline numbers for the landing screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HomeStats {
    pub online_players: usize,
    pub active_parties: usize,
}

impl HomeStats {
    #[must_use]
    pub fn collect(players: &PlayerDirectory, parties: &PartyBoard) -> Self {
        Self {
            online_players: players.online_count(),
            active_parties: parties.playing_count(),
        }
    }
}
