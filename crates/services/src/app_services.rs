use storage::Storage;
use tokio::try_join;
use wordplay_core::model::GameRules;

use crate::Clock;
use crate::error::LobbyError;
use crate::game::GameService;
use crate::lobby::{HomeStats, LeaderboardView, PartyBoard, PlayerDirectory};

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    rules: GameRules,
    seed: Option<u64>,
    storage: Storage,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: Storage, clock: Clock) -> Self {
        Self {
            clock,
            rules: GameRules::default(),
            seed: None,
            storage,
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: GameRules) -> Self {
        self.rules = rules;
        self
    }

    /// Seed every game built from here, for reproducible sessions.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn rules(&self) -> GameRules {
        self.rules
    }

    #[must_use]
    pub fn game(&self) -> GameService {
        let game = GameService::new(self.rules);
        match self.seed {
            Some(seed) => game.with_seed(seed),
            None => game,
        }
    }

    #[must_use]
    pub fn player_directory(&self) -> PlayerDirectory {
        PlayerDirectory::new(self.storage.players.clone())
    }

    #[must_use]
    pub fn party_board(&self) -> PartyBoard {
        PartyBoard::new(self.clock, self.storage.parties.clone())
    }

    #[must_use]
    pub fn leaderboard(&self) -> LeaderboardView {
        LeaderboardView::new(self.storage.leaderboard.clone())
    }

    /// Fetch players and parties together and count what is live.
    ///
    /// # Errors
    ///
    /// Returns the first `LobbyError` raised by either fetch.
    pub async fn home_stats(&self) -> Result<HomeStats, LobbyError> {
        let mut players = self.player_directory();
        let mut parties = self.party_board();
        try_join!(players.fetch(), parties.fetch())?;
        Ok(HomeStats::collect(&players, &parties))
    }
}
