use std::sync::Arc;

use storage::repository::PlayerRepository;
use wordplay_core::model::{Player, PlayerId, search_players};

use super::loadable::Loadable;
use crate::error::LobbyError;

/// Player browser: the fetched roster plus the opponent picked for a challenge.
pub struct PlayerDirectory {
    repo: Arc<dyn PlayerRepository>,
    players: Loadable<Player>,
    selected_opponent: Option<Player>,
}

impl PlayerDirectory {
    #[must_use]
    pub fn new(repo: Arc<dyn PlayerRepository>) -> Self {
        Self {
            repo,
            players: Loadable::new(),
            selected_opponent: None,
        }
    }

    /// # Errors
    ///
    /// Returns `LobbyError::Storage` when the fetch fails; the message is also
    /// kept in [`PlayerDirectory::state`].
    pub async fn fetch(&mut self) -> Result<(), LobbyError> {
        self.players.begin();
        let result = self.repo.list_players().await;
        self.players.settle(result, "players")?;
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> &Loadable<Player> {
        &self.players
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.players.items()
    }

    #[must_use]
    pub fn search(&self, needle: &str) -> Vec<&Player> {
        search_players(self.players.items(), needle)
    }

    #[must_use]
    pub fn find(&self, id: PlayerId) -> Option<&Player> {
        self.players.items().iter().find(|player| player.id == id)
    }

    #[must_use]
    pub fn online_count(&self) -> usize {
        self.players
            .items()
            .iter()
            .filter(|player| player.is_online)
            .count()
    }

    /// # Errors
    ///
    /// Returns `LobbyError::UnknownPlayer` if the id is not in the fetched roster.
    pub fn select_opponent(&mut self, id: PlayerId) -> Result<&Player, LobbyError> {
        let player = self.find(id).cloned().ok_or(LobbyError::UnknownPlayer(id))?;
        let selected = self.selected_opponent.insert(player);
        Ok(&*selected)
    }

    pub fn clear_opponent(&mut self) {
        self.selected_opponent = None;
    }

    #[must_use]
    pub fn selected_opponent(&self) -> Option<&Player> {
        self.selected_opponent.as_ref()
    }
}
