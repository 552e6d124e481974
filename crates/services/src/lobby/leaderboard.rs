use std::sync::Arc;

use storage::repository::LeaderboardRepository;
use wordplay_core::model::{LeaderboardEntry, podium};

use super::loadable::Loadable;
use crate::error::LobbyError;

pub struct LeaderboardView {
    repo: Arc<dyn LeaderboardRepository>,
    entries: Loadable<LeaderboardEntry>,
}

impl LeaderboardView {
    #[must_use]
    pub fn new(repo: Arc<dyn LeaderboardRepository>) -> Self {
        Self {
            repo,
            entries: Loadable::new(),
        }
    }

    /// # Errors
    ///
    /// Returns `LobbyError::Storage` when the fetch fails.
    pub async fn fetch(&mut self) -> Result<(), LobbyError> {
        self.entries.begin();
        let result = self.repo.list_entries().await;
        self.entries.settle(result, "leaderboard")?;
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> &Loadable<LeaderboardEntry> {
        &self.entries
    }

    #[must_use]
    pub fn entries(&self) -> &[LeaderboardEntry] {
        self.entries.items()
    }

    /// Top three rows, best first.
    #[must_use]
    pub fn podium(&self) -> Vec<&LeaderboardEntry> {
        podium(self.entries.items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryRepository;
    use wordplay_core::time::fixed_now;

    #[tokio::test]
    async fn podium_after_fetch() {
        let mut view = LeaderboardView::new(Arc::new(InMemoryRepository::seeded(fixed_now())));
        view.fetch().await.unwrap();
        let names: Vec<&str> = view
            .podium()
            .iter()
            .map(|entry| entry.player_name.as_str())
            .collect();
        assert_eq!(names, vec!["Rio Dash", "Kai Thunder", "Alex Storm"]);
        assert_eq!(view.entries().len(), 5);
    }

    #[tokio::test]
    async fn failure_message_names_leaderboard() {
        let repo = InMemoryRepository::seeded(fixed_now());
        repo.set_offline(true);
        let mut view = LeaderboardView::new(Arc::new(repo));
        assert!(view.fetch().await.is_err());
        assert_eq!(view.state().error(), Some("Failed to fetch leaderboard"));
    }
}
