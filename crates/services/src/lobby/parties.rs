use std::sync::Arc;
use std::time::Duration;

use storage::repository::PartyRepository;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::info;
use wordplay_core::Clock;
use wordplay_core::model::{Party, PartyDraft, PartyId, PartyStatus, PlayerId};

use super::loadable::Loadable;
use super::players::PlayerDirectory;
use crate::error::LobbyError;

/// Party list plus the party the local player is currently in.
pub struct PartyBoard {
    clock: Clock,
    repo: Arc<dyn PartyRepository>,
    parties: Loadable<Party>,
    active: Option<Party>,
}

impl PartyBoard {
    /// Name given to parties opened from the solo button.
    pub const SOLO_PARTY_NAME: &'static str = "Solo Challenge";

    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn PartyRepository>) -> Self {
        Self {
            clock,
            repo,
            parties: Loadable::new(),
            active: None,
        }
    }

    /// # Errors
    ///
    /// Returns `LobbyError::Storage` when the fetch fails; the message is also
    /// kept in [`PartyBoard::state`].
    pub async fn fetch(&mut self) -> Result<(), LobbyError> {
        self.parties.begin();
        let result = self.repo.list_parties().await;
        self.parties.settle(result, "parties")?;
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> &Loadable<Party> {
        &self.parties
    }

    #[must_use]
    pub fn parties(&self) -> &[Party] {
        self.parties.items()
    }

    #[must_use]
    pub fn find(&self, id: PartyId) -> Option<&Party> {
        self.parties.items().iter().find(|party| party.id == id)
    }

    /// Parties whose match is currently under way.
    #[must_use]
    pub fn playing_count(&self) -> usize {
        self.parties
            .items()
            .iter()
            .filter(|party| party.is_playing())
            .count()
    }

    #[must_use]
    pub fn active(&self) -> Option<&Party> {
        self.active.as_ref()
    }

    /// Open a party, list it first and make it the active one.
    ///
    /// # Errors
    ///
    /// Returns `LobbyError::Storage` if the party cannot be stored.
    pub async fn create(&mut self, draft: PartyDraft) -> Result<&Party, LobbyError> {
        let party = self.repo.create_party(draft, self.clock.now()).await?;
        info!(party = %party.id, name = %party.name, "party created");
        self.parties.items_mut().insert(0, party.clone());
        Ok(&*self.active.insert(party))
    }

    /// Open a single-player party.
    ///
    /// # Errors
    ///
    /// Returns `LobbyError::Storage` if the party cannot be stored.
    pub async fn start_solo(&mut self) -> Result<&Party, LobbyError> {
        let draft = PartyDraft::solo(Self::SOLO_PARTY_NAME)?;
        self.create(draft).await
    }

    /// Pick `player_id` as opponent and open a versus party against them.
    ///
    /// # Errors
    ///
    /// Returns `LobbyError::UnknownPlayer` if the player is not in the
    /// directory, or `LobbyError::Storage` if the party cannot be stored.
    pub async fn challenge(
        &mut self,
        players: &mut PlayerDirectory,
        player_id: PlayerId,
    ) -> Result<&Party, LobbyError> {
        let opponent = players.select_opponent(player_id)?.name.clone();
        let draft = PartyDraft::versus(
            format!("Challenge: {} vs {opponent}", PartyDraft::HOST),
            Some(opponent),
        )?;
        self.create(draft).await
    }

    /// Make a listed party the active one.
    ///
    /// # Errors
    ///
    /// Returns `LobbyError::UnknownParty` if no fetched party has that id.
    pub fn join(&mut self, id: PartyId) -> Result<&Party, LobbyError> {
        let party = self.find(id).cloned().ok_or(LobbyError::UnknownParty(id))?;
        info!(party = %id, "party joined");
        Ok(&*self.active.insert(party))
    }

    pub fn leave(&mut self) {
        self.active = None;
    }

    /// # Errors
    ///
    /// Returns `LobbyError::Storage` (`NotFound` for an unknown id) if the
    /// change cannot be stored.
    pub async fn update_status(
        &mut self,
        id: PartyId,
        status: PartyStatus,
    ) -> Result<(), LobbyError> {
        let updated = self.repo.set_party_status(id, status).await?;
        if let Some(party) = self
            .parties
            .items_mut()
            .iter_mut()
            .find(|party| party.id == id)
        {
            party.status = updated.status;
        }
        if let Some(active) = self.active.as_mut().filter(|party| party.id == id) {
            active.status = updated.status;
        }
        Ok(())
    }
}

/// Re-fetches a [`PartyBoard`] on a fixed period to pick up lobby changes.
#[derive(Debug)]
pub struct PartyPoller {
    interval: Interval,
}

impl PartyPoller {
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(5);

    /// The first refresh happens one period from now.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }

    /// Wait one period, then refresh `board`.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error; polling may continue afterwards.
    pub async fn refresh(&mut self, board: &mut PartyBoard) -> Result<(), LobbyError> {
        self.interval.tick().await;
        board.fetch().await
    }
}

impl Default for PartyPoller {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryRepository;
    use wordplay_core::model::PartyKind;
    use wordplay_core::time::{fixed_clock, fixed_now};

    fn board(repo: &InMemoryRepository) -> PartyBoard {
        PartyBoard::new(fixed_clock(), Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn solo_party_goes_first_and_becomes_active() {
        let repo = InMemoryRepository::seeded(fixed_now());
        let mut board = board(&repo);
        board.fetch().await.unwrap();

        let party = board.start_solo().await.unwrap().clone();
        assert_eq!(party.name, "Solo Challenge");
        assert_eq!(party.kind, PartyKind::Solo);
        assert_eq!(party.status, PartyStatus::Waiting);
        assert_eq!(party.created_at, fixed_now());
        assert_eq!(board.parties()[0], party);
        assert_eq!(board.active(), Some(&party));
    }

    #[tokio::test]
    async fn join_and_leave() {
        let repo = InMemoryRepository::seeded(fixed_now());
        let mut board = board(&repo);
        board.fetch().await.unwrap();

        let joined = board.join(PartyId::new(3)).unwrap();
        assert_eq!(joined.name, "Battle Royale");
        board.leave();
        assert!(board.active().is_none());

        assert!(matches!(
            board.join(PartyId::new(77)),
            Err(LobbyError::UnknownParty(_))
        ));
    }

    #[tokio::test]
    async fn update_status_touches_list_and_active() {
        let repo = InMemoryRepository::seeded(fixed_now());
        let mut board = board(&repo);
        board.fetch().await.unwrap();
        assert_eq!(board.playing_count(), 2);

        board.join(PartyId::new(3)).unwrap();
        board
            .update_status(PartyId::new(3), PartyStatus::Playing)
            .await
            .unwrap();
        assert_eq!(board.playing_count(), 3);
        assert_eq!(
            board.active().map(|party| party.status),
            Some(PartyStatus::Playing)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn poller_refreshes_after_each_period() {
        let repo = InMemoryRepository::seeded(fixed_now());
        let mut board = board(&repo);
        let mut poller = PartyPoller::default();

        let started = Instant::now();
        poller.refresh(&mut board).await.unwrap();
        assert!(started.elapsed() >= PartyPoller::DEFAULT_PERIOD);
        assert_eq!(board.parties().len(), 4);

        repo.create_party(PartyDraft::solo("Late Joiner").unwrap(), fixed_now())
            .await
            .unwrap();
        poller.refresh(&mut board).await.unwrap();
        assert_eq!(board.parties().len(), 5);
        assert_eq!(board.parties()[0].name, "Late Joiner");
    }
}
