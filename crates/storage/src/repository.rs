use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use wordplay_core::model::{
    LeaderboardEntry, Party, PartyDraft, PartyId, PartyStatus, Player,
};

use crate::mock;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("data source unavailable")]
    Unavailable,
}

/// Simulated round-trip delays for the mock data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub fetch: Duration,
    pub create: Duration,
}

impl Latency {
    /// No delay at all; used by tests.
    pub const NONE: Self = Self {
        fetch: Duration::ZERO,
        create: Duration::ZERO,
    };

    /// 500 ms per list fetch and 300 ms per create.
    #[must_use]
    pub fn mock() -> Self {
        Self {
            fetch: Duration::from_millis(500),
            create: Duration::from_millis(300),
        }
    }

    #[must_use]
    pub fn uniform(delay: Duration) -> Self {
        Self {
            fetch: delay,
            create: delay,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::mock()
    }
}

async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// List every known player.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data source cannot be reached.
    async fn list_players(&self) -> Result<Vec<Player>, StorageError>;
}

#[async_trait]
pub trait PartyRepository: Send + Sync {
    /// List parties, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data source cannot be reached.
    async fn list_parties(&self) -> Result<Vec<Party>, StorageError>;

    /// Store a new party built from `draft` and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the party cannot be stored.
    async fn create_party(
        &self,
        draft: PartyDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Party, StorageError>;

    /// Change the status of an existing party.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no party has the given id.
    async fn set_party_status(
        &self,
        id: PartyId,
        status: PartyStatus,
    ) -> Result<Party, StorageError>;
}

#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// List leaderboard rows in rank order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data source cannot be reached.
    async fn list_entries(&self) -> Result<Vec<LeaderboardEntry>, StorageError>;
}

/// In-memory stand-in for a lobby backend.
///
/// Clones share the same data. Every call waits out the configured
/// [`Latency`] before touching state so no lock is held across an await.
#[derive(Clone)]
pub struct InMemoryRepository {
    players: Arc<Mutex<Vec<Player>>>,
    parties: Arc<Mutex<Vec<Party>>>,
    leaderboard: Arc<Mutex<Vec<LeaderboardEntry>>>,
    latency: Latency,
    offline: Arc<AtomicBool>,
}

impl InMemoryRepository {
    /// Empty repository with no latency.
    #[must_use]
    pub fn new() -> Self {
        Self {
            players: Arc::new(Mutex::new(Vec::new())),
            parties: Arc::new(Mutex::new(Vec::new())),
            leaderboard: Arc::new(Mutex::new(Vec::new())),
            latency: Latency::NONE,
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Repository seeded with the bundled mock lobby.
    #[must_use]
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self {
            players: Arc::new(Mutex::new(mock::players())),
            parties: Arc::new(Mutex::new(mock::parties(now))),
            leaderboard: Arc::new(Mutex::new(mock::leaderboard())),
            latency: Latency::NONE,
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    /// Make every subsequent call fail with `StorageError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), StorageError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable);
        }
        Ok(())
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> StorageError {
    StorageError::Connection(err.to_string())
}

#[async_trait]
impl PlayerRepository for InMemoryRepository {
    async fn list_players(&self) -> Result<Vec<Player>, StorageError> {
        simulate(self.latency.fetch).await;
        self.ensure_online()?;
        let guard = self.players.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl PartyRepository for InMemoryRepository {
    async fn list_parties(&self) -> Result<Vec<Party>, StorageError> {
        simulate(self.latency.fetch).await;
        self.ensure_online()?;
        let guard = self.parties.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn create_party(
        &self,
        draft: PartyDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Party, StorageError> {
        simulate(self.latency.create).await;
        self.ensure_online()?;
        let mut guard = self.parties.lock().map_err(poisoned)?;
        let id = guard
            .iter()
            .map(|party| party.id)
            .max()
            .map_or_else(|| PartyId::new(1), |max| max.next());
        let party = draft.into_party(id, created_at);
        guard.insert(0, party.clone());
        Ok(party)
    }

    async fn set_party_status(
        &self,
        id: PartyId,
        status: PartyStatus,
    ) -> Result<Party, StorageError> {
        simulate(self.latency.create).await;
        self.ensure_online()?;
        let mut guard = self.parties.lock().map_err(poisoned)?;
        let party = guard
            .iter_mut()
            .find(|party| party.id == id)
            .ok_or(StorageError::NotFound)?;
        party.status = status;
        Ok(party.clone())
    }
}

#[async_trait]
impl LeaderboardRepository for InMemoryRepository {
    async fn list_entries(&self) -> Result<Vec<LeaderboardEntry>, StorageError> {
        simulate(self.latency.fetch).await;
        self.ensure_online()?;
        let guard = self.leaderboard.lock().map_err(poisoned)?;
        let mut entries = guard.clone();
        entries.sort_by_key(|entry| entry.rank);
        Ok(entries)
    }
}

/// Aggregates the lobby repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub players: Arc<dyn PlayerRepository>,
    pub parties: Arc<dyn PartyRepository>,
    pub leaderboard: Arc<dyn LeaderboardRepository>,
}

impl Storage {
    /// Mock lobby with the given simulated latency.
    #[must_use]
    pub fn mock(now: DateTime<Utc>, latency: Latency) -> Self {
        Self::from_repository(InMemoryRepository::seeded(now).with_latency(latency))
    }

    #[must_use]
    pub fn from_repository(repo: InMemoryRepository) -> Self {
        let players: Arc<dyn PlayerRepository> = Arc::new(repo.clone());
        let parties: Arc<dyn PartyRepository> = Arc::new(repo.clone());
        let leaderboard: Arc<dyn LeaderboardRepository> = Arc::new(repo);
        Self {
            players,
            parties,
            leaderboard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordplay_core::time::fixed_now;

    #[tokio::test]
    async fn seeded_repository_lists_mock_lobby() {
        let repo = InMemoryRepository::seeded(fixed_now());
        assert_eq!(repo.list_players().await.unwrap().len(), 5);
        assert_eq!(repo.list_parties().await.unwrap().len(), 4);
        let board = repo.list_entries().await.unwrap();
        assert_eq!(board.first().map(|e| e.player_name.as_str()), Some("Rio Dash"));
    }

    #[tokio::test]
    async fn created_party_is_prepended_with_next_id() {
        let repo = InMemoryRepository::seeded(fixed_now());
        let draft = PartyDraft::solo("Solo Challenge").unwrap();
        let party = repo.create_party(draft, fixed_now()).await.unwrap();
        assert_eq!(party.id, PartyId::new(5));

        let listed = repo.list_parties().await.unwrap();
        assert_eq!(listed.len(), 5);
        assert_eq!(listed[0], party);
    }

    #[tokio::test]
    async fn empty_repository_starts_ids_at_one() {
        let repo = InMemoryRepository::new();
        let draft = PartyDraft::versus("Duel", None).unwrap();
        let party = repo.create_party(draft, fixed_now()).await.unwrap();
        assert_eq!(party.id, PartyId::new(1));
        assert_eq!(party.players, vec!["You", "Unknown"]);
    }

    #[tokio::test]
    async fn status_update_of_missing_party_is_not_found() {
        let repo = InMemoryRepository::seeded(fixed_now());
        let err = repo
            .set_party_status(PartyId::new(99), PartyStatus::Finished)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn offline_repository_rejects_fetches() {
        let repo = InMemoryRepository::seeded(fixed_now());
        repo.set_offline(true);
        assert!(matches!(
            repo.list_players().await,
            Err(StorageError::Unavailable)
        ));
        repo.set_offline(false);
        assert!(repo.list_players().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_waits_out_simulated_latency() {
        let repo = InMemoryRepository::seeded(fixed_now()).with_latency(Latency::mock());
        let started = tokio::time::Instant::now();
        repo.list_players().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}
