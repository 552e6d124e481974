use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use services::{AppServices, Clock, HomeStats, PartyBoard};
use storage::repository::PartyRepository;
use storage::{InMemoryRepository, Latency, Storage, StorageError};
use wordplay_core::model::{Party, PartyDraft, PartyId, PartyKind, PartyStatus, PlayerId};
use wordplay_core::time::fixed_now;

fn services() -> AppServices {
    AppServices::new(Storage::mock(fixed_now(), Latency::NONE), Clock::fixed(fixed_now()))
}

#[tokio::test]
async fn challenge_creates_versus_party_against_opponent() {
    let app = services();
    let mut players = app.player_directory();
    let mut parties = app.party_board();
    players.fetch().await.expect("fetch players");
    parties.fetch().await.expect("fetch parties");

    let party = parties
        .challenge(&mut players, PlayerId::new(2))
        .await
        .expect("challenge")
        .clone();

    assert_eq!(party.name, "Challenge: You vs Maya Swift");
    assert_eq!(party.kind, PartyKind::Versus);
    assert_eq!(party.players, vec!["You", "Maya Swift"]);
    assert_eq!(party.status, PartyStatus::Waiting);
    assert_eq!(
        players.selected_opponent().map(|p| p.name.as_str()),
        Some("Maya Swift")
    );
    assert_eq!(parties.active(), Some(&party));

    // A fresh board sees the party on its next fetch.
    let mut other = app.party_board();
    other.fetch().await.expect("refetch");
    assert_eq!(other.parties()[0].id, party.id);
}

#[tokio::test]
async fn home_stats_count_live_lobby() {
    let stats = services().home_stats().await.expect("home stats");
    assert_eq!(
        stats,
        HomeStats {
            online_players: 4,
            active_parties: 2
        }
    );
}

#[tokio::test]
async fn home_stats_surface_fetch_failures() {
    let repo = InMemoryRepository::seeded(fixed_now());
    repo.set_offline(true);
    let app = AppServices::new(Storage::from_repository(repo), Clock::fixed(fixed_now()));
    assert!(app.home_stats().await.is_err());

    let mut board = app.party_board();
    assert!(board.fetch().await.is_err());
    assert_eq!(board.state().error(), Some("Failed to fetch parties"));
}

/// Fails the first `failures` list calls, then serves the seeded lobby.
struct FlakyParties {
    inner: InMemoryRepository,
    failures: AtomicUsize,
}

#[async_trait]
impl PartyRepository for FlakyParties {
    async fn list_parties(&self) -> Result<Vec<Party>, StorageError> {
        if self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok()
        {
            return Err(StorageError::Connection("reset by peer".into()));
        }
        self.inner.list_parties().await
    }

    async fn create_party(
        &self,
        draft: PartyDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Party, StorageError> {
        self.inner.create_party(draft, created_at).await
    }

    async fn set_party_status(
        &self,
        id: PartyId,
        status: PartyStatus,
    ) -> Result<Party, StorageError> {
        self.inner.set_party_status(id, status).await
    }
}

#[tokio::test]
async fn later_poll_recovers_from_failed_fetch() {
    let repo = FlakyParties {
        inner: InMemoryRepository::seeded(fixed_now()),
        failures: AtomicUsize::new(1),
    };
    let mut board = PartyBoard::new(Clock::fixed(fixed_now()), Arc::new(repo));

    assert!(board.fetch().await.is_err());
    assert_eq!(board.state().error(), Some("Failed to fetch parties"));
    assert!(board.parties().is_empty());

    board.fetch().await.expect("second fetch");
    assert_eq!(board.state().error(), None);
    assert_eq!(board.parties().len(), 4);
}
