use storage::repository::{Latency, Storage};
use wordplay_core::model::{PartyDraft, PartyId, PartyStatus};
use wordplay_core::time::fixed_now;

#[tokio::test]
async fn storage_handles_share_one_lobby() {
    let storage = Storage::mock(fixed_now(), Latency::NONE);

    let created = storage
        .parties
        .create_party(
            PartyDraft::versus("Challenge: You vs Luna Grace", Some("Luna Grace".into())).unwrap(),
            fixed_now(),
        )
        .await
        .expect("create party");
    storage
        .parties
        .set_party_status(created.id, PartyStatus::Playing)
        .await
        .expect("update status");

    let parties = storage.parties.list_parties().await.expect("list parties");
    assert_eq!(parties[0].id, created.id);
    assert_eq!(parties[0].status, PartyStatus::Playing);
    assert_eq!(parties[0].players, vec!["You", "Luna Grace"]);

    let battle = parties
        .iter()
        .find(|party| party.id == PartyId::new(3))
        .expect("seeded party");
    assert_eq!(battle.name, "Battle Royale");

    let online = storage
        .players
        .list_players()
        .await
        .expect("list players")
        .iter()
        .filter(|player| player.is_online)
        .count();
    assert_eq!(online, 4);

    let ranks: Vec<u32> = storage
        .leaderboard
        .list_entries()
        .await
        .expect("list leaderboard")
        .iter()
        .map(|entry| entry.rank)
        .collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
}
