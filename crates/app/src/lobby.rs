//! Printing for the lobby subcommands.

use services::{HomeStats, LeaderboardView, PartyBoard, PartyPoller, PlayerDirectory};
use tracing::warn;
use wordplay_core::model::{Party, Player};

fn player_line(player: &Player) -> String {
    let status = if player.is_online { "online" } else { "offline" };
    format!(
        "{:>3}  {} {:<14} lvl {:>2}  W {:>3}  L {:>3}  {:>3}%  {status}",
        player.id.value(),
        player.avatar,
        player.name,
        player.level,
        player.wins,
        player.losses,
        player.win_rate_percent(),
    )
}

fn party_line(party: &Party) -> String {
    format!(
        "{:>3}  {:<32} [{}] {:<8}  {}",
        party.id.value(),
        party.name,
        party.kind.label(),
        party.status,
        party.players.join(" vs "),
    )
}

pub fn print_players(directory: &PlayerDirectory, search: Option<&str>) {
    let found = directory.search(search.unwrap_or_default());
    if found.is_empty() {
        println!("No players found.");
        return;
    }
    for player in found {
        println!("{}", player_line(player));
    }
}

pub fn print_parties(board: &PartyBoard) {
    if let Some(error) = board.state().error() {
        println!("{error}");
    }
    for party in board.parties() {
        println!("{}", party_line(party));
    }
}

/// Print the party list, then keep re-fetching it every poll period.
pub async fn watch_parties(board: &mut PartyBoard, mut poller: PartyPoller) {
    print_parties(board);
    loop {
        tokio::select! {
            result = poller.refresh(board) => {
                if let Err(err) = result {
                    warn!(error = %err, "party refresh failed");
                }
                println!("--");
                print_parties(board);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
}

pub fn print_leaderboard(view: &LeaderboardView) {
    let medals = ["🥇", "🥈", "🥉"];
    for (medal, entry) in medals.iter().zip(view.podium()) {
        println!("{medal} {} {}  {} pts", entry.avatar, entry.player_name, entry.score);
    }
    println!();
    for entry in view.entries() {
        println!(
            "#{:<3} {} {:<14} {:>6} pts  {:>3} wins",
            entry.rank, entry.avatar, entry.player_name, entry.score, entry.wins
        );
    }
}

pub fn print_home(stats: HomeStats) {
    println!("Online players: {}", stats.online_players);
    println!("Active parties: {}", stats.active_parties);
}
