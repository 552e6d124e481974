#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod game;
pub mod lobby;

pub use wordplay_core::Clock;

pub use app_services::AppServices;
pub use error::{GameError, LobbyError};
pub use game::{GameOverSummary, GameService, GameSnapshot, RoundTimer, answer_message};
pub use lobby::{
    HomeStats, LeaderboardView, Loadable, PartyBoard, PartyPoller, PlayerDirectory,
};
