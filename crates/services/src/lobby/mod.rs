mod home;
mod leaderboard;
mod loadable;
mod parties;
mod players;

pub use home::HomeStats;
pub use leaderboard::LeaderboardView;
pub use loadable::Loadable;
pub use parties::{PartyBoard, PartyPoller};
pub use players::PlayerDirectory;
