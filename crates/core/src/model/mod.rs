mod ids;
mod leaderboard;
mod party;
mod player;
mod round;
mod sentence;

pub use ids::{EntryId, ParseIdError, PartyId, PlayerId, RoundId};

pub use leaderboard::{LeaderboardEntry, podium};
pub use party::{Party, PartyDraft, PartyError, PartyKind, PartyStatus};
pub use player::{Player, search_players};
pub use round::{AnswerOutcome, GameRules, RoundSession, RulesError, TickOutcome};
pub use sentence::{
    RoundError, SentencePool, SentenceRound, SentenceTemplate, is_permutation, orders_match,
};
