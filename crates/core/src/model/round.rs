use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::sentence::{RoundError, SentencePool, SentenceRound};

//
// ─── RULES ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RulesError {
    #[error("round length must be at least one second")]
    ZeroRoundLength,

    #[error("points per sentence must be > 0")]
    ZeroPoints,
}

/// Tunables for a timed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    round_seconds: u32,
    points_per_sentence: u32,
}

impl GameRules {
    pub const DEFAULT_ROUND_SECONDS: u32 = 60;
    pub const DEFAULT_POINTS_PER_SENTENCE: u32 = 100;

    /// # Errors
    ///
    /// Returns `RulesError` if either value is zero.
    pub fn new(round_seconds: u32, points_per_sentence: u32) -> Result<Self, RulesError> {
        if round_seconds == 0 {
            return Err(RulesError::ZeroRoundLength);
        }
        if points_per_sentence == 0 {
            return Err(RulesError::ZeroPoints);
        }
        Ok(Self {
            round_seconds,
            points_per_sentence,
        })
    }

    #[must_use]
    pub fn round_seconds(&self) -> u32 {
        self.round_seconds
    }

    #[must_use]
    pub fn points_per_sentence(&self) -> u32 {
        self.points_per_sentence
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            round_seconds: Self::DEFAULT_ROUND_SECONDS,
            points_per_sentence: Self::DEFAULT_POINTS_PER_SENTENCE,
        }
    }
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Result of checking the current arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The arrangement matched; points were awarded and a new sentence dealt.
    Correct { awarded: u32 },
    /// The arrangement did not match; nothing changed.
    Incorrect,
    /// No round is in progress.
    Inactive,
}

/// Result of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining: u32 },
    GameOver { final_score: u32, completed: u32 },
    /// The session was not playing; the tick was ignored.
    Idle,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State of one timed game: the active sentence, score, clock and progress.
///
/// Every transition is synchronous and total over in-memory data. Score and
/// completed count outlive the round so the game-over summary can read them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSession {
    rules: GameRules,
    round: Option<SentenceRound>,
    score: u32,
    remaining_secs: u32,
    playing: bool,
    completed: u32,
}

impl RoundSession {
    #[must_use]
    pub fn new(rules: GameRules) -> Self {
        Self {
            rules,
            round: None,
            score: 0,
            remaining_secs: rules.round_seconds(),
            playing: false,
            completed: 0,
        }
    }

    #[must_use]
    pub fn rules(&self) -> GameRules {
        self.rules
    }

    #[must_use]
    pub fn round(&self) -> Option<&SentenceRound> {
        self.round.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// True once the clock has run out.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        !self.playing && self.remaining_secs == 0
    }

    /// Reset score, clock and progress, then deal the first sentence.
    pub fn start<R: Rng + ?Sized>(&mut self, pool: &SentencePool, rng: &mut R) {
        self.score = 0;
        self.remaining_secs = self.rules.round_seconds();
        self.completed = 0;
        self.playing = true;
        self.round = Some(pool.draw(rng));
    }

    /// Overwrite the active round's arrangement.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::NoActiveRound` outside a game, or a permutation
    /// error when `order` does not fit the sentence.
    pub fn submit_order(&mut self, order: Vec<usize>) -> Result<(), RoundError> {
        self.active_round_mut()?.set_order(order)
    }

    /// # Errors
    ///
    /// Returns `RoundError::NoActiveRound` outside a game, or
    /// `RoundError::OutOfRange` for a bad position.
    pub fn move_word(&mut self, from: usize, to: usize) -> Result<(), RoundError> {
        self.active_round_mut()?.move_word(from, to)
    }

    /// Compare the arrangement with the canonical order and advance on a match.
    pub fn check_answer<R: Rng + ?Sized>(
        &mut self,
        pool: &SentencePool,
        rng: &mut R,
    ) -> AnswerOutcome {
        let Some(round) = self.round.as_ref() else {
            return AnswerOutcome::Inactive;
        };
        if !round.is_solved() {
            return AnswerOutcome::Incorrect;
        }

        let awarded = self.rules.points_per_sentence();
        self.score = self.score.saturating_add(awarded);
        self.completed = self.completed.saturating_add(1);
        self.round = Some(pool.draw(rng));
        AnswerOutcome::Correct { awarded }
    }

    /// Advance the clock by one second; the game ends when it reaches zero.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.playing {
            return TickOutcome::Idle;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return TickOutcome::Running {
                remaining: self.remaining_secs,
            };
        }

        self.playing = false;
        self.round = None;
        TickOutcome::GameOver {
            final_score: self.score,
            completed: self.completed,
        }
    }

    /// Abandon the current game without waiting for the clock.
    pub fn end(&mut self) {
        self.playing = false;
        self.round = None;
    }

    fn active_round_mut(&mut self) -> Result<&mut SentenceRound, RoundError> {
        self.round.as_mut().ok_or(RoundError::NoActiveRound)
    }
}

impl Default for RoundSession {
    fn default() -> Self {
        Self::new(GameRules::default())
    }
}
