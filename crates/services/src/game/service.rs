use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use tracing::{debug, info};
use wordplay_core::model::{AnswerOutcome, GameRules, RoundSession, SentencePool, TickOutcome};

use crate::error::GameError;
use super::view::GameSnapshot;

/// Round state controller: drives one player's timed session.
///
/// Owns the session, the sentence pool and the RNG used for drawing and
/// shuffling. Seed it for reproducible games in tests.
pub struct GameService {
    session: RoundSession,
    pool: SentencePool,
    rng: StdRng,
}

impl GameService {
    #[must_use]
    pub fn new(rules: GameRules) -> Self {
        Self {
            session: RoundSession::new(rules),
            pool: SentencePool::builtin(),
            rng: StdRng::from_os_rng(),
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_pool(mut self, pool: SentencePool) -> Self {
        self.pool = pool;
        self
    }

    #[must_use]
    pub fn session(&self) -> &RoundSession {
        &self.session
    }

    #[must_use]
    pub fn pool(&self) -> &SentencePool {
        &self.pool
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_session(&self.session)
    }

    /// Reset the session and deal the first sentence.
    pub fn start(&mut self) -> GameSnapshot {
        self.session.start(&self.pool, &mut self.rng);
        info!(
            seconds = self.session.remaining_secs(),
            round = ?self.session.round().map(|r| r.id()),
            "game started"
        );
        self.snapshot()
    }

    /// # Errors
    ///
    /// Returns `GameError::Round` when no round is active or `order` is not a
    /// permutation of the sentence's positions.
    pub fn submit_order(&mut self, order: Vec<usize>) -> Result<(), GameError> {
        self.session.submit_order(order)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `GameError::Round` when no round is active or a position is out of range.
    pub fn move_word(&mut self, from: usize, to: usize) -> Result<(), GameError> {
        self.session.move_word(from, to)?;
        Ok(())
    }

    pub fn check_answer(&mut self) -> AnswerOutcome {
        let outcome = self.session.check_answer(&self.pool, &mut self.rng);
        match outcome {
            AnswerOutcome::Correct { awarded } => info!(
                awarded,
                score = self.session.score(),
                completed = self.session.completed(),
                "sentence solved"
            ),
            AnswerOutcome::Incorrect => debug!("arrangement rejected"),
            AnswerOutcome::Inactive => debug!("check ignored, no active round"),
        }
        outcome
    }

    /// Store the player's arrangement, then check it.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Round` if the arrangement cannot be stored; no check happens then.
    pub fn submit_and_check(&mut self, order: Vec<usize>) -> Result<AnswerOutcome, GameError> {
        self.submit_order(order)?;
        Ok(self.check_answer())
    }

    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.session.tick();
        if let TickOutcome::GameOver {
            final_score,
            completed,
        } = outcome
        {
            info!(final_score, completed, "game over");
        }
        outcome
    }

    pub fn end(&mut self) {
        if self.session.is_playing() {
            info!(score = self.session.score(), "game abandoned");
        }
        self.session.end();
    }
}

impl Default for GameService {
    fn default() -> Self {
        Self::new(GameRules::default())
    }
}

impl fmt::Debug for GameService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameService")
            .field("session", &self.session)
            .field("pool_len", &self.pool.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordplay_core::model::{RoundError, SentenceTemplate};

    fn seeded() -> GameService {
        GameService::default().with_seed(11)
    }

    #[test]
    fn start_deals_a_round() {
        let mut game = seeded();
        let snapshot = game.start();
        assert!(snapshot.playing);
        assert!(!snapshot.words.is_empty());
        assert_eq!(snapshot.remaining_secs, 60);
    }

    #[test]
    fn seeded_games_repeat() {
        let a = seeded().start();
        let b = seeded().start();
        assert_eq!(a, b);
    }

    #[test]
    fn submit_and_check_scores_correct_order() {
        let mut game = seeded();
        game.start();
        let canonical = game.session().round().unwrap().canonical_order().to_vec();
        let outcome = game.submit_and_check(canonical).unwrap();
        assert_eq!(outcome, AnswerOutcome::Correct { awarded: 100 });
        assert_eq!(game.snapshot().score, 100);
        assert_eq!(game.snapshot().completed, 1);
    }

    #[test]
    fn invalid_order_is_rejected_before_checking() {
        let mut game = seeded();
        game.start();
        let before = game.snapshot();
        let err = game.submit_and_check(vec![0, 0]).unwrap_err();
        assert!(matches!(
            err,
            GameError::Round(RoundError::LengthMismatch { .. })
        ));
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn moves_apply_to_the_board() {
        let pool = SentencePool::new(vec![
            SentenceTemplate::in_order(["a", "b", "c"]).unwrap(),
        ])
        .unwrap();
        let mut game = seeded().with_pool(pool);
        game.start();
        game.submit_order(vec![2, 0, 1]).unwrap();
        game.move_word(0, 2).unwrap();
        assert_eq!(game.snapshot().sentence_line(), "a b c");
        assert_eq!(
            game.check_answer(),
            AnswerOutcome::Correct { awarded: 100 }
        );
    }

    #[test]
    fn end_clears_the_round() {
        let mut game = seeded();
        game.start();
        game.end();
        let snapshot = game.snapshot();
        assert!(!snapshot.playing);
        assert!(snapshot.words.is_empty());
        assert_eq!(game.check_answer(), AnswerOutcome::Inactive);
    }
}
