use wordplay_core::model::{AnswerOutcome, RoundId, RoundSession};

/// Final numbers shown once the clock runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverSummary {
    pub final_score: u32,
    pub completed: u32,
}

/// Render-ready copy of the session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub round_id: Option<RoundId>,
    pub words: Vec<String>,
    pub score: u32,
    pub remaining_secs: u32,
    pub playing: bool,
    pub completed: u32,
    pub game_over: Option<GameOverSummary>,
}

impl GameSnapshot {
    #[must_use]
    pub fn from_session(session: &RoundSession) -> Self {
        let (round_id, words) = match session.round() {
            Some(round) => (
                Some(round.id()),
                round
                    .arranged_words()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            ),
            None => (None, Vec::new()),
        };
        let game_over = session.is_game_over().then(|| GameOverSummary {
            final_score: session.score(),
            completed: session.completed(),
        });
        Self {
            round_id,
            words,
            score: session.score(),
            remaining_secs: session.remaining_secs(),
            playing: session.is_playing(),
            completed: session.completed(),
            game_over,
        }
    }

    /// Words joined with single spaces, as a sentence line.
    #[must_use]
    pub fn sentence_line(&self) -> String {
        self.words.join(" ")
    }
}

/// Feedback notice for a checked answer; `None` when there is nothing to say.
#[must_use]
pub fn answer_message(outcome: AnswerOutcome) -> Option<String> {
    match outcome {
        AnswerOutcome::Correct { awarded } => Some(format!("Correct! +{awarded} points")),
        AnswerOutcome::Incorrect => Some("Not quite right. Try again!".to_string()),
        AnswerOutcome::Inactive => None,
    }
}

impl GameOverSummary {
    #[must_use]
    pub fn message(&self) -> String {
        format!("Game Over! Final Score: {}", self.final_score)
    }
}
