use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::RoundId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("sentence must contain at least one word")]
    EmptySentence,

    #[error("order has {actual} positions but the sentence has {expected} words")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("order is not a permutation of 0..{len}")]
    NotAPermutation { len: usize },

    #[error("position {index} is out of range for {len} words")]
    OutOfRange { index: usize, len: usize },

    #[error("sentence pool is empty")]
    EmptyPool,

    #[error("no round is in progress")]
    NoActiveRound,
}

//
// ─── ORDERING CHECK ────────────────────────────────────────────────────────────
//

/// Returns true when `order` holds every index in `0..len` exactly once.
#[must_use]
pub fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &index in order {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

/// Element-wise comparison of an arrangement against the canonical order.
#[must_use]
pub fn orders_match(current: &[usize], canonical: &[usize]) -> bool {
    current == canonical
}

fn check_permutation(order: &[usize], len: usize) -> Result<(), RoundError> {
    if order.len() != len {
        return Err(RoundError::LengthMismatch {
            expected: len,
            actual: order.len(),
        });
    }
    if !is_permutation(order, len) {
        return Err(RoundError::NotAPermutation { len });
    }
    Ok(())
}

//
// ─── TEMPLATE ──────────────────────────────────────────────────────────────────
//

/// A sentence as authored: its words and the index order that reads correctly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceTemplate {
    words: Vec<String>,
    canonical_order: Vec<usize>,
}

impl SentenceTemplate {
    /// # Errors
    ///
    /// Returns `RoundError::EmptySentence` for an empty word list, or a
    /// permutation error when `canonical_order` does not cover `0..words.len()`.
    pub fn new<I, S>(words: I, canonical_order: Vec<usize>) -> Result<Self, RoundError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(RoundError::EmptySentence);
        }
        check_permutation(&canonical_order, words.len())?;
        Ok(Self {
            words,
            canonical_order,
        })
    }

    /// A sentence whose words are already listed in reading order.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::EmptySentence` for an empty word list.
    pub fn in_order<I, S>(words: I) -> Result<Self, RoundError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        let identity = (0..words.len()).collect();
        Self::new(words, identity)
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn canonical_order(&self) -> &[usize] {
        &self.canonical_order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Deal a round with the canonical order shuffled (Fisher-Yates).
    pub fn deal<R: Rng + ?Sized>(&self, rng: &mut R) -> SentenceRound {
        let mut current_order = self.canonical_order.clone();
        current_order.shuffle(rng);
        SentenceRound {
            id: RoundId::random(rng),
            words: self.words.clone(),
            canonical_order: self.canonical_order.clone(),
            current_order,
        }
    }
}

//
// ─── ROUND ─────────────────────────────────────────────────────────────────────
//

/// One sentence-ordering challenge and the player's current arrangement.
///
/// `current_order` is always a permutation of the same index set as
/// `canonical_order`; every mutator rejects input that would break that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRound {
    id: RoundId,
    words: Vec<String>,
    canonical_order: Vec<usize>,
    current_order: Vec<usize>,
}

impl SentenceRound {
    /// Build a round with an explicit arrangement.
    ///
    /// # Errors
    ///
    /// Returns a permutation error when `current_order` does not fit the template.
    pub fn with_order(
        template: &SentenceTemplate,
        id: RoundId,
        current_order: Vec<usize>,
    ) -> Result<Self, RoundError> {
        check_permutation(&current_order, template.len())?;
        Ok(Self {
            id,
            words: template.words.clone(),
            canonical_order: template.canonical_order.clone(),
            current_order,
        })
    }

    #[must_use]
    pub fn id(&self) -> RoundId {
        self.id
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn canonical_order(&self) -> &[usize] {
        &self.canonical_order
    }

    #[must_use]
    pub fn current_order(&self) -> &[usize] {
        &self.current_order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        orders_match(&self.current_order, &self.canonical_order)
    }

    /// Words as the player currently sees them.
    #[must_use]
    pub fn arranged_words(&self) -> Vec<&str> {
        self.current_order
            .iter()
            .map(|&index| self.words[index].as_str())
            .collect()
    }

    /// Replace the arrangement wholesale.
    ///
    /// # Errors
    ///
    /// Returns a permutation error and leaves the round untouched when `order`
    /// is not a permutation of `0..len`.
    pub fn set_order(&mut self, order: Vec<usize>) -> Result<(), RoundError> {
        check_permutation(&order, self.len())?;
        self.current_order = order;
        Ok(())
    }

    /// Drag the word at position `from` so it lands at position `to`.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::OutOfRange` if either position is past the end.
    pub fn move_word(&mut self, from: usize, to: usize) -> Result<(), RoundError> {
        let len = self.len();
        for index in [from, to] {
            if index >= len {
                return Err(RoundError::OutOfRange { index, len });
            }
        }
        let moved = self.current_order.remove(from);
        self.current_order.insert(to, moved);
        Ok(())
    }
}

//
// ─── POOL ──────────────────────────────────────────────────────────────────────
//

/// The fixed set of sentences rounds are drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePool {
    templates: Vec<SentenceTemplate>,
}

impl SentencePool {
    /// # Errors
    ///
    /// Returns `RoundError::EmptyPool` if no templates are given.
    pub fn new(templates: Vec<SentenceTemplate>) -> Result<Self, RoundError> {
        if templates.is_empty() {
            return Err(RoundError::EmptyPool);
        }
        Ok(Self { templates })
    }

    /// The three sentences shipped with the game.
    #[must_use]
    pub fn builtin() -> Self {
        let templates = [
            &["The", "quick", "brown", "fox", "jumps"][..],
            &["over", "the", "lazy", "dog"][..],
            &["I", "love", "playing", "word", "games"][..],
        ]
        .into_iter()
        .filter_map(|words| SentenceTemplate::in_order(words.iter().copied()).ok())
        .collect();
        Self { templates }
    }

    #[must_use]
    pub fn templates(&self) -> &[SentenceTemplate] {
        &self.templates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Pick a template uniformly and deal a shuffled round from it.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> SentenceRound {
        let index = rng.random_range(0..self.templates.len());
        self.templates[index].deal(rng)
    }
}

impl Default for SentencePool {
    fn default() -> Self {
        Self::builtin()
    }
}
