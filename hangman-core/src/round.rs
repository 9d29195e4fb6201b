use hangman_types::{
    GameError, GuessOutcome, IgnoreReason, MAX_MISSES, RoundId, RoundOutcome, RoundView,
};
use uuid::Uuid;

use crate::normalize_word;

/// One play-through from word selection to a terminal outcome.
///
/// Only the target word and the guesses are stored. Misses, win and loss
/// are derived on every read so they can never drift from the guesses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    id: RoundId,
    word: String,
    guessed_letters: Vec<char>,
}

impl Round {
    pub fn new(word: &str) -> Result<Self, GameError> {
        Self::with_id(Uuid::new_v4(), word)
    }

    /// The word is normalized to lowercase ASCII letters; a word with no
    /// letters left is rejected.
    pub fn with_id(id: RoundId, word: &str) -> Result<Self, GameError> {
        let normalized = normalize_word(word);
        if normalized.is_empty() {
            return Err(GameError::InvalidWord {
                word: word.to_string(),
            });
        }
        Ok(Self::from_normalized(id, normalized))
    }

    /// Catalog words are normalized and non-empty already.
    pub(crate) fn from_normalized(id: RoundId, word: String) -> Self {
        Self {
            id,
            word,
            guessed_letters: Vec::new(),
        }
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    /// Guessed letters in arrival order.
    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed_letters
    }

    /// Apply a guess. Repeats and guesses after the round ended are no-ops.
    pub fn guess_letter(&mut self, letter: char) -> Result<GuessOutcome, GameError> {
        if !letter.is_ascii_alphabetic() {
            return Err(GameError::InvalidLetter { letter });
        }
        let letter = letter.to_ascii_lowercase();

        if self.outcome().is_terminal() {
            return Ok(GuessOutcome::Ignored {
                letter,
                reason: IgnoreReason::RoundOver,
            });
        }
        if self.guessed_letters.contains(&letter) {
            return Ok(GuessOutcome::Ignored {
                letter,
                reason: IgnoreReason::AlreadyGuessed,
            });
        }

        self.guessed_letters.push(letter);
        if self.word.contains(letter) {
            Ok(GuessOutcome::Hit { letter })
        } else {
            Ok(GuessOutcome::Miss { letter })
        }
    }

    pub fn missed_letters(&self) -> Vec<char> {
        self.guessed_letters
            .iter()
            .copied()
            .filter(|letter| !self.word.contains(*letter))
            .collect()
    }

    pub fn hit_letters(&self) -> Vec<char> {
        self.guessed_letters
            .iter()
            .copied()
            .filter(|letter| self.word.contains(*letter))
            .collect()
    }

    pub fn is_won(&self) -> bool {
        self.word
            .chars()
            .all(|letter| self.guessed_letters.contains(&letter))
    }

    pub fn is_lost(&self) -> bool {
        self.missed_letters().len() >= MAX_MISSES
    }

    /// Win is checked before loss.
    pub fn outcome(&self) -> RoundOutcome {
        if self.is_won() {
            RoundOutcome::Won
        } else if self.is_lost() {
            RoundOutcome::Lost
        } else {
            RoundOutcome::InProgress
        }
    }

    pub fn remaining_attempts(&self) -> usize {
        MAX_MISSES.saturating_sub(self.missed_letters().len())
    }

    /// Word with unguessed letters replaced by `_`. Fully revealed once the
    /// round is over.
    pub fn masked_word(&self) -> String {
        let reveal_all = self.outcome().is_terminal();
        self.word
            .chars()
            .map(|letter| {
                if reveal_all || self.guessed_letters.contains(&letter) {
                    letter
                } else {
                    '_'
                }
            })
            .collect()
    }

    pub fn view(&self) -> RoundView {
        RoundView {
            round_id: self.id,
            masked_word: self.masked_word(),
            word_length: self.word.chars().count() as u32,
            guessed_letters: self.guessed_letters.clone(),
            hit_letters: self.hit_letters(),
            missed_letters: self.missed_letters(),
            remaining_attempts: self.remaining_attempts() as u32,
            outcome: self.outcome(),
        }
    }
}
