use hangman_types::{MAX_MISSES, RoundOutcome, ScoreResult};
use std::collections::HashSet;

use crate::Round;

const POINTS_PER_DISTINCT_LETTER: u32 = 10;
const POINTS_PER_LETTER: u32 = 5;
const POINTS_PER_SPARE_ATTEMPT: u32 = 20;

pub struct ScoringEngine;

impl ScoringEngine {
    /// Points for a finished round. Lost rounds are worth nothing; a win is
    /// worth more for longer words and less for every miss.
    pub fn calculate_points(outcome: RoundOutcome, word: &str, missed_letters: &[char]) -> u32 {
        if outcome != RoundOutcome::Won {
            return 0;
        }

        let distinct = word.chars().collect::<HashSet<_>>().len() as u32;
        let length = word.chars().count() as u32;
        let spare_attempts = MAX_MISSES.saturating_sub(missed_letters.len()) as u32;

        distinct * POINTS_PER_DISTINCT_LETTER
            + length * POINTS_PER_LETTER
            + spare_attempts * POINTS_PER_SPARE_ATTEMPT
    }

    /// Score a round that has reached a terminal outcome.
    /// Returns `None` while the round is still being played.
    pub fn score_round(round: &Round) -> Option<ScoreResult> {
        let outcome = round.outcome();
        if !outcome.is_terminal() {
            return None;
        }

        let missed = round.missed_letters();
        Some(ScoreResult {
            round_id: round.id(),
            nick: None,
            word: round.word().to_string(),
            points_awarded: Self::calculate_points(outcome, round.word(), &missed),
            outcome,
            misses: missed.len() as u32,
            finished_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}
