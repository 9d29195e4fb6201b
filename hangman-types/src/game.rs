use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

pub type RoundId = Uuid;

/// Number of missed letters that ends a round as lost.
pub const MAX_MISSES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundOutcome {
    InProgress,
    Won,
    Lost,
}

impl RoundOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundOutcome::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum IgnoreReason {
    AlreadyGuessed,
    RoundOver,
}

/// What a single letter guess did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GuessOutcome {
    Hit { letter: char },
    Miss { letter: char },
    Ignored { letter: char, reason: IgnoreReason },
}

impl GuessOutcome {
    pub fn changed_round(&self) -> bool {
        !matches!(self, GuessOutcome::Ignored { .. })
    }
}

/// Final result of a terminated round. Built once, at the transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreResult {
    pub round_id: RoundId,
    /// Player who was signed in when the round ended.
    pub nick: Option<String>,
    pub word: String,
    pub points_awarded: u32,
    pub outcome: RoundOutcome,
    pub misses: u32,
    pub finished_at: String, // ISO 8601 string
}

impl ScoreResult {
    pub fn is_win(&self) -> bool {
        self.outcome == RoundOutcome::Won
    }
}

/// Snapshot of a round that is safe to hand to a front end.
/// The target word stays masked until the round is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundView {
    pub round_id: RoundId,
    pub masked_word: String,
    pub word_length: u32,
    pub guessed_letters: Vec<char>,
    pub hit_letters: Vec<char>,
    pub missed_letters: Vec<char>,
    pub remaining_attempts: u32,
    pub outcome: RoundOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_outcomes() {
        assert!(!RoundOutcome::InProgress.is_terminal());
        assert!(RoundOutcome::Won.is_terminal());
        assert!(RoundOutcome::Lost.is_terminal());
    }

    #[test]
    fn test_ignored_guess_does_not_change_round() {
        let ignored = GuessOutcome::Ignored {
            letter: 'a',
            reason: IgnoreReason::AlreadyGuessed,
        };
        assert!(!ignored.changed_round());
        assert!(GuessOutcome::Hit { letter: 'a' }.changed_round());
        assert!(GuessOutcome::Miss { letter: 'z' }.changed_round());
    }
}
