use hangman_types::{GameError, GuessOutcome, ScoreResult};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{GameEvent, GameEventBus, GameEventHandler, Round, ScoringEngine, WordSource};

/// Drives rounds for a single player: picks words, applies guesses, scores
/// each round exactly once and publishes the resulting events.
#[derive(Debug)]
pub struct HangmanGame {
    word_source: WordSource,
    round: Round,
    player: Option<String>,
    last_result: Option<ScoreResult>,
    event_bus: GameEventBus,
}

impl HangmanGame {
    pub fn new(word_source: WordSource) -> Self {
        Self::with_event_bus(word_source, GameEventBus::new())
    }

    /// Handlers already registered on `event_bus` see the first round start.
    pub fn with_event_bus(word_source: WordSource, event_bus: GameEventBus) -> Self {
        let round = Round::from_normalized(Uuid::new_v4(), word_source.pick_word());
        let mut game = Self {
            word_source,
            round,
            player: None,
            last_result: None,
            event_bus,
        };
        game.publish_round_started();
        game
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler + Send>) {
        self.event_bus.add_handler(handler);
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn word_source(&self) -> &WordSource {
        &self.word_source
    }

    /// Nickname stamped on results of rounds that finish from now on.
    pub fn set_player(&mut self, nick: Option<String>) {
        self.player = nick;
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    /// Result of the most recently finished round, kept for display.
    pub fn last_result(&self) -> Option<&ScoreResult> {
        self.last_result.as_ref()
    }

    pub fn guess(&mut self, letter: char) -> Result<GuessOutcome, GameError> {
        let was_finished = self.round.outcome().is_terminal();
        let outcome = self.round.guess_letter(letter)?;

        if !outcome.changed_round() {
            debug!("Ignored guess {:?} in round {}", outcome, self.round.id());
            return Ok(outcome);
        }

        self.event_bus.publish(GameEvent::LetterGuessed {
            round_id: self.round.id(),
            outcome,
        });

        if !was_finished {
            if let Some(mut result) = ScoringEngine::score_round(&self.round) {
                result.nick = self.player.clone();
                info!(
                    "Round {} finished: {:?} with {} misses, {} points",
                    result.round_id, result.outcome, result.misses, result.points_awarded
                );
                self.last_result = Some(result.clone());
                self.event_bus.publish(GameEvent::RoundFinished { result });
            }
        }

        Ok(outcome)
    }

    /// Discard the current round and start another with a fresh word.
    pub fn new_round(&mut self) -> &Round {
        let word = self.word_source.pick_word();
        self.start_round(Round::from_normalized(Uuid::new_v4(), word))
    }

    /// Start a round on a word outside the catalog. The current round is
    /// kept when `word` has no letters.
    pub fn start_round_with_word(&mut self, word: &str) -> Result<&Round, GameError> {
        let round = Round::new(word)?;
        Ok(self.start_round(round))
    }

    fn start_round(&mut self, round: Round) -> &Round {
        self.round = round;
        self.publish_round_started();
        &self.round
    }

    fn publish_round_started(&mut self) {
        debug!(
            "Round {} started with a {} letter word",
            self.round.id(),
            self.round.word().len()
        );
        self.event_bus.publish(GameEvent::RoundStarted {
            round_id: self.round.id(),
            word_length: self.round.word().chars().count(),
        });
    }
}
