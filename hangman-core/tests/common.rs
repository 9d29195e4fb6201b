#![allow(dead_code)]

use hangman_core::{GameEvent, GameEventBus, GameEventHandler, HangmanGame, Round, WordSource};
use hangman_types::ScoreResult;
use std::sync::{Arc, Mutex};

/// Creates a test WordSource with a known set of words
pub fn create_test_source() -> WordSource {
    WordSource::new("ashe\nzed\nlux\nannie\nteemo").unwrap()
}

/// Creates a round for `word` and applies every letter of `guesses`
pub fn play_round(word: &str, guesses: &str) -> Round {
    let mut round = Round::new(word).unwrap();
    for letter in guesses.chars() {
        round.guess_letter(letter).unwrap();
    }
    round
}

/// Creates a game with an event collector attached, playing `word`
pub fn create_game_with_word(word: &str) -> (HangmanGame, EventCollector) {
    let collector = EventCollector::new();
    let mut bus = GameEventBus::new();
    bus.add_handler(Box::new(collector.clone()));

    let mut game = HangmanGame::with_event_bus(create_test_source(), bus);
    game.start_round_with_word(word).unwrap();
    collector.clear();
    (game, collector)
}

/// Event collector for testing event emissions
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn finished_results(&self) -> Vec<ScoreResult> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                GameEvent::RoundFinished { result } => Some(result.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}
