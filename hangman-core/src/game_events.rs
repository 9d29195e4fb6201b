use hangman_types::{GuessOutcome, RoundId, ScoreResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    RoundStarted {
        round_id: RoundId,
        word_length: usize,
    },
    LetterGuessed {
        round_id: RoundId,
        outcome: GuessOutcome,
    },
    /// Emitted once, on the transition out of `InProgress`.
    RoundFinished { result: ScoreResult },
}

impl GameEvent {
    pub fn round_id(&self) -> RoundId {
        match self {
            GameEvent::RoundStarted { round_id, .. } => *round_id,
            GameEvent::LetterGuessed { round_id, .. } => *round_id,
            GameEvent::RoundFinished { result } => result.round_id,
        }
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler {
    fn handle_event(&mut self, event: GameEvent);
}

/// Simple event bus for distributing game events
#[derive(Default)]
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler + Send>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler + Send>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl std::fmt::Debug for GameEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
