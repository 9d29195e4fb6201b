use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    #[error("'{letter}' is not a guessable letter")]
    InvalidLetter { letter: char },
    #[error("{word:?} has no letters to guess")]
    InvalidWord { word: String },
    #[error("nickname must not be empty")]
    EmptyNick,
    #[error("word catalog is empty")]
    EmptyCatalog,
}
