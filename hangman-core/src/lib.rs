pub mod game;
pub mod game_events;
pub mod round;
pub mod scoring;
pub mod session;
pub mod word_source;

// Re-export main components
pub use game::*;
pub use game_events::*;
pub use round::*;
pub use scoring::*;
pub use session::*;
pub use word_source::*;
