// Library interface for crossman
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod narrative;
pub mod phrases;
pub mod tui;

// Re-export commonly used items for easier testing
pub use config::GameConfig;
pub use error::CrossmanError;
pub use game_state::{GameInterface, GameState, UserAction, game_loop};
pub use narrative::StateNarrative;
pub use phrases::{choose_phrase, load_phrases_from_str, load_random_phrase};
