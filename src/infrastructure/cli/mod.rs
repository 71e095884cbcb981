//! Terminal frontend: line-based IO, the character questionnaire and the game loop

mod character_creation;
mod repl;
mod shutdown;
mod terminal;

pub use character_creation::create_character;
pub use repl::run_session;
pub use shutdown::{shutdown_signal, ShutdownReason};
pub use terminal::Terminal;
