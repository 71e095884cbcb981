//! Application services - Use case implementations
//!
//! The narrative backend talks to the LLM, the session dispatcher owns the
//! world state and routes every command, and the character service drafts
//! character text during creation.

pub mod character_service;
pub mod llm;
pub mod narrative_service;
pub mod rate_limiter;
pub mod session_dispatcher;
pub mod system_commands;

pub use character_service::{CharacterError, CharacterService};
pub use narrative_service::{BackendError, NarrativeBackend};
pub use rate_limiter::{RateLimiter, DEFAULT_MIN_CALL_INTERVAL};
pub use session_dispatcher::{
    CommandResult, SessionDispatcher, SessionError, SessionState, BACKEND_FAILURE_MESSAGE,
    DEATH_NOTICE,
};
pub use system_commands::{SystemCommand, SYSTEM_COMMAND_PREFIX};
