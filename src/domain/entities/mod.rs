//! Domain entities - Core game objects with identity and lifecycle

mod character;
mod world_state;

pub use character::{
    resolve_age, resolve_occupation, resolve_race, resolve_sex, CharacterSheet, Resolved, Sex,
    DEFAULT_RACE, MAX_AGE, MIN_AGE,
};
pub use world_state::{
    WorldState, WorldStateError, DEFAULT_CONTEXT_WINDOW, MAX_HEALTH, TRANSCRIPT_SEPARATOR,
};
