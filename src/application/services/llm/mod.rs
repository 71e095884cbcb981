//! Prompt rendering and reply parsing for the narrative backend

pub mod directive_parser;
pub mod prompt_builder;

pub use directive_parser::DirectiveParser;
pub use prompt_builder::{build_character_prompt, build_game_prompt, CharacterPromptKind};
