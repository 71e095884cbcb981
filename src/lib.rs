//! Yikes Engine - an LLM-driven text adventure
//!
//! - `domain`: world state, character sheet, genres and directives
//! - `application`: the LLM port, narrative backend and session dispatcher
//! - `infrastructure`: Ollama adapter, configuration and the terminal frontend

pub mod application;
pub mod domain;
pub mod infrastructure;
