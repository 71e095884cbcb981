//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Ollama: LLM integration for narration and character drafts
//! - Config: Application configuration
//! - CLI: Terminal frontend

pub mod cli;
pub mod config;
pub mod ollama;
