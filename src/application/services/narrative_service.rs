//! Narrative backend - turns a world snapshot and player input into an effect
//!
//! Each call:
//! 1. Waits on the rate limiter
//! 2. Renders the game master prompt from the snapshot
//! 3. Sends it to the LLM as one user message
//! 4. Parses the reply for a directive (first match wins)
//!
//! The backend never touches `WorldState`; it only reads the snapshot it is given.

use std::time::Duration;

use crate::application::ports::outbound::{LlmError, LlmPort, LlmRequest};
use crate::application::services::llm::{build_game_prompt, DirectiveParser};
use crate::application::services::rate_limiter::RateLimiter;
use crate::domain::value_objects::{NarrativeEffect, WorldSnapshot};

pub struct NarrativeBackend<L: LlmPort> {
    llm: L,
    rate_limiter: RateLimiter,
    parser: DirectiveParser,
}

impl<L: LlmPort> NarrativeBackend<L> {
    /// Create a backend with the default minimum call interval
    pub fn new(llm: L) -> Self {
        Self {
            llm,
            rate_limiter: RateLimiter::default(),
            parser: DirectiveParser::new(),
        }
    }

    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.rate_limiter = RateLimiter::new(min_interval);
        self
    }

    pub fn llm(&self) -> &L {
        &self.llm
    }

    /// Generate the narrative response for one turn
    pub async fn generate(
        &self,
        snapshot: &WorldSnapshot,
        player_input: &str,
    ) -> Result<NarrativeEffect, BackendError> {
        self.rate_limiter.acquire().await;

        let prompt = build_game_prompt(snapshot, player_input);
        tracing::debug!(prompt_chars = prompt.len(), "Sending narrative prompt");

        let response = self.llm.generate(LlmRequest::single_user(prompt)).await?;

        let directive = self.parser.parse_first(&response.content);
        if let Some(directive) = directive {
            tracing::debug!(?directive, "Directive found in narrative");
        }

        Ok(NarrativeEffect::new(response.content, directive))
    }
}

/// Errors that can occur in the narrative backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Transport failure or malformed reply from the LLM
    #[error("Failed to communicate with the game master: {0}")]
    Llm(#[from] LlmError),
}
