//! Character Service - LLM-generated character descriptions and backstories

use tracing::{debug, instrument};

use crate::application::ports::outbound::{LlmError, LlmPort, LlmRequest};
use crate::application::services::llm::{build_character_prompt, CharacterPromptKind};
use crate::domain::entities::CharacterSheet;

pub struct CharacterService<L: LlmPort> {
    llm: L,
}

impl<L: LlmPort> CharacterService<L> {
    pub fn new(llm: L) -> Self {
        Self { llm }
    }

    /// Generate one piece of character text from the race, occupation, age
    /// and sex already chosen on `character`
    #[instrument(skip(self, kind, character), fields(kind = kind.as_str()))]
    pub async fn generate(
        &self,
        kind: CharacterPromptKind,
        character: &CharacterSheet,
    ) -> Result<String, CharacterError> {
        let prompt = build_character_prompt(kind, character);
        debug!(prompt_chars = prompt.len(), "Requesting character text");

        let response = self
            .llm
            .generate(LlmRequest::single_user(prompt))
            .await
            .map_err(|source| CharacterError::Generation {
                kind: kind.as_str(),
                source,
            })?;

        Ok(response.content.trim().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CharacterError {
    #[error("Failed to generate {kind}: {source}")]
    Generation {
        kind: &'static str,
        #[source]
        source: LlmError,
    },
}
