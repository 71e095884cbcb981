//! Directives embedded in generated narrative and the effects they produce

use serde::{Deserialize, Serialize};

/// A typed game-state effect recognised in backend output.
///
/// This is a closed set: the parser only knows how to produce these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    /// `HEALTH_SUBTRACT(<n>)`
    HealthSubtract(u32),
}

/// The outcome of one narrative call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeEffect {
    /// Full reply text, directive substrings included
    pub content: String,
    pub health_delta: u32,
}

impl NarrativeEffect {
    pub fn new(content: impl Into<String>, directive: Option<Directive>) -> Self {
        let health_delta = match directive {
            Some(Directive::HealthSubtract(amount)) => amount,
            None => 0,
        };
        Self {
            content: content.into(),
            health_delta,
        }
    }
}
