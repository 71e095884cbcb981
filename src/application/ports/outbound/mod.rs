//! Outbound ports - Interfaces that the application requires from external systems

mod llm_port;

#[cfg(test)]
pub use llm_port::MockLlmPort;
pub use llm_port::{ChatMessage, LlmError, LlmPort, LlmRequest, LlmResponse, MessageRole};
