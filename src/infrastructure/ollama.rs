//! Ollama LLM client (native chat API)
//!
//! Request: `{ model, messages: [{ role, content }], stream: false }`
//! Response: `{ message: { content } }`. Anything else is an invalid response.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::{LlmError, LlmPort, LlmRequest, LlmResponse};

/// Client for Ollama's `/api/chat` endpoint
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

#[async_trait]
impl LlmPort for OllamaClient {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let api_request = build_chat_request(&self.model, &request);
        tracing::debug!(model = %self.model, url = %self.chat_url(), "Calling Ollama");

        let response = self
            .client
            .post(self.chat_url())
            .json(&api_request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(LlmError::RequestFailed(format!("status {}: {}", status, body)));
        }

        parse_chat_response(&body)
    }
}

fn build_chat_request(model: &str, request: &LlmRequest) -> OllamaChatRequest {
    OllamaChatRequest {
        model: model.to_string(),
        messages: request
            .messages
            .iter()
            .map(|msg| OllamaMessage {
                role: msg.role.as_str().to_string(),
                content: msg.content.clone(),
            })
            .collect(),
        stream: false,
    }
}

fn parse_chat_response(body: &str) -> Result<LlmResponse, LlmError> {
    let response: OllamaChatResponse =
        serde_json::from_str(body).map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

    Ok(LlmResponse {
        content: response.message.content,
    })
}

// =============================================================================
// Ollama API types
// =============================================================================

#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct OllamaMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    content: String,
}
