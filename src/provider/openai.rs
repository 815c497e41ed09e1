use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{Completion, Provider, ProviderError};
use crate::config::check_api_key;

/// OpenAI-compatible chat completions. The whole instruction goes out as a
/// single user message.
pub struct OpenAIProvider {
    model: String,
    chat_url: String,
    api_key: Option<String>,
    client: Client,
}

impl OpenAIProvider {
    pub fn new(
        model: String,
        api_base: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            model,
            chat_url: format!("{}/chat/completions", api_base.trim_end_matches('/')),
            api_key,
            client,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [Msg<'a>; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl Provider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, req: &Completion) -> Result<String, ProviderError> {
        let api_key = check_api_key(self.api_key.as_deref()).map_err(ProviderError::Unconfigured)?;

        let body = ChatRequest {
            model: &self.model,
            messages: [Msg { role: "user", content: &req.prompt }],
            max_tokens: req.max_tokens,
            temperature: req.temperature,
        };

        debug!(url = %self.chat_url, model = %self.model, "POST chat completion");

        let resp = self
            .client
            .post(&self.chat_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        debug!(status = status.as_u16(), bytes = text.len(), "chat completion returned");

        if !status.is_success() {
            return Err(ProviderError::Status { status: status.as_u16(), body: text });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::Decode(format!("{e}; raw: {text}")))?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}
