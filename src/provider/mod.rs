use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::cli::ProviderKind;
use crate::config::Config;
use crate::errors::GenError;
use crate::wire::{Length, Vibe};

pub mod mock;
pub mod openai;

/// What a completion is for. Real providers only see the prompt; the mock
/// provider uses this to pick a canned answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Verse { length: Length, vibe: Vibe },
    Topic,
}

#[derive(Debug, Clone)]
pub struct Completion {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub task: Task,
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{0}")]
    Unconfigured(GenError),
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("undecodable response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else if e.is_connect() {
            ProviderError::Connect(e.to_string())
        } else if e.is_decode() {
            ProviderError::Decode(e.to_string())
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}

#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the raw text of the first choice.
    async fn complete(&self, req: &Completion) -> Result<String, ProviderError>;
}

pub type DynProvider = Arc<dyn Provider>;

pub fn make_provider(cfg: &Config) -> anyhow::Result<DynProvider> {
    match cfg.provider {
        ProviderKind::OpenAI => Ok(Arc::new(openai::OpenAIProvider::new(
            cfg.model.clone(),
            cfg.api_base.clone(),
            cfg.api_key.clone(),
            Duration::from_secs(cfg.timeout_secs),
        )?)),
        ProviderKind::Mock => Ok(Arc::new(mock::MockProvider)),
    }
}
