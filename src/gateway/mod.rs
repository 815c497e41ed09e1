//! Model-facing side of the app: builds prompts, performs the single
//! upstream call, parses the labeled reply and classifies failures.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::{ErrorKind, GenError};
use crate::log::transcript::Transcripts;
use crate::prompt::{self, EXPLANATION_MARKER, VERSE_MARKER};
use crate::provider::{Completion, DynProvider, ProviderError, Task};
use crate::wire::{GeneratedVerse, VerseParams};

pub mod topic;

const GENERIC_VERSE_FAILURE: &str = "Failed to generate verse. Please try again.";

#[derive(Clone)]
pub struct Gateway {
    provider: DynProvider,
    max_tokens: u32,
    temperature: f32,
    transcripts: Option<Transcripts>,
}

impl Gateway {
    pub fn new(provider: DynProvider, cfg: &Config) -> Self {
        Self {
            provider,
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
            transcripts: None,
        }
    }

    pub fn with_transcripts(mut self, transcripts: Transcripts) -> Self {
        self.transcripts = Some(transcripts);
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn generate_verse(&self, params: &VerseParams) -> Result<GeneratedVerse, GenError> {
        let completion = Completion {
            prompt: prompt::build_verse_prompt(params),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            task: Task::Verse { length: params.length, vibe: params.vibe },
        };

        let raw = self
            .exchange("verse", &completion)
            .await
            .map_err(map_verse_error)?;

        if raw.trim().is_empty() {
            warn!("model returned an empty verse");
            return Err(GenError::new(ErrorKind::InvalidResponse, GENERIC_VERSE_FAILURE));
        }

        let verse = parse_verse_explanation(&raw, params.subject());
        info!(
            vibe = %params.vibe,
            format = %params.format,
            length = %params.length,
            lines = verse.verse.lines().count(),
            "verse generated"
        );
        Ok(verse)
    }

    /// One provider round trip, recorded when transcripts are enabled.
    async fn exchange(&self, stage: &str, completion: &Completion) -> Result<String, ProviderError> {
        debug!(stage, provider = self.provider.name(), prompt = %completion.prompt, "sending completion");
        let outcome = self.provider.complete(completion).await;
        match &outcome {
            Ok(raw) => debug!(stage, raw = %raw, "completion received"),
            Err(e) => warn!(stage, error = %e, "completion failed"),
        }
        if let Some(t) = &self.transcripts {
            match t.save(stage, Uuid::new_v4(), completion, &outcome) {
                Ok(saved) => debug!(
                    stage,
                    dir = %saved.dir.display(),
                    request = %saved.request.display(),
                    response = %saved.response.display(),
                    "transcript saved"
                ),
                Err(e) => warn!(stage, error = %e, "could not save transcript"),
            }
        }
        outcome
    }
}

/// Split a labeled reply into verse and explanation.
///
/// With an explanation marker, everything before it (minus the verse marker)
/// is the verse. Without one, the whole reply is the verse. A missing
/// explanation is replaced by a sentence naming `fallback_subject`.
pub fn parse_verse_explanation(content: &str, fallback_subject: &str) -> GeneratedVerse {
    let (verse, explanation) = match content.split_once(EXPLANATION_MARKER) {
        Some((verse_section, rest)) => {
            // Anything after a second explanation marker is dropped.
            let explanation = rest.split(EXPLANATION_MARKER).next().unwrap_or_default();
            (
                verse_section.replacen(VERSE_MARKER, "", 1).trim().to_string(),
                explanation.trim().to_string(),
            )
        }
        None => (content.replacen(VERSE_MARKER, "", 1).trim().to_string(), String::new()),
    };

    let explanation = if explanation.is_empty() {
        format!("This verse explores {fallback_subject}.")
    } else {
        explanation
    };

    GeneratedVerse { verse, explanation }
}

pub fn map_verse_error(e: ProviderError) -> GenError {
    match e {
        ProviderError::Unconfigured(g) => g,
        ProviderError::Status { status: 429, .. } => GenError::new(
            ErrorKind::RateLimit,
            "Too many requests. Please wait a moment and try again.",
        ),
        ProviderError::Status { status: 401, .. } => GenError::config(
            "API authentication failed. Please check your API key configuration.",
        ),
        ProviderError::Status { status: 403, .. } => GenError::config(
            "API access denied. Please check your OpenAI account status and billing.",
        ),
        ProviderError::Status { status: 400, .. } => {
            GenError::api("Invalid request. Please try a different prompt.")
        }
        ProviderError::Status { status, .. } if status >= 500 => GenError::api(
            "OpenAI service is temporarily unavailable. Please try again in a moment.",
        ),
        ProviderError::Timeout => {
            GenError::new(ErrorKind::Timeout, "Request timed out. Please try again.")
        }
        ProviderError::Connect(_) => {
            GenError::api("Network error. Please check your internet connection.")
        }
        ProviderError::Decode(_) => GenError::new(ErrorKind::InvalidResponse, GENERIC_VERSE_FAILURE),
        ProviderError::Status { .. } | ProviderError::Transport(_) => {
            GenError::api(GENERIC_VERSE_FAILURE)
        }
    }
}
