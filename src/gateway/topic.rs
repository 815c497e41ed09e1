use tracing::info;

use super::Gateway;
use crate::errors::{ErrorKind, GenError};
use crate::prompt::{self, RATIONALE_MARKER, TOPIC_MARKER};
use crate::provider::{Completion, ProviderError, Task};
use crate::wire::TopicSuggestion;

const TOPIC_MAX_TOKENS: u32 = 120;
const TOPIC_TEMPERATURE: f32 = 0.9;
const GENERIC_TOPIC_FAILURE: &str = "Failed to generate a suggestion. Please try again.";

impl Gateway {
    pub async fn suggest_topic(&self, seed: Option<&str>) -> Result<TopicSuggestion, GenError> {
        let completion = Completion {
            prompt: prompt::build_topic_prompt(seed),
            max_tokens: TOPIC_MAX_TOKENS,
            temperature: TOPIC_TEMPERATURE,
            task: Task::Topic,
        };

        let raw = self
            .exchange("topic", &completion)
            .await
            .map_err(map_topic_error)?;

        if raw.trim().is_empty() {
            return Err(GenError::api("Unable to craft a topic right now. Please try again."));
        }

        let suggestion = parse_topic_suggestion(&raw);
        if suggestion.topic.is_empty() {
            return Err(GenError::api("Topic suggestion was malformed."));
        }
        info!(topic = %suggestion.topic, "topic suggested");
        Ok(suggestion)
    }
}

fn strip_prefix_ci<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let head = line.get(..marker.len())?;
    head.eq_ignore_ascii_case(marker).then(|| line[marker.len()..].trim())
}

/// Reads `Topic:` / `Rationale:` lines, case-insensitively. When a label is
/// missing the first (topic) or second (rationale) non-blank line is used.
pub fn parse_topic_suggestion(content: &str) -> TopicSuggestion {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut topic = String::new();
    let mut rationale = String::new();

    for line in &lines {
        if topic.is_empty() {
            if let Some(rest) = strip_prefix_ci(line, TOPIC_MARKER) {
                topic = rest.to_string();
                continue;
            }
        }
        if rationale.is_empty() {
            if let Some(rest) = strip_prefix_ci(line, RATIONALE_MARKER) {
                rationale = rest.to_string();
            }
        }
    }

    if topic.is_empty() {
        if let Some(first) = lines.first() {
            topic = first.replacen(TOPIC_MARKER, "", 1).trim().to_string();
        }
    }
    if rationale.is_empty() {
        if let Some(second) = lines.get(1) {
            rationale = second.replacen(RATIONALE_MARKER, "", 1).trim().to_string();
        }
    }

    TopicSuggestion { topic, rationale }
}

pub fn map_topic_error(e: ProviderError) -> GenError {
    match e {
        ProviderError::Unconfigured(g) => g,
        ProviderError::Status { status: 429, .. } => GenError::new(
            ErrorKind::RateLimit,
            "Too many requests. Please wait a moment and try again.",
        ),
        ProviderError::Status { status: 401 | 403, .. } => {
            GenError::config("API access denied. Please check your OpenAI configuration.")
        }
        ProviderError::Status { status: 400, .. } => GenError::api("Invalid request. Please try again."),
        ProviderError::Timeout => {
            GenError::new(ErrorKind::Timeout, "Request timed out. Please try again.")
        }
        ProviderError::Connect(_) => GenError::api("Network error. Please check your connection."),
        ProviderError::Status { .. } | ProviderError::Transport(_) | ProviderError::Decode(_) => {
            GenError::api(GENERIC_TOPIC_FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::provider::mock::MockProvider;
    use crate::provider::Provider;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Canned(&'static str);

    #[async_trait]
    impl Provider for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, _req: &Completion) -> Result<String, ProviderError> {
            Ok(self.0.to_string())
        }
    }

    fn gateway(content: &'static str) -> Gateway {
        Gateway::new(Arc::new(Canned(content)), &Config::default())
    }

    #[test]
    fn reads_labeled_lines_case_insensitively() {
        let s = parse_topic_suggestion(
            "Here you go!\nTOPIC: Mirror neurons and empathy\nrationale: They fire when we watch others act.",
        );
        assert_eq!(s.topic, "Mirror neurons and empathy");
        assert_eq!(s.rationale, "They fire when we watch others act.");
    }

    #[test]
    fn first_label_wins() {
        let s = parse_topic_suggestion("Topic: A\nTopic: B\nRationale: R1\nRationale: R2");
        assert_eq!(s.topic, "A");
        assert_eq!(s.rationale, "R1");
    }

    #[test]
    fn unlabeled_lines_fall_back_by_position() {
        let s = parse_topic_suggestion("\n  Default mode network  \n\n  It hums when we rest.\n");
        assert_eq!(s.topic, "Default mode network");
        assert_eq!(s.rationale, "It hums when we rest.");
    }

    #[test]
    fn single_unlabeled_line_has_no_rationale() {
        let s = parse_topic_suggestion("Neurogenesis after exercise");
        assert_eq!(s.topic, "Neurogenesis after exercise");
        assert!(s.rationale.is_empty());
    }

    #[test]
    fn errors_never_use_invalid_response() {
        let all = [
            ProviderError::Status { status: 429, body: String::new() },
            ProviderError::Status { status: 401, body: String::new() },
            ProviderError::Status { status: 403, body: String::new() },
            ProviderError::Status { status: 400, body: String::new() },
            ProviderError::Status { status: 500, body: String::new() },
            ProviderError::Timeout,
            ProviderError::Connect("dns".into()),
            ProviderError::Decode("eof".into()),
        ];
        let kinds: Vec<ErrorKind> = all.into_iter().map(|e| map_topic_error(e).kind).collect();
        assert!(!kinds.contains(&ErrorKind::InvalidResponse));
        assert_eq!(kinds[0], ErrorKind::RateLimit);
        assert_eq!(kinds[1], ErrorKind::Config);
        assert_eq!(kinds[2], ErrorKind::Config);
        assert_eq!(kinds[5], ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn mock_suggestion_parses() {
        let gw = Gateway::new(Arc::new(MockProvider), &Config::default());
        let s = gw.suggest_topic(Some("sleep")).await.unwrap();
        assert_eq!(s.topic, "Sleep spindles seal new skills");
        assert!(s.rationale.starts_with("Bursts of sleep spindles"));
    }

    #[tokio::test]
    async fn blank_content_is_api_error() {
        for content in ["", "  \n\t "] {
            let err = gateway(content).suggest_topic(None).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::ApiError);
            assert_eq!(err.message, "Unable to craft a topic right now. Please try again.");
        }
    }

    #[tokio::test]
    async fn empty_topic_after_parsing_is_malformed() {
        for content in ["Topic:", "Topic:   \nRationale: something"] {
            let err = gateway(content).suggest_topic(Some("memory")).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::ApiError);
            assert_eq!(err.message, "Topic suggestion was malformed.");
        }
    }
}
