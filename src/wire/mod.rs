use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// ========================================
/// Verse parameters
/// ========================================

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Short,
    #[default]
    Medium,
    Long,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vibe {
    #[default]
    Upbeat,
    Chill,
    Mystic,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Song,
    Poem,
}

impl Length {
    pub const ALL: [Length; 3] = [Length::Short, Length::Medium, Length::Long];

    pub fn as_str(self) -> &'static str {
        match self {
            Length::Short => "short",
            Length::Medium => "medium",
            Length::Long => "long",
        }
    }

    pub fn line_count(self) -> usize {
        match self {
            Length::Short => 4,
            Length::Medium => 8,
            Length::Long => 12,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s)
    }
}

impl Vibe {
    pub const ALL: [Vibe; 3] = [Vibe::Upbeat, Vibe::Chill, Vibe::Mystic];

    pub fn as_str(self) -> &'static str {
        match self {
            Vibe::Upbeat => "upbeat",
            Vibe::Chill => "chill",
            Vibe::Mystic => "mystic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

impl Format {
    pub const ALL: [Format; 2] = [Format::Song, Format::Poem];

    pub fn as_str(self) -> &'static str {
        match self {
            Format::Song => "song",
            Format::Poem => "poem",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Vibe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated input for one verse generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseParams {
    /// Trimmed topic text, 1..=1000 chars.
    pub prompt: String,
    pub length: Length,
    pub vibe: Vibe,
    pub format: Format,
    /// Topic the explanation should refer back to. Falls back to `prompt`.
    pub approved_topic: Option<String>,
}

impl VerseParams {
    pub fn subject(&self) -> &str {
        self.approved_topic.as_deref().unwrap_or(&self.prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedVerse {
    pub verse: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSuggestion {
    pub topic: String,
    pub rationale: String,
}

/// ========================================
/// HTTP bodies
/// ========================================

/// Raw `/api/llm` body. Fields stay loosely typed so validation can report
/// which one is wrong instead of failing the whole decode.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseRequestBody {
    #[serde(default)]
    pub prompt: Option<Value>,
    #[serde(default)]
    pub length: Option<Value>,
    #[serde(default)]
    pub vibe: Option<Value>,
    #[serde(default)]
    pub format: Option<Value>,
    #[serde(default)]
    pub approved_topic: Option<Value>,
}

impl VerseRequestBody {
    /// `approvedTopic` is either a bare string or the web client's
    /// `{text, approvedAt, isUserProvided}` object. Any other shape is ignored.
    pub fn approved_topic_text(&self) -> Option<&str> {
        match self.approved_topic.as_ref()? {
            Value::String(s) => Some(s),
            Value::Object(obj) => obj.get("text").and_then(Value::as_str),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerseMetadata {
    pub vibe: Vibe,
    pub format: Format,
    pub length: Length,
    pub approved_topic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerseResponse {
    pub verse: String,
    pub explanation: String,
    pub metadata: VerseMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopicRequestBody {
    #[serde(default)]
    pub seed: Option<Value>,
}

impl TopicRequestBody {
    /// Non-string seeds are ignored.
    pub fn seed(&self) -> Option<String> {
        match &self.seed {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFavoriteBody {
    pub verse: String,
    pub prompt: String,
    #[serde(default)]
    pub vibe: Vibe,
    #[serde(default)]
    pub format: Format,
    #[serde(default)]
    pub length: Length,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}
