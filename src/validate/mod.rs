use serde_json::Value;

use crate::errors::ValidationError;
use crate::wire::{Format, Length, VerseParams, VerseRequestBody, Vibe};

pub const MAX_PROMPT_CHARS: usize = 1000;

/// Trim `raw` and enforce 1..=MAX_PROMPT_CHARS characters.
pub fn prompt_text(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingPrompt);
    }
    if trimmed.chars().count() > MAX_PROMPT_CHARS {
        return Err(ValidationError::PromptTooLong { max: MAX_PROMPT_CHARS });
    }
    Ok(trimmed.to_string())
}

fn as_str(v: &Option<Value>) -> Option<&str> {
    match v {
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

/// Checks run in field order (prompt, length, vibe, format) and stop at the
/// first failure.
pub fn verse_params(body: &VerseRequestBody) -> Result<VerseParams, ValidationError> {
    let prompt = prompt_text(as_str(&body.prompt).ok_or(ValidationError::MissingPrompt)?)?;
    let length = as_str(&body.length)
        .and_then(Length::parse)
        .ok_or(ValidationError::InvalidLength)?;
    let vibe = as_str(&body.vibe)
        .and_then(Vibe::parse)
        .ok_or(ValidationError::InvalidVibe)?;
    let format = as_str(&body.format)
        .and_then(Format::parse)
        .ok_or(ValidationError::InvalidFormat)?;

    let approved_topic = body
        .approved_topic_text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| prompt.clone());

    Ok(VerseParams {
        prompt,
        length,
        vibe,
        format,
        approved_topic: Some(approved_topic),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(v: Value) -> VerseRequestBody {
        serde_json::from_value(v).unwrap()
    }

    fn valid() -> Value {
        json!({"prompt": "  Hebbian learning  ", "length": "short", "vibe": "chill", "format": "poem"})
    }

    #[test]
    fn accepts_every_documented_combination() {
        for l in ["short", "medium", "long"] {
            for v in ["upbeat", "chill", "mystic"] {
                for f in ["song", "poem"] {
                    let b = body(json!({"prompt": "x", "length": l, "vibe": v, "format": f}));
                    let p = verse_params(&b).unwrap();
                    assert_eq!(p.length.as_str(), l);
                    assert_eq!(p.vibe.as_str(), v);
                    assert_eq!(p.format.as_str(), f);
                }
            }
        }
    }

    #[test]
    fn rejects_anything_outside_the_enums() {
        let bad = [json!("SHORT"), json!("tiny"), json!(""), json!(4), json!(null)];
        for val in &bad {
            let mut b = valid();
            b["length"] = val.clone();
            assert_eq!(verse_params(&body(b)).unwrap_err(), ValidationError::InvalidLength);

            let mut b = valid();
            b["vibe"] = val.clone();
            assert_eq!(verse_params(&body(b)).unwrap_err(), ValidationError::InvalidVibe);

            let mut b = valid();
            b["format"] = val.clone();
            assert_eq!(verse_params(&body(b)).unwrap_err(), ValidationError::InvalidFormat);
        }
    }

    #[test]
    fn prompt_must_be_a_non_blank_string() {
        for p in [json!("   "), json!(12), json!(null)] {
            let mut b = valid();
            b["prompt"] = p;
            assert_eq!(verse_params(&body(b)).unwrap_err(), ValidationError::MissingPrompt);
        }
        let b = body(json!({"length": "short", "vibe": "chill", "format": "poem"}));
        assert_eq!(verse_params(&b).unwrap_err(), ValidationError::MissingPrompt);
    }

    #[test]
    fn prompt_limit_applies_after_trimming() {
        let exact = "a".repeat(MAX_PROMPT_CHARS);
        assert_eq!(prompt_text(&format!("   {exact}   ")).unwrap(), exact);

        let over = "a".repeat(MAX_PROMPT_CHARS + 1);
        assert_eq!(
            prompt_text(&over).unwrap_err(),
            ValidationError::PromptTooLong { max: MAX_PROMPT_CHARS }
        );
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        let s = "é".repeat(MAX_PROMPT_CHARS);
        assert!(prompt_text(&s).is_ok());
    }

    #[test]
    fn approved_topic_falls_back_to_trimmed_prompt() {
        let p = verse_params(&body(valid())).unwrap();
        assert_eq!(p.prompt, "Hebbian learning");
        assert_eq!(p.approved_topic.as_deref(), Some("Hebbian learning"));

        let mut b = valid();
        b["approvedTopic"] = json!({"text": "  Synaptic pruning "});
        let p = verse_params(&body(b)).unwrap();
        assert_eq!(p.approved_topic.as_deref(), Some("Synaptic pruning"));

        let mut b = valid();
        b["approvedTopic"] = json!("   ");
        let p = verse_params(&body(b)).unwrap();
        assert_eq!(p.approved_topic.as_deref(), Some("Hebbian learning"));

        let mut b = valid();
        b["approvedTopic"] = json!(true);
        let p = verse_params(&body(b)).unwrap();
        assert_eq!(p.approved_topic.as_deref(), Some("Hebbian learning"));
    }

    #[test]
    fn malformed_override_does_not_hide_prompt_error() {
        let mut b = valid();
        b["prompt"] = json!("  ");
        b["approvedTopic"] = json!(42);
        assert_eq!(verse_params(&body(b)).unwrap_err(), ValidationError::MissingPrompt);
    }
}
