//! Three-stage progression: pick a topic, lock it in, then generate and
//! review the verse. Every forward step needs an explicit user action;
//! stepping back clears whatever the later stages produced.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::ValidationError;
use crate::favorites::{FavoritesStore, StoreError};
use crate::validate;
use crate::wire::{Format, GeneratedVerse, Length, VerseParams, Vibe};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Topic,
    Approval,
    Verse,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Topic, Stage::Approval, Stage::Verse];

    pub fn index(self) -> usize {
        match self {
            Stage::Topic => 0,
            Stage::Approval => 1,
            Stage::Verse => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Topic => "Topic Idea",
            Stage::Approval => "Topic Approved",
            Stage::Verse => "Verse + Explanation",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Stage::Topic => "Craft the direction of your inquiry",
            Stage::Approval => "Confirm the idea so we can generate the verse",
            Stage::Verse => "Review the lyrical response and explanation",
        }
    }

    fn default_message(self) -> &'static str {
        match self {
            Stage::Topic => "Refine your topic idea before locking it in.",
            Stage::Approval => "Topic locked in. Generate once you're ready for the verse.",
            Stage::Verse => "Verse approved! The explanation is captured for review.",
        }
    }
}

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Please enter a topic before confirming.")]
    EmptyTopic,
    #[error("{0}")]
    InvalidTopic(ValidationError),
    #[error("The topic is locked in. Go back to change it.")]
    TopicLocked,
    #[error("Please confirm your topic idea before generating a verse.")]
    TopicNotConfirmed,
    #[error("Generate a verse first.")]
    NoVerse,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct WizardState {
    stage: Stage,
    prompt: String,
    length: Length,
    vibe: Vibe,
    format: Format,
    verse_result: Option<GeneratedVerse>,
    approved: bool,
    hearted: bool,
    topic_source: String,
    topic_rationale: Option<String>,
    error: Option<String>,
    status_message: String,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            stage: Stage::Topic,
            prompt: String::new(),
            length: Length::default(),
            vibe: Vibe::default(),
            format: Format::default(),
            verse_result: None,
            approved: false,
            hearted: false,
            topic_source: String::new(),
            topic_rationale: None,
            error: None,
            status_message: Stage::Topic.default_message().to_string(),
        }
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn length(&self) -> Length {
        self.length
    }

    pub fn vibe(&self) -> Vibe {
        self.vibe
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn verse_result(&self) -> Option<&GeneratedVerse> {
        self.verse_result.as_ref()
    }

    pub fn is_approved(&self) -> bool {
        self.approved
    }

    pub fn is_hearted(&self) -> bool {
        self.hearted
    }

    pub fn topic_source(&self) -> &str {
        &self.topic_source
    }

    pub fn topic_rationale(&self) -> Option<&str> {
        self.topic_rationale.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn set_length(&mut self, length: Length) {
        self.length = length;
    }

    pub fn set_vibe(&mut self, vibe: Vibe) {
        self.vibe = vibe;
    }

    pub fn set_format(&mut self, format: Format) {
        self.format = format;
    }

    fn set_stage(&mut self, stage: Stage, message: Option<String>) {
        self.stage = stage;
        self.status_message = message.unwrap_or_else(|| stage.default_message().to_string());
    }

    fn source_or_default(&self) -> &str {
        if self.topic_source.is_empty() {
            "your idea"
        } else {
            &self.topic_source
        }
    }

    fn clear_downstream(&mut self) {
        self.verse_result = None;
        self.approved = false;
        self.hearted = false;
        self.error = None;
    }

    fn reset_topic_state(&mut self, message: Option<String>) {
        self.set_stage(Stage::Topic, message);
        self.clear_downstream();
        self.topic_rationale = None;
        self.topic_source.clear();
    }

    fn fail<T>(&mut self, err: WizardError) -> Result<T, WizardError> {
        self.error = Some(err.to_string());
        Err(err)
    }

    /// Free-text topic entry; only allowed before the topic is confirmed.
    pub fn set_prompt(&mut self, text: &str) -> Result<(), WizardError> {
        if self.stage != Stage::Topic {
            return self.fail(WizardError::TopicLocked);
        }
        self.prompt = text.to_string();
        if self.topic_source.is_empty() {
            self.topic_source = "Custom idea".to_string();
        }
        self.error = None;
        Ok(())
    }

    /// Choosing a curated or suggested topic starts the topic stage over.
    pub fn pick_suggestion(&mut self, topic: &str, rationale: Option<&str>, source: Option<&str>) {
        self.reset_topic_state(None);
        self.prompt = topic.to_string();
        self.topic_source = source.unwrap_or("Curated topic").to_string();
        self.topic_rationale = Some(
            rationale
                .filter(|r| !r.trim().is_empty())
                .unwrap_or("Curated idea ready for approval.")
                .to_string(),
        );
    }

    /// topic → approval
    pub fn confirm_topic(&mut self) -> Result<(), WizardError> {
        if self.stage != Stage::Topic {
            return self.fail(WizardError::TopicLocked);
        }
        match validate::prompt_text(&self.prompt) {
            Ok(_) => {}
            Err(ValidationError::MissingPrompt) => return self.fail(WizardError::EmptyTopic),
            Err(e) => return self.fail(WizardError::InvalidTopic(e)),
        }
        self.error = None;
        let message = format!(
            "Topic idea locked in ({}). Generate the verse when you're ready.",
            self.source_or_default()
        );
        self.set_stage(Stage::Approval, Some(message));
        Ok(())
    }

    /// approval|verse → topic; drops the verse, approval and heart.
    pub fn back_to_topic(&mut self) {
        self.clear_downstream();
        self.set_stage(Stage::Topic, None);
    }

    /// Parameters for the next generation. Valid from approval (first run)
    /// and from verse (regenerate); clears the previous result.
    pub fn generation_request(&mut self) -> Result<VerseParams, WizardError> {
        if self.stage == Stage::Topic {
            return self.fail(WizardError::TopicNotConfirmed);
        }
        let prompt = match validate::prompt_text(&self.prompt) {
            Ok(p) => p,
            Err(ValidationError::MissingPrompt) => return self.fail(WizardError::EmptyTopic),
            Err(e) => return self.fail(WizardError::InvalidTopic(e)),
        };
        self.error = None;
        self.verse_result = None;
        self.approved = false;
        Ok(VerseParams {
            approved_topic: Some(prompt.clone()),
            prompt,
            length: self.length,
            vibe: self.vibe,
            format: self.format,
        })
    }

    pub fn accept_verse(&mut self, result: GeneratedVerse, hearted: bool) {
        self.verse_result = Some(result);
        self.hearted = hearted;
        self.error = None;
        self.set_stage(
            Stage::Verse,
            Some("Verse ready! Approve it when the melody feels right.".to_string()),
        );
    }

    /// A failed generation leaves no verse to show, so the verse stage falls
    /// back to approval.
    pub fn fail_generation(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        if self.stage == Stage::Verse && self.verse_result.is_none() {
            self.hearted = false;
            self.set_stage(Stage::Approval, None);
        }
    }

    pub fn approve(&mut self) -> Result<(), WizardError> {
        if self.verse_result.is_none() {
            return self.fail(WizardError::NoVerse);
        }
        self.approved = true;
        let message = format!("Verse approved! {} is locked for reference.", self.source_or_default());
        self.set_stage(Stage::Verse, Some(message));
        Ok(())
    }

    /// Saves or un-saves the current verse. Returns the new heart state.
    pub fn toggle_heart(&mut self, store: &FavoritesStore) -> Result<bool, WizardError> {
        let Some(result) = &self.verse_result else {
            return self.fail(WizardError::NoVerse);
        };
        if self.hearted {
            if let Some(existing) = store.find_by_verse(&result.verse)? {
                store.remove(&existing.id)?;
            }
            self.hearted = false;
        } else {
            store.add(&result.verse, &self.prompt, self.vibe, self.format, self.length)?;
            self.hearted = true;
        }
        Ok(self.hearted)
    }

    /// verse → topic with a blank slate.
    pub fn restart(&mut self) {
        self.prompt.clear();
        self.reset_topic_state(Some("Ready when you are, pick a fresh topic.".to_string()));
        self.topic_source = "Custom idea".to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse() -> GeneratedVerse {
        GeneratedVerse {
            verse: "Neurons hum\nSynapses drum".into(),
            explanation: "About synapses.".into(),
        }
    }

    fn at_verse_stage() -> WizardState {
        let mut w = WizardState::new();
        w.pick_suggestion("Sleep and reconsolidation for recall", None, Some("Sensation & Chemistry"));
        w.confirm_topic().unwrap();
        w.generation_request().unwrap();
        w.accept_verse(verse(), false);
        w
    }

    #[test]
    fn starts_at_topic_with_defaults() {
        let w = WizardState::new();
        assert_eq!(w.stage(), Stage::Topic);
        assert_eq!(w.length(), Length::Medium);
        assert_eq!(w.vibe(), Vibe::Upbeat);
        assert_eq!(w.format(), Format::Song);
        assert_eq!(w.status_message(), "Refine your topic idea before locking it in.");
    }

    #[test]
    fn confirm_rejects_blank_topic() {
        let mut w = WizardState::new();
        w.set_prompt("   ").unwrap();
        assert!(matches!(w.confirm_topic(), Err(WizardError::EmptyTopic)));
        assert_eq!(w.stage(), Stage::Topic);
        assert_eq!(w.error(), Some("Please enter a topic before confirming."));
    }

    #[test]
    fn confirm_rejects_overlong_topic() {
        let mut w = WizardState::new();
        w.set_prompt(&"x".repeat(1001)).unwrap();
        assert!(matches!(w.confirm_topic(), Err(WizardError::InvalidTopic(_))));
        assert_eq!(w.stage(), Stage::Topic);
    }

    #[test]
    fn confirm_advances_and_names_source() {
        let mut w = WizardState::new();
        w.pick_suggestion("Mindful habits rewire synapses", Some("Breath and focus."), Some("Mindfulness & Flow"));
        w.confirm_topic().unwrap();
        assert_eq!(w.stage(), Stage::Approval);
        assert!(w.status_message().contains("(Mindfulness & Flow)"));
        assert!(matches!(w.set_prompt("other"), Err(WizardError::TopicLocked)));
    }

    #[test]
    fn generation_needs_confirmed_topic() {
        let mut w = WizardState::new();
        w.set_prompt("Dopamine").unwrap();
        assert!(matches!(w.generation_request(), Err(WizardError::TopicNotConfirmed)));
        assert_eq!(
            w.error(),
            Some("Please confirm your topic idea before generating a verse.")
        );
    }

    #[test]
    fn generation_request_carries_options_and_topic() {
        let mut w = WizardState::new();
        w.set_prompt("  Dopamine loops  ").unwrap();
        w.confirm_topic().unwrap();
        w.set_vibe(Vibe::Mystic);
        w.set_length(Length::Long);
        w.set_format(Format::Poem);
        let p = w.generation_request().unwrap();
        assert_eq!(p.prompt, "Dopamine loops");
        assert_eq!(p.approved_topic.as_deref(), Some("Dopamine loops"));
        assert_eq!((p.length, p.vibe, p.format), (Length::Long, Vibe::Mystic, Format::Poem));
    }

    #[test]
    fn accept_moves_to_verse_and_approve_marks_it() {
        let mut w = at_verse_stage();
        assert_eq!(w.stage(), Stage::Verse);
        assert!(!w.is_approved());
        w.approve().unwrap();
        assert!(w.is_approved());
        assert!(w.status_message().contains("Sensation & Chemistry is locked"));
    }

    #[test]
    fn approve_without_verse_fails() {
        let mut w = WizardState::new();
        assert!(matches!(w.approve(), Err(WizardError::NoVerse)));
    }

    #[test]
    fn back_to_topic_clears_downstream() {
        let mut w = at_verse_stage();
        w.approve().unwrap();
        w.back_to_topic();
        assert_eq!(w.stage(), Stage::Topic);
        assert!(w.verse_result().is_none());
        assert!(!w.is_approved());
        assert!(!w.is_hearted());
        assert_eq!(w.prompt(), "Sleep and reconsolidation for recall");
    }

    #[test]
    fn restart_clears_everything() {
        let mut w = at_verse_stage();
        w.restart();
        assert_eq!(w.stage(), Stage::Topic);
        assert!(w.prompt().is_empty());
        assert!(w.verse_result().is_none());
        assert!(w.topic_rationale().is_none());
        assert_eq!(w.topic_source(), "Custom idea");
        assert_eq!(w.status_message(), "Ready when you are, pick a fresh topic.");
    }

    #[test]
    fn pick_suggestion_resets_stage_and_sets_rationale() {
        let mut w = at_verse_stage();
        w.pick_suggestion("Flow states tune the default mode network", None, None);
        assert_eq!(w.stage(), Stage::Topic);
        assert!(w.verse_result().is_none());
        assert_eq!(w.topic_source(), "Curated topic");
        assert_eq!(w.topic_rationale(), Some("Curated idea ready for approval."));
    }

    #[test]
    fn failed_regeneration_falls_back_to_approval() {
        let mut w = at_verse_stage();
        w.generation_request().unwrap();
        w.fail_generation("Request timed out. Please try again.");
        assert_eq!(w.stage(), Stage::Approval);
        assert_eq!(w.error(), Some("Request timed out. Please try again."));
    }

    #[test]
    fn heart_saves_and_unheart_removes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FavoritesStore::new(dir.path().join("favs.json"));
        let mut w = at_verse_stage();

        assert!(w.toggle_heart(&store).unwrap());
        let saved = store.list().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].verse, verse().verse);
        assert_eq!(saved[0].prompt, "Sleep and reconsolidation for recall");

        assert!(!w.toggle_heart(&store).unwrap());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn stage_order_is_linear() {
        let idx: Vec<usize> = Stage::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }
}
