use async_trait::async_trait;

use super::{Completion, Provider, ProviderError, Task};
use crate::prompt::{EXPLANATION_MARKER, VERSE_MARKER};
use crate::wire::{Length, Vibe};

/// Offline provider for development without an API key.
pub struct MockProvider;

const UPBEAT: [&str; 12] = [
    "Neurons firing, connections growing strong!",
    "Synapses dancing all day long!",
    "Hebbian learning, what a sight!",
    "Practice makes your brain so bright!",
    "Neural pathways light the way,",
    "Building knowledge every day!",
    "Plasticity's the key you see,",
    "Your brain adapts so naturally!",
    "Dendrites branching, reaching far,",
    "You're a learning superstar!",
    "Myelin wraps around with care,",
    "Speeding signals everywhere!",
];

const CHILL: [&str; 12] = [
    "Softly now, your neurons flow...",
    "Learning gently, nice and slow...",
    "Synaptic spaces find their peace,",
    "As understanding starts to increase...",
    "Neural networks intertwine,",
    "Creating patterns, so sublime...",
    "Hebbian whispers in the mind,",
    "Leave no synapse left behind...",
    "Plasticity moves like a stream,",
    "Fulfilling every learning dream...",
    "Quiet growth within your brain,",
    "Knowledge falling like soft rain...",
];

const MYSTIC: [&str; 12] = [
    "Ancient pathways in your mind...",
    "Neural secrets you will find...",
    "Mystic synapses arise,",
    "Wisdom flowing, oh so wise...",
    "Cosmic connections form and bind,",
    "Neuroplasticity's grand design...",
    "Hebbian mysteries unfold,",
    "Stories that the neurons told...",
    "Ethereal dendrites reach through space,",
    "Learning at a mystic pace...",
    "Brain waves ripple, ebb and flow,",
    "Ancient knowledge starts to grow...",
];

pub fn mock_verse(length: Length, vibe: Vibe) -> String {
    let bank = match vibe {
        Vibe::Upbeat => &UPBEAT,
        Vibe::Chill => &CHILL,
        Vibe::Mystic => &MYSTIC,
    };
    bank[..length.line_count()].join("\n")
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, req: &Completion) -> Result<String, ProviderError> {
        Ok(match req.task {
            Task::Verse { length, vibe } => format!(
                "{VERSE_MARKER}\n{}\n\n{EXPLANATION_MARKER}\nThis verse walks through how repeated practice strengthens synapses, the heart of neuroplasticity.",
                mock_verse(length, vibe)
            ),
            Task::Topic => "Topic: Sleep spindles seal new skills\nRationale: Bursts of sleep spindles replay the day's practice so motor memories consolidate overnight.".to_string(),
        })
    }
}
