//! Hand-picked topics offered at the first wizard stage.

#[derive(Debug, Clone, Copy)]
pub struct CuratedTopic {
    pub topic: &'static str,
    pub rationale: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct CuratedCategory {
    pub label: &'static str,
    pub items: &'static [CuratedTopic],
}

const fn item(topic: &'static str, rationale: &'static str) -> CuratedTopic {
    CuratedTopic { topic, rationale }
}

pub const CATEGORIES: &[CuratedCategory] = &[
    CuratedCategory {
        label: "Neuroplasticity Sparks",
        items: &[
            item(
                "Hebbian sparks ignite creativity",
                "Dive into how repeated applause between neurons strengthens the circuits that fuel new ideas.",
            ),
            item(
                "Practice doubles synaptic dancing",
                "Look at how deliberate repetition lights the same pathways so they become the default route.",
            ),
            item(
                "Chunking info for adaptive recall",
                "Break long lessons into vivid chunks so working memory hands them to long-term networks with ease.",
            ),
        ],
    },
    CuratedCategory {
        label: "Mindfulness & Flow",
        items: &[
            item(
                "Mindful habits rewire synapses",
                "Pair breath, body, and focus to gently rewire attention networks without burning out learners.",
            ),
            item(
                "Flow states tune the default mode network",
                "Witness how deep engagement mutes the DMN so creative problem solving can rise instead of overthinking.",
            ),
            item(
                "Movement anchors adaptive memory",
                "Connect energy and recall by pacing ideas with rhythm, the body scaffolds the brain's plasticity.",
            ),
        ],
    },
    CuratedCategory {
        label: "Sensation & Chemistry",
        items: &[
            item(
                "Sensory memory sticks through rhythm",
                "Use beats, visuals, or scents to attach meaning to sensory neurons and strengthen recall pathways.",
            ),
            item(
                "Neurochemistry in learning leaps",
                "Map how dopamine rewards and acetylcholine sharpens attention every time you practice deeply.",
            ),
            item(
                "Sleep and reconsolidation for recall",
                "Explore how nocturnal replay and slow-wave sleep seal the synaptic patterns your day built.",
            ),
        ],
    },
    CuratedCategory {
        label: "Metaphysics + Identity",
        items: &[
            item(
                "Align identity with adaptive beliefs",
                "Study how rewriting self-narratives influences synaptic strength so your identity reflects your goals.",
            ),
            item(
                "Neuroscience of intention-setting rituals",
                "Merge symbolic rituals with neuroplastic training to anchor intentions inside the limbic system.",
            ),
            item(
                "Metaphysical cues for resilient focus",
                "Use archetypes and meaning-rich cues to activate powerful neural schemas that keep you aligned with truth.",
            ),
        ],
    },
];

/// Flat 1-based lookup used by the terminal picker.
pub fn nth(index: usize) -> Option<(&'static CuratedCategory, &'static CuratedTopic)> {
    CATEGORIES
        .iter()
        .flat_map(|c| c.items.iter().map(move |i| (c, i)))
        .nth(index.checked_sub(1)?)
}
