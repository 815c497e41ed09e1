use crate::wire::{Format, Length, VerseParams, Vibe};

pub mod catalog;

pub const VERSE_MARKER: &str = "=== VERSE ===";
pub const EXPLANATION_MARKER: &str = "=== EXPLANATION ===";
pub const TOPIC_MARKER: &str = "Topic:";
pub const RATIONALE_MARKER: &str = "Rationale:";

fn topic_scope() -> &'static str {
r#"TOPIC SCOPE:
Your expertise covers all areas of neuroscience and consciousness studies including:
- Neuroplasticity and brain adaptation
- Neural mechanisms and brain structures (neurons, synapses, neurotransmitters, brain regions)
- Learning, memory, and cognitive processes
- Consciousness and awareness
- Perception and sensory processing
- Emotions and the limbic system
- Sleep, dreams, and altered states
- Meditation and mindfulness effects on the brain
- Neurochemistry (dopamine, serotonin, oxytocin, etc.)
- Brain development and aging
- Neurogenesis and brain health
- Mind-body connection
- Reality construction and perception
- Cognitive biases and mental models
- Habit formation and behavior change
- Attention, focus, and flow states
- Brain wave states (alpha, beta, theta, delta, gamma)
- Quantum consciousness theories
- Psychoneuroimmunology
- Embodied cognition
- Mirror neurons and empathy
- Default mode network
- Any other neuroscience or consciousness-related topics"#
}

fn content_requirements() -> &'static str {
r#"CONTENT REQUIREMENTS:
- Provide scientifically accurate information
- Include specific neuroscience terminology where appropriate
- Make complex concepts accessible and memorable
- Connect concepts to lived experience or practical applications
- Inspire curiosity and wonder about the brain and consciousness"#
}

struct VibeGuide {
    tone: &'static str,
    style: &'static str,
    example: &'static str,
}

fn vibe_guide(vibe: Vibe) -> VibeGuide {
    match vibe {
        Vibe::Upbeat => VibeGuide {
            tone: "energetic, enthusiastic, and uplifting",
            style: "Use exclamation points, active verbs, and bouncy rhythm. Create an exciting, motivational feel.",
            example: "like 'Neurons firing, connections growing strong! Synapses dancing all day long!'",
        },
        Vibe::Chill => VibeGuide {
            tone: "calm, peaceful, and flowing",
            style: "Use ellipses, gentle imagery, and smooth transitions. Create a meditative, relaxing atmosphere.",
            example: "like 'Softly now, your neurons flow... Learning gently, nice and slow...'",
        },
        Vibe::Mystic => VibeGuide {
            tone: "mystical, ethereal, and profound",
            style: "Use cosmic imagery, ancient wisdom themes, and mysterious language. Create a sense of wonder and deep knowledge.",
            example: "like 'Ancient pathways in your mind... Neural secrets you will find...'",
        },
    }
}

/// (structure, requirements)
fn format_guide(format: Format) -> (&'static str, &'static str) {
    match format {
        Format::Song => (
            "Create a song-like structure with consistent rhyme scheme and musical rhythm",
            "Use end rhymes, repetitive patterns, and make it feel singable",
        ),
        Format::Poem => (
            "Create a poetic structure with imagery and metaphor",
            "Focus on vivid descriptions, emotional resonance, and artistic expression",
        ),
    }
}

fn depth_hint(length: Length) -> &'static str {
    match length {
        Length::Short => "- Keep it concise and punchy (one core concept)",
        Length::Medium => "- Develop the concept with 1-2 key ideas",
        Length::Long => "- Explore the topic in depth with multiple connected ideas",
    }
}

/// Full instruction for one verse. The model is asked to answer in exactly
/// two labeled sections so `gateway::parse_verse_explanation` can split them.
pub fn build_verse_prompt(params: &VerseParams) -> String {
    let guide = vibe_guide(params.vibe);
    let (structure, requirements) = format_guide(params.format);
    let subject = params
        .approved_topic
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(&params.prompt);

    format!(r#"You are an expert neuroscientist, consciousness researcher, and lyricist who creates memorable educational content about the brain, mind, and reality transformation.

{topic_scope}

TASK:
Create educational {format} lyrics that teach about: "{prompt}"

{content_requirements}

LENGTH:
- Create exactly {lines} lines
{depth}

VIBE: {vibe_upper}
- Tone: {tone}
- Style: {style}
- Example reference: {example}

FORMAT: {format_upper}
- {structure}
- {requirements}

EXPLANATION REQUIREMENT:
- Reference the approved topic in this explanation: '{subject}'
- Provide a brief (2-3 sentence) summary that explains what the verse teaches and how it connects to that topic.
- Keep the explanation grounded, accessible, and consistent with the selected vibe.
- Format the response using exactly two labeled sections (verse first, explanation second):
  {verse_marker}
  [verse lines with newline separators; use blank lines for stanza breaks]

  {explanation_marker}
  [2-3 sentence summary]
  - Tie the explanation back to the approved topic and describe what learners should take away about neuroplasticity.
  - Keep the tone consistent with the selected vibe and mention at least one neuroscience concept that the verse covered.

OUTPUT FORMAT:
- Return ONLY the labeled sections above (verse section first, explanation section second).
- Use newline characters (\n) for every line; use double newlines (\n\n) to denote stanza spacing within the verse.
- Do not include numbering, bullet points, quotation marks, or metadata outside the labeled sections.

Now create the {format} about "{prompt}" with a {vibe} vibe:"#,
        topic_scope = topic_scope(),
        content_requirements = content_requirements(),
        format = params.format,
        format_upper = params.format.as_str().to_uppercase(),
        prompt = params.prompt,
        lines = params.length.line_count(),
        depth = depth_hint(params.length),
        vibe = params.vibe,
        vibe_upper = params.vibe.as_str().to_uppercase(),
        tone = guide.tone,
        style = guide.style,
        example = guide.example,
        structure = structure,
        requirements = requirements,
        subject = subject,
        verse_marker = VERSE_MARKER,
        explanation_marker = EXPLANATION_MARKER,
    )
}

pub fn build_topic_prompt(seed: Option<&str>) -> String {
    let seed_instruction = match seed.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => format!("Use this focus as inspiration: \"{s}\"."),
        None => "Feel free to suggest any neuroplasticity or neuroscience direction.".to_string(),
    };

    format!(
"You are a playful neuroscience mentor guiding a curious learner.
{seed_instruction}
Create one conversational topic idea suitable for a short song or poem about the brain, learning, or neuroplasticity.
Frame the reply as two labelled lines:
{TOPIC_MARKER} <single, focused topic>
{RATIONALE_MARKER} <1-2 sentence explanation of why this topic is interesting and what it teaches>
Keep the tone friendly, grounded, and connected to real neuroscience terminology."
    )
}
