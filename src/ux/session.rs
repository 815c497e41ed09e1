//! Interactive terminal wizard driving a `WizardState`.

use anyhow::Result;
use colored::Colorize;
use tracing::debug;

use super::{ask, show_curated_topics, show_error, show_favorites, show_options, show_progress,
            show_suggestion, show_topic_panel, show_verse, with_spinner};
use crate::favorites::FavoritesStore;
use crate::gateway::Gateway;
use crate::prompt::catalog;
use crate::wire::{Format, Length, Vibe};
use crate::wizard::{Stage, WizardState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Pick(usize),
    Suggest(Option<String>),
    Custom(String),
    Confirm,
    Back,
    SetLength(Length),
    SetVibe(Vibe),
    SetFormat(Format),
    Generate,
    Approve,
    Heart,
    Restart,
    Favorites,
    Help,
    Quit,
    Unknown(String),
}

fn option_action(cmd: &str, arg: &str) -> Option<Action> {
    match cmd {
        "length" => Length::parse(arg).map(Action::SetLength),
        "vibe" => Vibe::parse(arg).map(Action::SetVibe),
        "format" => Format::parse(arg).map(Action::SetFormat),
        _ => None,
    }
}

/// Maps one input line to an action for the current stage.
pub fn parse_action(stage: Stage, input: &str) -> Action {
    let input = input.trim();
    let (cmd, arg) = match input.split_once(char::is_whitespace) {
        Some((c, a)) => (c, a.trim()),
        None => (input, ""),
    };
    let lower = cmd.to_lowercase();

    // Bare words only; "quit smoking" in the topic stage is a topic.
    if arg.is_empty() {
        match lower.as_str() {
            "q" | "quit" | "exit" => return Action::Quit,
            "fav" | "favorites" => return Action::Favorites,
            "?" | "help" => return Action::Help,
            _ => {}
        }
    }

    match stage {
        Stage::Topic => match lower.as_str() {
            "" => Action::Unknown(String::new()),
            "c" | "confirm" if arg.is_empty() => Action::Confirm,
            "s" | "suggest" => Action::Suggest((!arg.is_empty()).then(|| arg.to_string())),
            _ => match input.parse::<usize>() {
                Ok(n) => Action::Pick(n),
                Err(_) => Action::Custom(input.to_string()),
            },
        },
        Stage::Approval | Stage::Verse => match lower.as_str() {
            "b" | "back" => Action::Back,
            "g" | "generate" | "r" | "regenerate" => Action::Generate,
            "a" | "approve" if stage == Stage::Verse => Action::Approve,
            "h" | "heart" if stage == Stage::Verse => Action::Heart,
            "n" | "new" if stage == Stage::Verse => Action::Restart,
            "length" | "vibe" | "format" => {
                option_action(&lower, &arg.to_lowercase()).unwrap_or_else(|| Action::Unknown(input.to_string()))
            }
            _ => Action::Unknown(input.to_string()),
        },
    }
}

fn help(stage: Stage) -> &'static str {
    match stage {
        Stage::Topic => "number = curated topic · text = your own topic · s [seed] = ask the model · c = confirm · fav · q",
        Stage::Approval => "vibe upbeat|chill|mystic · format song|poem · length short|medium|long · g = generate · b = back · fav · q",
        Stage::Verse => "a = approve · h = heart · r = regenerate · vibe/format/length … · n = new topic · b = back · fav · q",
    }
}

fn render(state: &WizardState) {
    show_progress(state);
    match state.stage() {
        Stage::Topic => {
            show_curated_topics();
            show_topic_panel(state);
        }
        Stage::Approval => {
            show_topic_panel(state);
            show_options(state.length(), state.vibe(), state.format());
        }
        Stage::Verse => {
            show_options(state.length(), state.vibe(), state.format());
            if let Some(v) = state.verse_result() {
                show_verse(v, state.is_approved(), state.is_hearted());
            }
            if state.is_approved() {
                println!("\n  {}", "Was this verse catchy? Heart it to keep it.".dimmed());
            }
        }
    }
    println!("\n  {}", help(state.stage()).dimmed());
}

async fn generate(state: &mut WizardState, gateway: &Gateway, store: &FavoritesStore) {
    let params = match state.generation_request() {
        Ok(p) => p,
        Err(_) => return,
    };
    match with_spinner("Creating your verse...", gateway.generate_verse(&params)).await {
        Ok(verse) => {
            let hearted = store.is_favorite(&verse.verse).unwrap_or(false);
            state.accept_verse(verse, hearted);
        }
        Err(e) => state.fail_generation(e.message),
    }
}

pub async fn run_wizard(gateway: &Gateway, store: &FavoritesStore) -> Result<()> {
    let mut state = WizardState::new();
    println!("{}", "NeuroSong · learn the brain one verse at a time".magenta().bold());

    loop {
        render(&state);
        let Some(line) = ask("›") else { break };
        let action = parse_action(state.stage(), &line);
        debug!(?action, stage = ?state.stage(), "wizard input");

        match action {
            Action::Quit => break,
            Action::Help => {}
            Action::Favorites => show_favorites(&store.list()?),
            Action::Pick(n) => match catalog::nth(n) {
                Some((cat, item)) => state.pick_suggestion(item.topic, Some(item.rationale), Some(cat.label)),
                None => show_error(&format!("No curated topic #{n}.")),
            },
            Action::Suggest(seed) => {
                match with_spinner("Brainstorming a topic...", gateway.suggest_topic(seed.as_deref())).await {
                    Ok(s) => {
                        show_suggestion(&s);
                        state.pick_suggestion(&s.topic, Some(&s.rationale), Some("Model suggestion"));
                    }
                    Err(e) => show_error(&e.message),
                }
            }
            Action::Custom(text) => {
                let _ = state.set_prompt(&text);
            }
            Action::Confirm => {
                let _ = state.confirm_topic();
            }
            Action::Back => state.back_to_topic(),
            Action::SetLength(l) => state.set_length(l),
            Action::SetVibe(v) => state.set_vibe(v),
            Action::SetFormat(f) => state.set_format(f),
            Action::Generate => generate(&mut state, gateway, store).await,
            Action::Approve => {
                let _ = state.approve();
            }
            Action::Heart => {
                if let Err(e) = state.toggle_heart(store) {
                    show_error(&e.to_string());
                }
            }
            Action::Restart => state.restart(),
            Action::Unknown(s) if s.is_empty() => {}
            Action::Unknown(s) => show_error(&format!("Unrecognized input '{s}'. Type ? for help.")),
        }
    }

    println!("{}", "Bye!".dimmed());
    Ok(())
}
