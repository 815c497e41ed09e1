use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::wire::{Format, Length, Vibe};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[value(alias = "open-ai", alias = "openai")]
    OpenAI,
    /// Offline canned responses, no API key needed.
    Mock,
}

#[derive(Parser, Debug)]
#[command(name = "neurosong", version, about = "Neuroscience verses from a language model, one guided step at a time")]
pub struct Args {
    /// TOML file layered under the OPENAI_* environment variables.
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, value_enum, global = true)]
    pub provider: Option<ProviderKind>,

    #[arg(long, global = true)]
    pub model: Option<String>,

    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[arg(long, global = true)]
    pub favorites: Option<String>,

    /// Write every prompt and raw completion under .neurosong/tx/<id>/.
    #[arg(long, default_value_t = false, global = true)]
    pub save_transcripts: bool,

    #[arg(long, default_value_t = false, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve /api/llm, /api/topics and /api/favorites.
    Serve {
        #[arg(long)]
        bind: Option<String>,
    },
    /// Walk through topic, approval and verse interactively.
    Wizard,
    /// Generate one verse and print it.
    Generate {
        prompt: String,
        #[arg(long, value_enum, default_value_t = Length::Medium)]
        length: Length,
        #[arg(long, value_enum, default_value_t = Vibe::Upbeat)]
        vibe: Vibe,
        #[arg(long, value_enum, default_value_t = Format::Song)]
        format: Format,
        #[arg(long)]
        approved_topic: Option<String>,
    },
    /// Ask the model for a topic idea.
    Suggest {
        #[arg(long)]
        seed: Option<String>,
    },
    #[command(subcommand)]
    Favorites(FavoritesCommand),
}

#[derive(Subcommand, Debug)]
pub enum FavoritesCommand {
    List,
    Remove { id: String },
}
