use anyhow::Context;
use clap::Parser;
use std::sync::Arc;

mod cli;
mod config;
mod errors;
mod favorites;
mod gateway;
mod log;
mod prompt;
mod provider;
mod server;
mod ux;
mod validate;
mod wire;
mod wizard;

use cli::{Command, FavoritesCommand};
use favorites::FavoritesStore;
use gateway::Gateway;
use wire::VerseParams;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    log::LoggingConfig::from_env(args.debug).init()?;

    let mut cfg = config::Config::load(args.config.as_deref())?;
    if let Some(p) = args.provider {
        cfg.provider = p;
    }
    if let Some(m) = &args.model {
        cfg.model = m.clone();
    }
    if let Some(t) = args.timeout_secs {
        cfg.timeout_secs = t;
    }
    if let Some(f) = &args.favorites {
        cfg.favorites_path = f.clone();
    }
    tracing::debug!(provider = ?cfg.provider, model = %cfg.model, timeout_secs = cfg.timeout_secs, "effective config");

    if cfg.provider == cli::ProviderKind::OpenAI {
        if let Err(e) = cfg.require_api_key() {
            tracing::warn!("{e}");
        }
    }

    let prov = provider::make_provider(&cfg).context("could not build model provider")?;
    let mut gateway = Gateway::new(prov, &cfg);
    if args.save_transcripts {
        gateway = gateway.with_transcripts(log::transcript::Transcripts::new(&cfg.transcripts_root));
    }
    let store = FavoritesStore::new(&cfg.favorites_path);

    match args.command {
        Command::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| cfg.bind.clone());
            let state = server::AppState { gateway, favorites: Arc::new(store) };
            server::run(&addr, state).await
        }
        Command::Wizard => ux::session::run_wizard(&gateway, &store).await,
        Command::Generate { prompt, length, vibe, format, approved_topic } => {
            let prompt = validate::prompt_text(&prompt)?;
            let approved_topic = approved_topic
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| prompt.clone());
            let params = VerseParams { prompt, length, vibe, format, approved_topic: Some(approved_topic) };
            let verse = ux::with_spinner("Creating your verse...", gateway.generate_verse(&params)).await?;
            let hearted = store.is_favorite(&verse.verse).unwrap_or(false);
            ux::show_options(length, vibe, format);
            ux::show_verse(&verse, false, hearted);
            Ok(())
        }
        Command::Suggest { seed } => {
            let s = ux::with_spinner("Brainstorming a topic...", gateway.suggest_topic(seed.as_deref())).await?;
            ux::show_suggestion(&s);
            Ok(())
        }
        Command::Favorites(FavoritesCommand::List) => {
            ux::show_favorites(&store.list()?);
            Ok(())
        }
        Command::Favorites(FavoritesCommand::Remove { id }) => {
            if store.remove(&id)? {
                println!("Removed {id}.");
            } else {
                println!("No saved verse with id {id}.");
            }
            Ok(())
        }
    }
}
