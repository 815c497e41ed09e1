use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

use crate::favorites::SavedVerse;
use crate::prompt::catalog;
use crate::wire::{Format, GeneratedVerse, Length, TopicSuggestion, Vibe};
use crate::wizard::{Stage, WizardState};

pub mod session;

pub fn show_progress(state: &WizardState) {
    println!();
    for stage in Stage::ALL {
        let marker = match stage.index().cmp(&state.stage().index()) {
            std::cmp::Ordering::Less => "✔".green().bold(),
            std::cmp::Ordering::Equal => "●".magenta().bold(),
            std::cmp::Ordering::Greater => "○".dimmed(),
        };
        let label = if stage == state.stage() {
            stage.label().to_uppercase().bold()
        } else {
            stage.label().to_uppercase().normal()
        };
        println!("  {} {}  {}", marker, label, stage.description().dimmed());
    }
    println!("  {}", state.status_message().italic());
    if let Some(err) = state.error() {
        show_error(err);
    }
}

pub fn show_curated_topics() {
    println!("\n{}", "Pick a precise topic and see the rationale instantly".bold());
    let mut n = 1;
    for cat in catalog::CATEGORIES {
        println!("\n  {}", cat.label.purple().bold());
        for item in cat.items {
            println!("   {:>2}. {}", n, item.topic);
            n += 1;
        }
    }
}

pub fn show_topic_panel(state: &WizardState) {
    if let Some(r) = state.topic_rationale() {
        println!("\n  {} {}", "What this explains:".purple().bold(), r);
    }
    let topic = if state.prompt().is_empty() {
        "Pick a topic above".dimmed().to_string()
    } else {
        state.prompt().bold().to_string()
    };
    println!("  {} {}", "Selected topic:".purple(), topic);
    if !state.topic_source().is_empty() {
        println!("  {}", state.topic_source().dimmed());
    }
}

pub fn show_options(length: Length, vibe: Vibe, format: Format) {
    println!(
        "\n  {}: {}   {}: {}   {}: {} ({} lines)",
        "Vibe".cyan().bold(), vibe,
        "Format".yellow().bold(), format,
        "Length".green().bold(), length, length.line_count()
    );
}

pub fn show_verse(verse: &GeneratedVerse, approved: bool, hearted: bool) {
    println!("\n{}", "┏━━━━━━━━━━━━━━━━━━━━━━━━ Verse ━━━━━━━━━━━━━━━━━━━━━━━━━┓".bold());
    println!("{}", indent(&verse.verse, 2));
    println!("{}", "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold());
    println!("\n  {} {}", "Explanation:".purple().bold(), verse.explanation);
    let mut flags = Vec::new();
    if approved {
        flags.push("approved ✨".green().bold().to_string());
    }
    flags.push(if hearted {
        "❤️ Saved to Favorites".red().to_string()
    } else {
        "🤍 Not saved".dimmed().to_string()
    });
    println!("  {}", flags.join("   "));
}

pub fn show_suggestion(s: &TopicSuggestion) {
    println!("\n  {} {}", "Topic:".purple().bold(), s.topic.bold());
    if !s.rationale.is_empty() {
        println!("  {} {}", "Rationale:".purple(), s.rationale);
    }
}

pub fn show_favorites(favs: &[SavedVerse]) {
    if favs.is_empty() {
        println!("\n{}", "No saved verses yet. Heart a verse to keep it here.".dimmed());
        return;
    }
    println!("\n{} ({})", "Saved verses".bold(), favs.len());
    for fav in favs {
        let when = chrono::DateTime::from_timestamp_millis(fav.timestamp)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "\n  {}  {}  {} / {} / {}",
            fav.id.dimmed(),
            when.dimmed(),
            fav.vibe.to_string().cyan(),
            fav.format.to_string().yellow(),
            fav.length.to_string().green()
        );
        println!("  {} {}", "Topic:".purple(), fav.prompt);
        println!("{}", indent(&fav.verse, 4));
    }
}

pub fn show_error(msg: &str) {
    eprintln!("  {} {}", "error:".red().bold(), msg.red());
}

pub fn ask(prompt: &str) -> Option<String> {
    print!("{} ", prompt.bold());
    let _ = io::stdout().flush();
    let mut s = String::new();
    match io::stdin().read_line(&mut s) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(s.trim().to_string()),
    }
}

/// Runs `fut` behind a spinner showing `message`.
pub async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.magenta} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    let out = fut.await;
    pb.finish_and_clear();
    out
}

fn indent(s: &str, n: usize) -> String {
    let pad = " ".repeat(n);
    s.lines()
        .map(|l| format!("{}{}", pad, l))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_keeps_blank_stanza_lines() {
        assert_eq!(indent("a\n\nb", 2), "  a\n  \n  b");
    }
}
