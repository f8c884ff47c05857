use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clipdeck_core::settings::EditorSettings;
use clipdeck_editor::editor::Editor;
use clipdeck_editor::message::{Effect, Message};

/// Upper bound on animation frames driven per message. A zoom animation
/// settles well before this at any sane easing factor.
const MAX_FRAMES_PER_MESSAGE: usize = 1_000;

/// Replay a recorded message script against a fresh timeline editor
#[derive(Parser, Debug)]
#[command(name = "clipdeck")]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file holding an array of editor messages
    script: PathBuf,

    /// Editor settings file
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => EditorSettings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => EditorSettings::default(),
    };

    let script = fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read {}", args.script.display()))?;
    let messages: Vec<Message> =
        serde_json::from_str(&script).context("script is not a JSON array of messages")?;

    let mut editor = Editor::new(settings);
    for message in messages {
        let mut effect = editor.update(message);
        let mut frames = 0;
        while let Effect::RequestFrame(token) = effect {
            if frames == MAX_FRAMES_PER_MESSAGE {
                break;
            }
            effect = editor.update(Message::AnimationFrame(token));
            frames += 1;
        }
    }
    info!(
        tracks = editor.timeline.tracks.len(),
        clips = editor.timeline.clips.len(),
        "replay finished"
    );
    if !editor.status_message.is_empty() {
        info!(status = %editor.status_message);
    }

    println!("{}", serde_json::to_string_pretty(&editor.timeline)?);
    Ok(())
}
