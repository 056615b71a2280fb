use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use mentor_core::{ConversationStore, FileStore, MentorSession, MentorStyle, ReplyGenerator, Settings};

mod app;
mod commands;
mod render;

#[derive(Parser)]
#[command(name = "mentor")]
#[command(about = "Mentor Chat - startup mentorship in your terminal")]
#[command(version)]
struct Cli {
    /// Send a single message and exit
    #[arg(short, long)]
    prompt: Option<String>,

    /// Mentor tone (supportive, direct, investor, balanced); saved as the new default
    #[arg(short, long)]
    style: Option<String>,

    /// Directory for saved conversations and profile
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Reply immediately instead of emulating thinking time
    #[arg(long)]
    no_latency: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::load();
    if let Some(dir) = cli.data_dir {
        settings.storage.data_dir = Some(dir);
    }
    if cli.no_latency {
        settings.simulation.latency = false;
    }

    let mut store = ConversationStore::open(FileStore::with_dir(settings.data_dir())?);
    if let Some(ref style) = cli.style {
        let style: MentorStyle = style.parse().unwrap_or_default();
        store.set_style(style)?;
    }

    let credential = settings.api_key().or_else(|| store.credential());
    if credential.is_none() {
        tracing::info!("No API key configured, using local mentor replies");
    }
    let generator = ReplyGenerator::new(credential, &settings);
    let mut session = MentorSession::new(store, Box::new(generator));

    if let Some(prompt) = cli.prompt {
        app::run_single_prompt(&mut session, &prompt).await?;
    } else {
        app::run_repl(session).await?;
    }

    Ok(())
}
