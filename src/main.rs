//! Yikes - play a text adventure narrated by a local LLM
//!
//! Usage: `yikes [GENRE] [--model MODEL]`

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yikes_engine::application::services::{CharacterService, NarrativeBackend, SessionDispatcher};
use yikes_engine::domain::entities::WorldState;
use yikes_engine::domain::value_objects::Genre;
use yikes_engine::infrastructure::cli::{
    create_character, run_session, shutdown_signal, ShutdownReason, Terminal,
};
use yikes_engine::infrastructure::config::AppConfig;
use yikes_engine::infrastructure::ollama::OllamaClient;

#[derive(Parser)]
#[command(name = "yikes", about = "LLM-narrated text adventure", version)]
struct Cli {
    /// Game genre (fantasy, scifi)
    #[arg(default_value = "fantasy")]
    genre: String,

    /// Ollama model to use instead of the configured one
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yikes_engine=warn,yikes=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let reason = tokio::select! {
        result = run(cli) => match result {
            Ok(()) => ShutdownReason::GameOver,
            Err(e) => {
                tracing::error!(error = ?e, "Game failed");
                eprintln!("Error: {e:#}");
                ShutdownReason::Error
            }
        },
        () = shutdown_signal() => ShutdownReason::Signal,
    };

    println!("{}", reason.notice());
    if reason == ShutdownReason::Signal {
        // The pending stdin read sits on a blocking thread and would stall runtime shutdown
        std::process::exit(0);
    }
    reason.exit_code()
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let genre: Genre = cli.genre.parse()?;

    let mut config = AppConfig::from_env()?;
    if let Some(model) = cli.model {
        config.ollama_model = model;
    }
    tracing::debug!(
        base_url = %config.ollama_base_url,
        model = %config.ollama_model,
        "Configuration loaded"
    );

    let client = OllamaClient::new(
        &config.ollama_base_url,
        &config.ollama_model,
        config.request_timeout(),
    )
    .context("Failed to build the Ollama client")?;
    let characters = CharacterService::new(client.clone());
    let backend = NarrativeBackend::new(client).with_min_interval(config.min_call_interval());
    let world = WorldState::new(genre).with_context_window(config.context_window);
    let mut session = SessionDispatcher::new(world, backend);

    let mut terminal = Terminal::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    terminal
        .say(&format!("Starting game in {} genre...", genre))
        .await?;

    let character = create_character(&mut terminal, genre, &characters).await?;
    session.begin(character)?;
    tracing::info!(session_id = %session.id(), "Character creation complete");
    terminal
        .say("\nCharacter creation complete! Type .help for available commands")
        .await?;

    run_session(&mut terminal, &mut session).await
}
