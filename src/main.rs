use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tense_trainer::gemini::{ApiKeyManager, GeminiClient};
use tense_trainer::identity::Identity;
use tense_trainer::practice::{
    GenerationRequest, PracticeService, ReviewOutcome, SeenSentences, Tutor,
};
use tense_trainer::session::{SessionConfig, SessionState};
use tense_trainer::tense::{Tense, TenseGroup};
use tense_trainer::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tense-trainer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tenses available for practice
    Tenses,
    /// Generate practice sentences and print them
    Generate {
        /// Tense to practise (repeatable), e.g. "Present Simple"
        #[arg(short, long = "tense", required = true)]
        tenses: Vec<Tense>,
        /// Topic for the sentences
        #[arg(long)]
        theme: Option<String>,
        /// Number of sentences (1-20)
        #[arg(short, long, default_value_t = SessionConfig::DEFAULT_SENTENCES,
              value_parser = clap::value_parser!(u32).range(1..=20))]
        count: u32,
    },
    /// Review a translation of a sentence
    Review {
        /// The Ukrainian sentence
        #[arg(short, long)]
        sentence: String,
        /// Your English translation
        #[arg(short, long)]
        answer: String,
    },
    /// Manage the Gemini API key stored in the system keyring
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store an API key
    Set {
        /// Gemini API key (starts with AIza)
        key: String,
    },
    /// Remove the stored API key
    Clear,
    /// Show whether a key is available
    Status,
}

/// Send logs to stderr, or to the log file while the TUI owns the terminal
fn init_logging(tui: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tense_trainer=info".into());

    if tui {
        let path = Config::log_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {:?}", parent))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {:?}", path))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn build_service(config: &Config) -> Result<Tutor<GeminiClient>> {
    let api_key = ApiKeyManager::resolve()?;
    let client = GeminiClient::new(api_key, config.model, config.request_timeout())?
        .with_base_url(config.api_base_url.clone());
    Ok(Tutor::new(client))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.is_none())?;

    match cli.command {
        Some(Commands::Tenses) => {
            for group in TenseGroup::all() {
                println!("{}:", group.label());
                for tense in group.tenses() {
                    println!("  {}", tense.label());
                }
            }
        }
        Some(Commands::Generate { tenses, theme, count }) => {
            let config = Config::load()?;
            let service = build_service(&config)?;
            let tenses: BTreeSet<Tense> = tenses.into_iter().collect();
            let request = GenerationRequest { tenses, theme, count };
            let mut seen = SeenSentences::default();
            for item in service.generate(&request, &mut seen).await? {
                println!("{} [{}]", item.sentence, item.tense);
            }
        }
        Some(Commands::Review { sentence, answer }) => {
            let config = Config::load()?;
            let service = build_service(&config)?;
            match service.review(&sentence, &answer).await {
                ReviewOutcome::Feedback(text) => println!("{}", text),
                ReviewOutcome::Failed(fallback) => anyhow::bail!(fallback),
            }
        }
        Some(Commands::Key { action }) => match action {
            KeyAction::Set { key } => {
                ApiKeyManager::set_api_key(key.trim())?;
                println!("Stored API key {}", ApiKeyManager::mask_key(key.trim()));
            }
            KeyAction::Clear => {
                ApiKeyManager::delete_api_key()?;
                println!("Removed stored API key");
            }
            KeyAction::Status => match ApiKeyManager::resolve() {
                Ok(key) => println!("API key available: {}", ApiKeyManager::mask_key(&key)),
                Err(e) => println!("{}", e),
            },
        },
        None => {
            // Launch TUI
            let config = Config::load()?;
            let service = build_service(&config)?;
            let identity = Identity::establish(Config::data_dir().ok().as_deref());
            let session = SessionState::new(identity, config.show_tense);
            let mut app = App::new(config, session, Arc::new(service))?;
            app.run().await?;
        }
    }

    Ok(())
}
