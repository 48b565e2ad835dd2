//! Homework Status Bot - Main Entry Point
//!
//! Polls the Practicum API on a fixed interval and relays homework
//! review status changes to a Telegram chat.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use homework_status_bot::config::{BotSettings, Credentials};
use homework_status_bot::practicum::PracticumClient;
use homework_status_bot::scheduler::{PollState, PollerMessage, StatusPoller};
use homework_status_bot::telegram::TelegramBot;

/// Telegram bot relaying homework review status changes.
#[derive(Parser, Debug)]
#[command(name = "homework_bot")]
#[command(about = "Notify a Telegram chat when a homework review status changes")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Also append logs to this file (overrides LOG_FILE).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run a single polling cycle and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load environment variables before reading settings
    let env_loaded = dotenvy::from_filename(&args.env_file);

    let mut settings = BotSettings::from_env_with_defaults();
    if args.log_file.is_some() {
        settings.log_file.clone_from(&args.log_file);
    }

    init_logging(&args.log_level, settings.log_file.as_deref())?;

    if let Err(e) = env_loaded {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("{}", e);
            return Err(e).context("Cannot start without the required environment variables");
        }
    };

    let http = reqwest::Client::builder()
        .timeout(settings.request_timeout())
        .build()
        .context("Failed to build HTTP client")?;

    let source = PracticumClient::new(
        http.clone(),
        settings.endpoint.clone(),
        credentials.practicum_token.clone(),
    );
    let bot = TelegramBot::new(
        http,
        settings.telegram_api_url.clone(),
        credentials.telegram_token.clone(),
        credentials.telegram_chat_id.clone(),
    );

    info!("Tracking review statuses at {}", source.endpoint());
    let poller = StatusPoller::new(source, bot, settings.retry_period());
    let mut state = PollState::starting_now();

    if args.once {
        let outcome = poller.cycle(&mut state).await;
        info!("Single cycle finished: {:?}", outcome);
        if !outcome.is_success() {
            anyhow::bail!("Single polling cycle failed: {outcome:?}");
        }
        return Ok(());
    }

    let (poller_tx, poller_rx) = mpsc::channel::<PollerMessage>(1);

    info!("Starting homework status bot...");
    let poller_handle = tokio::spawn(async move { poller.run(state, poller_rx).await });

    info!("Bot is running. Use Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    info!("Received Ctrl+C, shutting down...");
    let _ = poller_tx.send(PollerMessage::Shutdown).await;
    let _ = poller_handle.await;

    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str, log_file: Option<&Path>) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .init();

    Ok(())
}
