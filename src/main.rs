//! Stockroom - inventory client CLI
//!
//! Main entry point for the Stockroom command-line client.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stockroom::api::ApiClient;
use stockroom::auth::{Gateway, KeyringStore};
use stockroom::cli::{CategoryCommand, Cli, Commands, ItemCommand, UsageCommand};
use stockroom::commands;
use stockroom::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load and validate configuration
    let config = Config::load(&cli.config)?;
    config.validate()?;

    let base_url = url::Url::parse(&config.api.base_url)?;
    tracing::debug!("backend origin: {}", base_url);

    let gateway = Gateway::new(
        base_url,
        Arc::new(KeyringStore::new()),
        Duration::from_secs(config.api.timeout_seconds),
    )
    .on_session_invalidated(|| {
        eprintln!(
            "{}",
            "Session expired; run `stockroom login` to sign in again.".yellow()
        );
    });
    let client = ApiClient::new(Arc::new(gateway));

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&client, &username, &password).await
        }
        Commands::Logout => commands::auth::logout(&client),
        Commands::Items { command } => match command {
            ItemCommand::List {
                available,
                in_use,
                json,
            } => commands::items::list(&client, available, in_use, json).await,
            ItemCommand::Show { id, json } => commands::items::show(&client, id, json).await,
            ItemCommand::Borrow {
                id,
                user,
                contact,
                purpose,
                notes,
                condition,
            } => {
                commands::items::borrow(&client, id, user, contact, purpose, notes, condition)
                    .await
            }
            ItemCommand::Return {
                id,
                condition,
                notes,
            } => commands::items::return_item(&client, id, condition, notes).await,
            ItemCommand::UploadImage { id, path } => {
                commands::items::upload_image(&client, id, &path).await
            }
        },
        Commands::Usages { command } => match command {
            UsageCommand::List {
                current,
                user,
                json,
            } => commands::usages::list(&client, current, user.as_deref(), json).await,
        },
        Commands::Categories { command } => match command {
            CategoryCommand::List { json } => commands::categories::list(&client, json).await,
        },
    }
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `--verbose` raises the crate's
/// level to debug.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "stockroom=debug"
    } else {
        "stockroom=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
