//! Sydney Events CLI
//!
//! Local entry point for browsing, refreshing and subscribing to events.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sydney_events::{
    EventsApp,
    error::{AppError, Result},
    models::{Config, Event, SubscribeRequest},
    pipeline::{CatalogOrigin, bearer},
    utils::{clock::format_millis, log},
};

/// Sydney Events - scraped event listings with a cached catalog
#[derive(Parser, Debug)]
#[command(
    name = "sydney-events",
    version,
    about = "Browse and refresh events happening in Sydney"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "storage/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List current events, refreshing the catalog when stale
    Events {
        /// Only show events in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show a single event
    Show {
        /// Event identifier
        id: String,
    },

    /// List categories with their event counts
    Categories,

    /// Scrape all sources now
    Refresh {
        /// Secret token (default: the configured secret)
        #[arg(long)]
        token: Option<String>,
    },

    /// Subscribe an email address to an event
    Subscribe {
        #[arg(long)]
        email: String,

        #[arg(long)]
        event_id: String,

        /// Ticket page to return on success
        #[arg(long)]
        ticket_url: Option<String>,
    },

    /// Validate the configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_event(event: &Event) {
    log::sub_item(&format!("{} [{}]", event.title, event.id));
    log::sub_item(&format!("  {} | {} | {}", event.date, event.time, event.venue));
    log::sub_item(&format!("  {} | {}", event.price, event.ticket_url));
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config).with_env_overrides();
    ::log::debug!("Loaded configuration from {}", cli.config.display());

    if let Command::Validate = cli.command {
        ::log::info!("Validating configuration...");
        if let Err(e) = config.validate() {
            ::log::error!("Config validation failed: {}", e);
            return Err(e);
        }
        ::log::info!("✓ Config OK (store backend: {:?})", config.store.backend);
        return Ok(());
    }

    config.validate()?;
    let app = EventsApp::from_config(&config)?;

    match cli.command {
        Command::Events { category } => {
            let outcome = app.get_events().await;
            let events = match &category {
                Some(name) => sydney_events::pipeline::events_in_category(&outcome.events, name),
                None => outcome.events.clone(),
            };

            log::header(&format!("Sydney events ({})", events.len()));
            for event in &events {
                print_event(event);
            }
            log::separator();
            log::summary(
                "Catalog",
                &[
                    ("Last updated", format_millis(outcome.last_updated)),
                    ("Served from", format!("{:?}", outcome.origin)),
                ],
            );
            if outcome.origin == CatalogOrigin::Fallback {
                ::log::warn!("Serving built-in sample events");
            }
        }

        Command::Show { id } => match app.get_event_by_id(&id).await {
            Some(event) => {
                log::header(&event.title);
                ::log::info!("{}", event.description);
                print_event(&event);
                log::sub_item(&format!("  {} ({})", event.address, event.category));
            }
            None => {
                ::log::error!("Event not found: {}", id);
                return Err(AppError::validation(format!("no event with id {}", id)));
            }
        },

        Command::Categories => {
            let summaries = app.categories().await;
            log::header(&format!("Categories ({})", summaries.len()));
            for summary in &summaries {
                log::sub_item(&format!("{}: {}", summary.name, summary.count));
            }
        }

        Command::Refresh { token } => {
            let token = token.or_else(|| config.refresh_secret().map(str::to_string));
            let header = token.as_deref().map(bearer);
            let response = app.refresh(header.as_deref()).await?;
            ::log::info!("{}", response.message);
        }

        Command::Subscribe {
            email,
            event_id,
            ticket_url,
        } => {
            let response = app
                .subscribe(SubscribeRequest {
                    email,
                    event_id,
                    ticket_url,
                })
                .await;
            if !response.success {
                ::log::error!("{}", response.message);
                return Err(AppError::validation(response.message));
            }
            ::log::info!("{}", response.message);
            if let Some(url) = &response.ticket_url {
                log::sub_item(&format!("Tickets: {}", url));
            }
            if !response.persisted {
                ::log::warn!("Subscription could not be stored");
            }
        }

        Command::Validate => {}
    }

    Ok(())
}
