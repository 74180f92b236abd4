//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the rental desk console,
//! including all slash commands, autocomplete handlers, and bot context management.

/// Discord command implementations (client, crew, booking, invoice, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, session checks, notices)
pub mod handlers;

use crate::{
    config::business::Config,
    core::{session::Session, store::Store},
    errors::Error,
};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// Holds the entity store, the loaded configuration, and the operator session.
pub struct BotData {
    /// Entity store used by every command
    pub store: Store,
    /// Business identity and console settings
    pub config: Arc<Config>,
    /// Operator session observed by protected commands
    pub session: Session,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub const fn new(store: Store, config: Arc<Config>, session: Session) -> Self {
        Self {
            store,
            config,
            session,
        }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {}", ctx.command().name, error);
            let operation = ctx.command().qualified_name.clone();
            if let Err(e) = ctx.say(handlers::notices::error_notice(&error, &operation)).await {
                error!("Failed to send error message: {}", e);
            }
        }
        poise::FrameworkError::CommandCheckFailed { error, ctx, .. } => {
            if let Some(error) = error {
                error!("Session check failed in `{}`: {}", ctx.command().name, error);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework and runs the Discord client until it stops.
///
/// # Errors
/// Returns an error if the client cannot be created or the gateway connection fails.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<(), serenity::Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::login(),
                commands::logout(),
                commands::client(),
                commands::crew(),
                commands::booking(),
                commands::invoice(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))
}
