//! Telegram bot.
//!
//! The bot is the chat front end of the ledger: it turns commands and free
//! text into engine calls and owns every user-facing text.

use std::{path::PathBuf, sync::Arc};

use engine::Engine;
use teloxide::{
    dispatching::HandlerExt,
    prelude::*,
    utils::command::BotCommands,
};

pub use ephemeral::Lifetimes;

mod charts;
mod commands;
mod ephemeral;
mod handlers;
mod ui;

use commands::Command;

#[derive(Clone)]
pub struct ConfigParameters {
    engine: Arc<Engine>,
    lifetimes: Lifetimes,
    csv_mirror: Option<PathBuf>,
}

pub struct Bot {
    token: String,
    parameters: ConfigParameters,
}

impl Bot {
    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);
        if let Err(err) = bot.set_my_commands(Command::bot_commands()).await {
            tracing::warn!("failed to register the command list: {err}");
        }

        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(handlers::handle_command),
            )
            .branch(Update::filter_message().endpoint(handlers::handle_text))
            .branch(Update::filter_callback_query().endpoint(handlers::handle_callback));

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![self.parameters.clone()])
            .default_handler(|upd| async move {
                tracing::warn!("Unhandled update: {:?}", upd);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default)]
pub struct BotBuilder {
    token: String,
    engine: Option<Arc<Engine>>,
    lifetimes: Lifetimes,
    csv_mirror: Option<PathBuf>,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    pub fn engine(mut self, engine: Arc<Engine>) -> BotBuilder {
        self.engine = Some(engine);
        self
    }

    pub fn lifetimes(mut self, lifetimes: Lifetimes) -> BotBuilder {
        self.lifetimes = lifetimes;
        self
    }

    /// Keep a CSV copy of the ledger at `path`, rewritten after every change.
    pub fn csv_mirror(mut self, path: impl Into<PathBuf>) -> BotBuilder {
        self.csv_mirror = Some(path.into());
        self
    }

    pub fn build(self) -> Result<Bot, String> {
        tracing::info!("Initializing telegram bot...");
        if self.token.trim().is_empty() {
            return Err("telegram token is empty".to_string());
        }
        let engine = self
            .engine
            .ok_or_else(|| "telegram bot needs a ledger engine".to_string())?;

        Ok(Bot {
            token: self.token,
            parameters: ConfigParameters {
                engine,
                lifetimes: self.lifetimes,
                csv_mirror: self.csv_mirror,
            },
        })
    }
}
