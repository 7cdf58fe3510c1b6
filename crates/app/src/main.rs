use std::{process::ExitCode, sync::Arc};

use engine::{Engine, SystemClock};
use migration::{Migrator, MigratorTrait};

use crate::{error::StartupError, instance_lock::InstanceLock, settings::Settings};

mod error;
mod instance_lock;
mod settings;

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("ledger_bot: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "ledger_bot={level},telegram_bot={level},engine={level},migration={level}",
            level = settings.app.level
        ))
        .init();

    match run(&settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: &Settings) -> Result<(), StartupError> {
    let startup = settings.resolve()?;

    std::fs::create_dir_all(&startup.data_dir)?;
    let _lock = InstanceLock::acquire(&startup.lock_path)?;

    let db = engine::connect(&engine::sqlite_url(&startup.database_path)).await?;
    Migrator::up(&db, None).await?;
    tracing::info!(
        "ledger database ready at {} (journal: {})",
        startup.database_path.display(),
        engine::journal_mode(&db).await?
    );

    let engine = Engine::builder()
        .database(db)
        .amount_policy(startup.amount_policy)
        .clear_policy(startup.clear_policy)
        .clock(Arc::new(SystemClock::new(startup.timezone)))
        .build()
        .await?;

    let mut bot = telegram_bot::Bot::builder()
        .token(&startup.token)
        .engine(Arc::new(engine))
        .lifetimes(startup.lifetimes);
    if let Some(path) = &startup.csv_mirror {
        bot = bot.csv_mirror(path);
    }
    let bot = bot.build().map_err(StartupError::Bot)?;

    bot.run().await;
    tracing::info!("telegram bot stopped");
    Ok(())
}
