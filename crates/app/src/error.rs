use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions: the process logs them and exits non-zero.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("missing telegram token: set telegram.token or LEDGER_TELEGRAM__TOKEN")]
    MissingToken,
    #[error("missing data directory: set storage.data_dir or LEDGER_STORAGE__DATA_DIR")]
    MissingDataDir,
    #[error("invalid setting {key}: {reason}")]
    InvalidSetting { key: &'static str, reason: String },
    #[error("another instance is running (lock held on {})", .0.display())]
    LockHeld(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
    #[error(transparent)]
    Engine(#[from] engine::EngineError),
    #[error("telegram bot: {0}")]
    Bot(String),
}
