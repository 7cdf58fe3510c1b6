//! Handles settings for the application.
//!
//! Values come from an optional TOML file (`config/ledger.toml` unless
//! `--config` says otherwise), then from `LEDGER_*` environment variables
//! with `__` between sections (`LEDGER_TELEGRAM__TOKEN`), then from the
//! command line.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use chrono_tz::Tz;
use clap::Parser;
use config::{Config, Environment, File};
use engine::{AmountPolicy, ClearPolicy};
use serde::Deserialize;
use telegram_bot::Lifetimes;

use crate::error::StartupError;

const DEFAULT_CONFIG_PATH: &str = "config/ledger.toml";
const ENV_PREFIX: &str = "LEDGER";
const LOCK_FILE: &str = "ledger.lock";
const CSV_MIRROR_FILE: &str = "entries.csv";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Telegram {
    pub token: Option<String>,
    pub autodelete_secs: u64,
    pub error_autodelete_secs: u64,
}

impl Default for Telegram {
    fn default() -> Self {
        Self {
            token: None,
            autodelete_secs: 60,
            error_autodelete_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Storage {
    pub data_dir: Option<PathBuf>,
    pub database_file: String,
    pub lock_file: Option<PathBuf>,
    pub csv_mirror: bool,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            data_dir: None,
            database_file: "ledger.db".to_string(),
            lock_file: None,
            csv_mirror: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Ledger {
    pub amount_policy: AmountPolicy,
    pub clear_policy: ClearPolicy,
    pub timezone: String,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            amount_policy: AmountPolicy::default(),
            clear_policy: ClearPolicy::default(),
            timezone: "UTC".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub telegram: Telegram,
    pub storage: Storage,
    pub ledger: Ledger,
}

#[derive(Debug, Parser)]
#[command(name = "ledger_bot", about = "Conversational expense ledger for Telegram")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the data directory.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Override the log level (e.g. debug).
    #[arg(long)]
    level: Option<String>,
}

/// Settings checked and resolved into what the process needs to start.
#[derive(Debug, Clone)]
pub struct Startup {
    pub token: String,
    pub data_dir: PathBuf,
    pub database_path: PathBuf,
    pub lock_path: PathBuf,
    pub csv_mirror: Option<PathBuf>,
    pub amount_policy: AmountPolicy,
    pub clear_policy: ClearPolicy,
    pub timezone: Tz,
    pub lifetimes: Lifetimes,
}

impl Settings {
    /// Reads the command line, the config file and the environment.
    pub fn load() -> Result<Self, StartupError> {
        let args = Args::parse();

        let config_path = args
            .config
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        let mut settings = Self::from_file(&config_path)?;

        if let Some(data_dir) = args.data_dir {
            settings.storage.data_dir = Some(data_dir);
        }
        if let Some(level) = args.level {
            settings.app.level = level;
        }
        Ok(settings)
    }

    /// Layers `path` (skipped when missing) and the `LEDGER_*` environment.
    pub fn from_file(path: &Path) -> Result<Self, StartupError> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Validates the settings. Missing token or data directory are fatal.
    pub fn resolve(&self) -> Result<Startup, StartupError> {
        let token = self
            .telegram
            .token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(StartupError::MissingToken)?
            .to_string();

        let data_dir = self
            .storage
            .data_dir
            .clone()
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or(StartupError::MissingDataDir)?;

        if self.storage.database_file.trim().is_empty() {
            return Err(StartupError::InvalidSetting {
                key: "storage.database_file",
                reason: "must not be empty".to_string(),
            });
        }

        let timezone =
            Tz::from_str(self.ledger.timezone.trim()).map_err(|err| StartupError::InvalidSetting {
                key: "ledger.timezone",
                reason: err.to_string(),
            })?;

        Ok(Startup {
            token,
            database_path: data_dir.join(&self.storage.database_file),
            lock_path: self
                .storage
                .lock_file
                .clone()
                .unwrap_or_else(|| data_dir.join(LOCK_FILE)),
            csv_mirror: self
                .storage
                .csv_mirror
                .then(|| data_dir.join(CSV_MIRROR_FILE)),
            data_dir,
            amount_policy: self.ledger.amount_policy,
            clear_policy: self.ledger.clear_policy,
            timezone,
            lifetimes: Lifetimes {
                summary: Duration::from_secs(self.telegram.autodelete_secs),
                hint: Duration::from_secs(self.telegram.error_autodelete_secs),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_from(toml: &str) -> Settings {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.toml");
        std::fs::write(&path, toml).unwrap();
        Settings::from_file(&path).unwrap()
    }

    #[test]
    fn file_values_are_resolved() {
        let settings = settings_from(
            r#"
            [telegram]
            token = "123:abc"
            autodelete_secs = 10

            [storage]
            data_dir = "/var/lib/ledger"
            csv_mirror = true

            [ledger]
            amount_policy = "decimal"
            clear_policy = "keep_ids"
            timezone = "Europe/Rome"
            "#,
        );
        let startup = settings.resolve().unwrap();

        assert_eq!(startup.token, "123:abc");
        assert_eq!(startup.database_path, Path::new("/var/lib/ledger/ledger.db"));
        assert_eq!(startup.lock_path, Path::new("/var/lib/ledger/ledger.lock"));
        assert_eq!(
            startup.csv_mirror.as_deref(),
            Some(Path::new("/var/lib/ledger/entries.csv"))
        );
        assert_eq!(startup.amount_policy, AmountPolicy::Decimal);
        assert_eq!(startup.clear_policy, ClearPolicy::KeepIds);
        assert_eq!(startup.timezone, chrono_tz::Europe::Rome);
        assert_eq!(startup.lifetimes.summary, Duration::from_secs(10));
        assert_eq!(startup.lifetimes.hint, Duration::from_secs(30));
    }

    #[test]
    fn defaults_apply_to_missing_sections() {
        let settings = Settings::default();
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.storage.database_file, "ledger.db");
        assert_eq!(settings.ledger.amount_policy, AmountPolicy::Integer);
        assert_eq!(settings.ledger.clear_policy, ClearPolicy::ResetIds);
    }

    #[test]
    fn missing_token_is_fatal() {
        let mut settings = Settings::default();
        settings.storage.data_dir = Some(PathBuf::from("data"));
        assert!(matches!(settings.resolve(), Err(StartupError::MissingToken)));

        settings.telegram.token = Some("   ".to_string());
        assert!(matches!(settings.resolve(), Err(StartupError::MissingToken)));
    }

    #[test]
    fn missing_data_dir_is_fatal() {
        let mut settings = Settings::default();
        settings.telegram.token = Some("123:abc".to_string());
        assert!(matches!(
            settings.resolve(),
            Err(StartupError::MissingDataDir)
        ));
    }

    #[test]
    fn explicit_lock_file_wins() {
        let mut settings = Settings::default();
        settings.telegram.token = Some("123:abc".to_string());
        settings.storage.data_dir = Some(PathBuf::from("data"));
        settings.storage.lock_file = Some(PathBuf::from("/run/ledger.lock"));
        let startup = settings.resolve().unwrap();
        assert_eq!(startup.lock_path, Path::new("/run/ledger.lock"));
        assert_eq!(startup.csv_mirror, None);
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let mut settings = Settings::default();
        settings.telegram.token = Some("123:abc".to_string());
        settings.storage.data_dir = Some(PathBuf::from("data"));
        settings.ledger.timezone = "Mars/Olympus".to_string();
        assert!(matches!(
            settings.resolve(),
            Err(StartupError::InvalidSetting {
                key: "ledger.timezone",
                ..
            })
        ));
    }
}
