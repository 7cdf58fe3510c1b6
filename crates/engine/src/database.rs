//! Opening the SQLite store.
//!
//! The host process can be killed at any time, so every connection runs in
//! WAL mode with full fsync on commit. A single pooled connection keeps all
//! writes of the process serialized.

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};

use crate::ResultEngine;

/// Builds the connection URL for a SQLite file, creating it if needed.
pub fn sqlite_url(path: &std::path::Path) -> String {
    format!("sqlite:{}?mode=rwc", path.display())
}

/// Opens `url` and applies the durability pragmas.
///
/// In-memory databases report `memory` as journal mode; that is fine for
/// tests.
pub async fn connect(url: &str) -> ResultEngine<DatabaseConnection> {
    let mut options = ConnectOptions::new(url.to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let database = Database::connect(options).await?;
    database
        .execute_unprepared("PRAGMA journal_mode = WAL;")
        .await?;
    database
        .execute_unprepared("PRAGMA synchronous = FULL;")
        .await?;
    tracing::debug!("opened ledger database at {url}");
    Ok(database)
}

/// Reads the current journal mode (`wal`, `memory`, `delete`, ...).
pub async fn journal_mode(database: &DatabaseConnection) -> ResultEngine<String> {
    let backend = database.get_database_backend();
    let row = database
        .query_one(Statement::from_string(backend, "PRAGMA journal_mode;"))
        .await?;
    Ok(row
        .and_then(|r| r.try_get::<String>("", "journal_mode").ok())
        .unwrap_or_default())
}
