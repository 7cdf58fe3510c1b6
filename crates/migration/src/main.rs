use sea_orm::{ConnectionTrait, Database};
use sea_orm_migration::prelude::*;

const DEFAULT_URL: &str = "sqlite:./data/ledger.db?mode=rwc";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut args = std::env::args().skip(1);
    let cmd = args.next().unwrap_or_else(|| "up".to_string());

    // Explicit argument wins over the environment.
    let db_url = args
        .next()
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_URL.to_string());

    let db = Database::connect(&db_url).await?;
    db.execute_unprepared("PRAGMA journal_mode = WAL;").await?;

    match cmd.as_str() {
        "up" => migration::Migrator::up(&db, None).await?,
        "down" => migration::Migrator::down(&db, None).await?,
        "fresh" => migration::Migrator::fresh(&db).await?,
        "status" => {
            migration::Migrator::status(&db).await?;
        }
        _ => {
            eprintln!("Usage: cargo run -p migration -- [up|down|fresh|status] [database-url]");
            std::process::exit(2);
        }
    }

    Ok(())
}
