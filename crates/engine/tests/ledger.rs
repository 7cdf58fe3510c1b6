use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use sea_orm::DatabaseConnection;

use engine::{
    AmountPolicy, ClearPolicy, Engine, EngineError, EntryType, ListOrder, ManualClock, Money,
    Period, REVENUE_CATEGORY, Window,
};
use migration::MigratorTrait;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

async fn memory_db() -> DatabaseConnection {
    let db = engine::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

async fn engine_with_clock(policy: AmountPolicy) -> (Engine, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(at(2024, 5, 15, 10, 0)));
    let engine = Engine::builder()
        .database(memory_db().await)
        .amount_policy(policy)
        .clock(clock.clone())
        .build()
        .await
        .unwrap();
    (engine, clock)
}

#[tokio::test]
async fn empty_store_sums_to_zero() {
    let (engine, _clock) = engine_with_clock(AmountPolicy::Integer).await;

    assert_eq!(
        engine.sum(EntryType::Expense, None, None).await.unwrap(),
        Money::ZERO
    );
    assert_eq!(engine.revenue_total().await.unwrap(), Money::ZERO);
    let summary = engine
        .period_summary(Period::All, engine.now())
        .await
        .unwrap();
    assert!(summary.is_empty());
    assert_eq!(summary.grand_total, Money::ZERO);
}

#[tokio::test]
async fn free_text_entry_is_lowercased_and_scaled() {
    let (engine, _clock) = engine_with_clock(AmountPolicy::Integer).await;

    let recorded = engine.record_text("Food 2500 Lunch").await.unwrap();
    assert_eq!(recorded.id, 1);
    assert_eq!(recorded.category, "food");
    assert_eq!(recorded.label, "Food");
    assert_eq!(recorded.amount, Money::new(250_000));
    assert_eq!(recorded.category_total.format(AmountPolicy::Integer), "$2,500");

    let stored = engine.all_entries().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].category, "food");
    assert_eq!(stored[0].note, "Lunch");
    assert_eq!(stored[0].timestamp, at(2024, 5, 15, 10, 0));
    assert_eq!(stored[0].entry_type, EntryType::Expense);
}

#[tokio::test]
async fn category_totals_accumulate_case_insensitively() {
    let (engine, _clock) = engine_with_clock(AmountPolicy::Integer).await;

    engine.record_text("food 10").await.unwrap();
    let second = engine.record_text("FOOD 5 snack").await.unwrap();
    assert_eq!(second.category_total, Money::new(1_500));

    let total = engine
        .sum(EntryType::Expense, Some("Food"), None)
        .await
        .unwrap();
    assert_eq!(total, Money::new(1_500));
}

#[tokio::test]
async fn summary_ranks_categories_by_total() {
    let (engine, _clock) = engine_with_clock(AmountPolicy::Integer).await;

    engine.record_text("Food 10").await.unwrap();
    engine.record_text("Gas 20").await.unwrap();
    engine.record_text("Food 5").await.unwrap();

    let summary = engine
        .period_summary(Period::All, engine.now())
        .await
        .unwrap();
    let ranked: Vec<(&str, Money)> = summary
        .iter()
        .map(|row| (row.label.as_str(), row.total))
        .collect();
    assert_eq!(
        ranked,
        [("Gas", Money::new(2_000)), ("Food", Money::new(1_500))]
    );
    assert_eq!(summary.grand_total, Money::new(3_500));
}

#[tokio::test]
async fn window_excludes_older_entries() {
    let (engine, clock) = engine_with_clock(AmountPolicy::Integer).await;

    clock.set(at(2024, 5, 1, 9, 0));
    engine.record_text("Food 5").await.unwrap();
    clock.set(at(2024, 5, 15, 8, 30));
    engine.record_text("Food 10").await.unwrap();
    clock.set(at(2024, 5, 15, 12, 0));

    let today = engine
        .period_summary(Period::Today, engine.now())
        .await
        .unwrap();
    assert_eq!(today.grand_total, Money::new(1_000));

    let month = engine
        .period_summary(Period::Month, engine.now())
        .await
        .unwrap();
    assert_eq!(month.grand_total, Money::new(1_500));

    let window = Window::new(at(2024, 5, 2, 0, 0), at(2024, 5, 14, 23, 59)).unwrap();
    assert_eq!(
        engine
            .sum(EntryType::Expense, Some("food"), Some(window))
            .await
            .unwrap(),
        Money::ZERO
    );
    assert_eq!(
        engine
            .sum(EntryType::Expense, Some("food"), None)
            .await
            .unwrap(),
        Money::new(1_500)
    );
}

#[tokio::test]
async fn delete_reports_missing_ids() {
    let (engine, _clock) = engine_with_clock(AmountPolicy::Integer).await;

    let id = engine.record_text("Gas 20").await.unwrap().id;
    assert!(engine.delete(id).await.unwrap());
    assert!(!engine.delete(id).await.unwrap());
    assert!(!engine.delete(999).await.unwrap());
    assert_eq!(
        engine.sum(EntryType::Expense, None, None).await.unwrap(),
        Money::ZERO
    );
}

#[tokio::test]
async fn deleted_ids_are_not_reused() {
    let (engine, _clock) = engine_with_clock(AmountPolicy::Integer).await;

    engine.record_text("Food 1").await.unwrap();
    let last = engine.record_text("Food 2").await.unwrap().id;
    assert!(engine.delete(last).await.unwrap());

    let next = engine.record_text("Food 3").await.unwrap().id;
    assert!(next > last);
}

#[tokio::test]
async fn clear_with_reset_restarts_ids() {
    let (engine, _clock) = engine_with_clock(AmountPolicy::Integer).await;

    engine.record_text("Food 1").await.unwrap();
    engine.record_text("Food 2").await.unwrap();
    assert_eq!(engine.clear(true).await.unwrap(), 2);
    assert!(engine.all_entries().await.unwrap().is_empty());

    let id = engine.record_text("Food 3").await.unwrap().id;
    assert_eq!(id, 1);
}

#[tokio::test]
async fn clear_without_reset_keeps_ids_growing() {
    let clock = Arc::new(ManualClock::new(at(2024, 5, 15, 10, 0)));
    let engine = Engine::builder()
        .database(memory_db().await)
        .clear_policy(ClearPolicy::KeepIds)
        .clock(clock)
        .build()
        .await
        .unwrap();

    engine.record_text("Food 1").await.unwrap();
    let last = engine.record_text("Food 2").await.unwrap().id;
    assert_eq!(engine.clear_with_policy().await.unwrap(), 2);

    let id = engine.record_text("Food 3").await.unwrap().id;
    assert!(id > last);
}

#[tokio::test]
async fn revenue_is_kept_apart_from_expenses() {
    let (engine, _clock) = engine_with_clock(AmountPolicy::Decimal).await;

    engine.record_text("Food 12.50").await.unwrap();
    let recorded = engine.record_revenue("1,000 salary").await.unwrap();
    assert_eq!(recorded.entry_type, EntryType::Revenue);
    assert_eq!(recorded.category, REVENUE_CATEGORY);
    assert_eq!(recorded.category_total, Money::new(100_000));

    assert_eq!(engine.revenue_total().await.unwrap(), Money::new(100_000));
    assert_eq!(
        engine.sum(EntryType::Expense, None, None).await.unwrap(),
        Money::new(1_250)
    );

    let summary = engine
        .period_summary(Period::All, engine.now())
        .await
        .unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary.rows[0].category, "food");
}

#[tokio::test]
async fn detail_lists_newest_first() {
    let (engine, clock) = engine_with_clock(AmountPolicy::Integer).await;

    engine.record_text("Food 10 breakfast").await.unwrap();
    clock.advance(TimeDelta::hours(2));
    engine.record_text("food 5 lunch").await.unwrap();
    engine.record_text("Gas 20").await.unwrap();

    let detail = engine.category_detail("FOOD").await.unwrap();
    assert_eq!(detail.label, "Food");
    assert_eq!(detail.total, Money::new(1_500));
    let notes: Vec<&str> = detail.entries.iter().map(|e| e.note.as_str()).collect();
    assert_eq!(notes, ["lunch", "breakfast"]);

    let oldest = engine
        .list(EntryType::Expense, Some("food"), ListOrder::Oldest)
        .await
        .unwrap();
    assert_eq!(oldest[0].note, "breakfast");
}

#[tokio::test]
async fn detail_of_unknown_category_is_not_found() {
    let (engine, _clock) = engine_with_clock(AmountPolicy::Integer).await;

    engine.record_text("Food 10").await.unwrap();
    assert_eq!(
        engine.category_detail("travel").await.unwrap_err(),
        EngineError::NotFound("Travel".to_string())
    );
    assert!(matches!(
        engine.category_detail("  ").await,
        Err(EngineError::MissingArguments(_))
    ));
}

#[tokio::test]
async fn rejected_input_writes_nothing() {
    let (engine, _clock) = engine_with_clock(AmountPolicy::Integer).await;

    assert!(matches!(
        engine.record_text("Food abc").await,
        Err(EngineError::Parse(_))
    ));
    assert!(matches!(
        engine.record_text("Food 12.50").await,
        Err(EngineError::Parse(_))
    ));
    assert!(matches!(
        engine.record_text("Food").await,
        Err(EngineError::MissingArguments(_))
    ));
    assert!(matches!(
        engine.record_revenue("").await,
        Err(EngineError::MissingArguments(_))
    ));
    assert!(engine.all_entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn file_database_runs_in_wal_mode_and_mirrors_csv() {
    let dir = tempfile::tempdir().unwrap();
    let url = engine::sqlite_url(&dir.path().join("ledger.db"));

    let db = engine::connect(&url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    assert_eq!(engine::journal_mode(&db).await.unwrap(), "wal");

    let engine = Engine::builder()
        .database(db)
        .clock(Arc::new(ManualClock::new(at(2024, 5, 15, 10, 0))))
        .build()
        .await
        .unwrap();
    engine.record_text("Food 2500 Lunch").await.unwrap();

    let mirror = dir.path().join("ledger.csv");
    engine.mirror_csv(&mirror).await.unwrap();
    let text = std::fs::read_to_string(&mirror).unwrap();
    assert_eq!(
        text.lines().collect::<Vec<_>>(),
        [
            "id,timestamp,entry_type,category,amount,note",
            "1,2024-05-15 10:00:00,expense,food,2500.00,Lunch",
        ]
    );
}

#[tokio::test]
async fn window_bounds_are_inclusive() {
    let (engine, clock) = engine_with_clock(AmountPolicy::Integer).await;
    let start = at(2024, 5, 10, 0, 0);
    let end = at(2024, 5, 12, 18, 30);

    clock.set(start);
    engine.record_text("Food 2").await.unwrap();
    clock.set(end);
    engine.record_text("Gas 3").await.unwrap();
    clock.set(end + TimeDelta::seconds(1));
    engine.record_text("Food 40").await.unwrap();
    clock.set(start - TimeDelta::seconds(1));
    engine.record_text("Gas 50").await.unwrap();

    let window = Window::new(start, end).unwrap();
    assert_eq!(
        engine
            .sum(EntryType::Expense, None, Some(window))
            .await
            .unwrap(),
        Money::new(500)
    );

    let totals = engine
        .totals_by_category(EntryType::Expense, Some(window))
        .await
        .unwrap();
    let ranked: Vec<(&str, Money)> = totals
        .iter()
        .map(|row| (row.category.as_str(), row.total))
        .collect();
    assert_eq!(ranked, [("gas", Money::new(300)), ("food", Money::new(200))]);
    assert_eq!(totals.grand_total, Money::new(500));
}

#[tokio::test]
async fn entries_that_overflow_a_total_are_rolled_back() {
    let (engine, _clock) = engine_with_clock(AmountPolicy::Integer).await;

    engine
        .record_text("Food 90000000000000000")
        .await
        .unwrap();
    assert!(matches!(
        engine.record_text("Food 90000000000000000").await,
        Err(EngineError::InvalidValue(_))
    ));
    assert!(matches!(
        engine.record_text("Gas 90000000000000000").await,
        Err(EngineError::InvalidValue(_))
    ));
    assert_eq!(engine.all_entries().await.unwrap().len(), 1);

    let summary = engine
        .period_summary(Period::All, engine.now())
        .await
        .unwrap();
    assert_eq!(
        summary.grand_total,
        Money::from_major(90_000_000_000_000_000).unwrap()
    );
    engine.category_detail("food").await.unwrap();
}

#[tokio::test]
async fn overflowing_totals_are_reported_not_wrapped() {
    let (engine, _clock) = engine_with_clock(AmountPolicy::Integer).await;
    let huge = Money::from_major(90_000_000_000_000_000).unwrap();

    engine
        .insert(EntryType::Expense, "food", huge, "")
        .await
        .unwrap();
    engine
        .insert(EntryType::Expense, "gas", huge, "")
        .await
        .unwrap();
    assert!(matches!(
        engine.period_summary(Period::All, engine.now()).await,
        Err(EngineError::InvalidValue(_))
    ));
    assert!(matches!(
        engine.sum(EntryType::Expense, None, None).await,
        Err(EngineError::InvalidValue(_))
    ));

    engine
        .insert(EntryType::Expense, "rent", huge, "")
        .await
        .unwrap();
    engine
        .insert(EntryType::Expense, "rent", huge, "")
        .await
        .unwrap();
    assert!(matches!(
        engine.category_detail("rent").await,
        Err(EngineError::InvalidValue(_))
    ));
}

#[tokio::test]
async fn free_text_categories_fold_non_ascii_capitals() {
    let (engine, _clock) = engine_with_clock(AmountPolicy::Integer).await;

    engine.record_text("Éclair 5").await.unwrap();
    let second = engine.record_text("éclair 3").await.unwrap();
    assert_eq!(second.category, "éclair");
    assert_eq!(second.category_total, Money::new(800));

    let detail = engine.category_detail("ÉCLAIR").await.unwrap();
    assert_eq!(detail.label, "Éclair");
    assert_eq!(detail.entries.len(), 2);

    let summary = engine
        .period_summary(Period::All, engine.now())
        .await
        .unwrap();
    assert_eq!(summary.len(), 1);
}

#[tokio::test]
async fn file_database_clear_vacuums_and_restarts_ids() {
    let dir = tempfile::tempdir().unwrap();
    let url = engine::sqlite_url(&dir.path().join("ledger.db"));

    let db = engine::connect(&url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db)
        .clock(Arc::new(ManualClock::new(at(2024, 5, 15, 10, 0))))
        .build()
        .await
        .unwrap();

    engine.record_text("Food 10").await.unwrap();
    engine.record_text("Gas 20").await.unwrap();
    assert_eq!(engine.clear_with_policy().await.unwrap(), 2);
    assert_eq!(engine::journal_mode(engine.database()).await.unwrap(), "wal");

    assert_eq!(engine.record_text("Food 3").await.unwrap().id, 1);
    assert_eq!(engine.all_entries().await.unwrap().len(), 1);
}
