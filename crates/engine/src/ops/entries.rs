use sea_orm::{
    ConnectionTrait, QueryFilter, QueryOrder, Statement, TransactionTrait, Value, prelude::*,
    sea_query::Expr,
};

use crate::{
    EngineError, EntryType, LedgerEntry, Money, ResultEngine, Window,
    entry::{self, NewEntry},
};

use super::{Engine, with_tx};

/// Ordering of [`Engine::list`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListOrder {
    /// Insertion order, oldest first (ledger views).
    Oldest,
    /// Most recent first, ties broken by id descending (drill-down views).
    Newest,
}

impl Engine {
    /// Inserts a new entry stamped with the engine clock and returns its id.
    pub async fn insert(
        &self,
        entry_type: EntryType,
        category: &str,
        amount: Money,
        note: &str,
    ) -> ResultEngine<i64> {
        let id = self
            .insert_with(&self.database, entry_type, category, amount, note)
            .await?;
        tracing::info!(
            "recorded {} #{id} in {}: {}",
            entry_type.as_str(),
            category.trim(),
            amount.minor()
        );
        Ok(id)
    }

    pub(super) async fn insert_with<C: ConnectionTrait>(
        &self,
        db: &C,
        entry_type: EntryType,
        category: &str,
        amount: Money,
        note: &str,
    ) -> ResultEngine<i64> {
        let category = category.trim();
        if category.is_empty() {
            return Err(EngineError::InvalidValue(
                "category must not be empty".to_string(),
            ));
        }

        let model = entry::ActiveModel::from(NewEntry {
            recorded_at: self.clock.now(),
            entry_type,
            category,
            amount,
            note: note.trim(),
        })
        .insert(db)
        .await?;
        Ok(model.id)
    }

    /// Deletes one entry. Returns `false` when no entry had that id.
    pub async fn delete(&self, id: i64) -> ResultEngine<bool> {
        let result = entry::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        let found = result.rows_affected > 0;
        if found {
            tracing::info!("deleted entry #{id}");
        } else {
            tracing::debug!("delete of missing entry #{id}");
        }
        Ok(found)
    }

    /// Removes every entry and returns how many were removed.
    ///
    /// With `reset_ids` the identity sequence restarts at 1 and the file is
    /// vacuumed afterwards.
    pub async fn clear(&self, reset_ids: bool) -> ResultEngine<u64> {
        let removed = self.delete_all(reset_ids).await?;
        if reset_ids {
            self.database.execute_unprepared("VACUUM;").await?;
        }
        tracing::info!("cleared {removed} entries (ids reset: {reset_ids})");
        Ok(removed)
    }

    /// Clears using the configured [`ClearPolicy`](crate::ClearPolicy).
    pub async fn clear_with_policy(&self) -> ResultEngine<u64> {
        self.clear(self.clear_policy.resets_ids()).await
    }

    async fn delete_all(&self, reset_ids: bool) -> ResultEngine<u64> {
        with_tx!(self, |db_tx| {
            let result = entry::Entity::delete_many().exec(&db_tx).await?;
            if reset_ids {
                let backend = self.database.get_database_backend();
                db_tx
                    .execute(Statement::from_sql_and_values(
                        backend,
                        "DELETE FROM sqlite_sequence WHERE name = ?;",
                        vec![entry::Entity.table_name().into()],
                    ))
                    .await?;
            }
            Ok(result.rows_affected)
        })
    }

    /// Sums `entry_type` amounts, optionally for one category
    /// (case-insensitive) and inside an inclusive window. Never fails on an
    /// empty match: the result is zero. A total outside the 64-bit range is
    /// reported as [`EngineError::InvalidValue`].
    pub async fn sum(
        &self,
        entry_type: EntryType,
        category: Option<&str>,
        window: Option<Window>,
    ) -> ResultEngine<Money> {
        self.sum_with(&self.database, entry_type, category, window)
            .await
    }

    pub(super) async fn sum_with<C: ConnectionTrait>(
        &self,
        db: &C,
        entry_type: EntryType,
        category: Option<&str>,
        window: Option<Window>,
    ) -> ResultEngine<Money> {
        let backend = db.get_database_backend();
        let mut sql =
            String::from("SELECT COALESCE(SUM(amount_minor), 0) AS sum FROM entries WHERE entry_type = ?");
        let mut values: Vec<Value> = vec![entry_type.as_str().into()];
        push_filters(&mut sql, &mut values, category, window);

        let row = db
            .query_one(Statement::from_sql_and_values(backend, sql, values))
            .await
            .map_err(EngineError::from_sum)?;
        Ok(Money::new(
            row.and_then(|r| r.try_get("", "sum").ok()).unwrap_or(0),
        ))
    }

    /// Lists `entry_type` entries, optionally for one category.
    pub async fn list(
        &self,
        entry_type: EntryType,
        category: Option<&str>,
        order: ListOrder,
    ) -> ResultEngine<Vec<LedgerEntry>> {
        let mut query =
            entry::Entity::find().filter(entry::Column::EntryType.eq(entry_type.as_str()));
        if let Some(category) = category {
            query = query.filter(Expr::cust_with_values(
                "LOWER(category) = LOWER(?)",
                [category.trim()],
            ));
        }
        query = match order {
            ListOrder::Oldest => query.order_by_asc(entry::Column::Id),
            ListOrder::Newest => query
                .order_by_desc(entry::Column::RecordedAt)
                .order_by_desc(entry::Column::Id),
        };

        query
            .all(&self.database)
            .await?
            .into_iter()
            .map(LedgerEntry::try_from)
            .collect()
    }

    /// Every entry of any type, oldest first.
    pub async fn all_entries(&self) -> ResultEngine<Vec<LedgerEntry>> {
        entry::Entity::find()
            .order_by_asc(entry::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(LedgerEntry::try_from)
            .collect()
    }
}

/// Appends the optional category and window conditions to a
/// `... WHERE entry_type = ?` statement.
///
/// Category matching relies on SQLite `LOWER()`, which folds ASCII letters
/// only. Free-text entries are lower-cased before they reach the store, so
/// non-ASCII capitals only stay apart when stored through [`Engine::insert`]
/// directly.
pub(super) fn push_filters(
    sql: &mut String,
    values: &mut Vec<Value>,
    category: Option<&str>,
    window: Option<Window>,
) {
    if let Some(category) = category {
        sql.push_str(" AND LOWER(category) = LOWER(?)");
        values.push(category.trim().into());
    }
    if let Some(window) = window {
        sql.push_str(" AND recorded_at BETWEEN ? AND ?");
        values.push(window.start.into());
        values.push(window.end.into());
    }
}
