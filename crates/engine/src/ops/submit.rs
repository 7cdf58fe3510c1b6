//! Entry points used by the chat router.
//!
//! These calls return typed values only; wording and markup belong to the
//! router.

use chrono::NaiveDateTime;
use sea_orm::TransactionTrait;
use serde::Serialize;

use crate::{
    EngineError, EntryType, LedgerEntry, Money, Period, REVENUE_CATEGORY, ResultEngine,
    parse_amount,
    util::{category_key, split_amount_args, split_entry_text, title_case},
};

use super::{CategoryTotals, Engine, ListOrder, with_tx};

/// Outcome of a successful submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Recorded {
    pub id: i64,
    pub entry_type: EntryType,
    pub category: String,
    pub label: String,
    pub amount: Money,
    /// All-time total of the entry's category after the insert.
    pub category_total: Money,
}

/// All-time view of one expense category, newest entries first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryDetail {
    pub category: String,
    pub label: String,
    pub total: Money,
    pub entries: Vec<LedgerEntry>,
}

impl Engine {
    /// Records a free-text expense line: `<category> <amount> [note]`.
    ///
    /// The category is stored lower-cased. On failure nothing is written.
    pub async fn record_text(&self, raw: &str) -> ResultEngine<Recorded> {
        let (category, amount, note) = split_entry_text(raw)?;
        let amount = parse_amount(amount, self.amount_policy)?;
        let category = category_key(category);

        let (id, category_total) = self
            .record(EntryType::Expense, &category, amount, note)
            .await?;

        Ok(Recorded {
            id,
            entry_type: EntryType::Expense,
            label: title_case(&category),
            category,
            amount,
            category_total,
        })
    }

    /// Records a revenue from `<amount> [note]` arguments.
    pub async fn record_revenue(&self, args: &str) -> ResultEngine<Recorded> {
        let (amount, note) = split_amount_args(args)?;
        let amount = parse_amount(amount, self.amount_policy)?;

        let (id, category_total) = self
            .record(EntryType::Revenue, REVENUE_CATEGORY, amount, note)
            .await?;

        Ok(Recorded {
            id,
            entry_type: EntryType::Revenue,
            category: REVENUE_CATEGORY.to_string(),
            label: title_case(REVENUE_CATEGORY),
            amount,
            category_total,
        })
    }

    /// Inserts the entry and reads its category total in one transaction.
    ///
    /// The insert is rolled back when the category total or the all-time
    /// total of `entry_type` would no longer fit in 64 bits, so every stored
    /// entry can still be summarized.
    async fn record(
        &self,
        entry_type: EntryType,
        category: &str,
        amount: Money,
        note: &str,
    ) -> ResultEngine<(i64, Money)> {
        let (id, category_total) = with_tx!(self, |db_tx| {
            let id = self
                .insert_with(&db_tx, entry_type, category, amount, note)
                .await?;
            let category_total = self
                .sum_with(&db_tx, entry_type, Some(category), None)
                .await?;
            self.sum_with(&db_tx, entry_type, None, None).await?;
            Ok::<_, EngineError>((id, category_total))
        })?;

        tracing::info!(
            "recorded {} #{id} in {category}: {}",
            entry_type.as_str(),
            amount.minor()
        );
        Ok((id, category_total))
    }

    /// All-time revenue, kept apart from expense totals.
    pub async fn revenue_total(&self) -> ResultEngine<Money> {
        self.sum(EntryType::Revenue, None, None).await
    }

    /// Expense totals per category for a named period ending at `now`.
    pub async fn period_summary(
        &self,
        period: Period,
        now: NaiveDateTime,
    ) -> ResultEngine<CategoryTotals> {
        self.totals_by_category(EntryType::Expense, period.window(now))
            .await
    }

    /// Total and entries of one expense category.
    ///
    /// Returns [`EngineError::NotFound`] when the category has no entries.
    pub async fn category_detail(&self, category: &str) -> ResultEngine<CategoryDetail> {
        let key = category_key(category);
        if key.is_empty() {
            return Err(EngineError::MissingArguments(
                "please enter a category".to_string(),
            ));
        }

        let entries = self
            .list(EntryType::Expense, Some(&key), ListOrder::Newest)
            .await?;
        if entries.is_empty() {
            return Err(EngineError::NotFound(title_case(&key)));
        }

        Ok(CategoryDetail {
            label: title_case(&key),
            total: Money::checked_sum(entries.iter().map(|e| e.amount))
                .ok_or_else(EngineError::total_too_large)?,
            category: key,
            entries,
        })
    }
}
