use sea_orm::{ConnectionTrait, FromQueryResult, Statement, Value};
use serde::Serialize;

use crate::{EngineError, EntryType, Money, ResultEngine, Window, util::title_case};

use super::{Engine, entries::push_filters};

/// One category line of an aggregation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    /// Lower-cased grouping key.
    pub category: String,
    /// Display label (stored form, title-cased).
    pub label: String,
    pub total: Money,
}

/// Ranked per-category sums and their grand total.
///
/// `grand_total` is always the sum of the listed rows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CategoryTotals {
    pub rows: Vec<CategoryTotal>,
    pub grand_total: Money,
}

impl CategoryTotals {
    /// Ranks rows by total descending; equal totals by category ascending.
    ///
    /// Fails with [`EngineError::InvalidValue`] when the grand total does not
    /// fit in 64 bits.
    pub fn ranked(mut rows: Vec<CategoryTotal>) -> ResultEngine<Self> {
        rows.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.cmp(&b.category))
        });
        let grand_total = Money::checked_sum(rows.iter().map(|row| row.total))
            .ok_or_else(EngineError::total_too_large)?;
        Ok(Self { rows, grand_total })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.rows.iter()
    }
}

#[derive(Debug, FromQueryResult)]
struct CategorySumRow {
    category_key: String,
    label: String,
    sum: i64,
}

impl Engine {
    /// Per-category sums of `entry_type` entries inside `window` (all time
    /// when `None`), ranked by sum descending.
    pub async fn totals_by_category(
        &self,
        entry_type: EntryType,
        window: Option<Window>,
    ) -> ResultEngine<CategoryTotals> {
        let backend = self.database.get_database_backend();
        let mut sql = String::from(
            "SELECT LOWER(category) AS category_key, MIN(category) AS label, \
             SUM(amount_minor) AS sum \
             FROM entries WHERE entry_type = ?",
        );
        let mut values: Vec<Value> = vec![entry_type.as_str().into()];
        push_filters(&mut sql, &mut values, None, window);
        sql.push_str(" GROUP BY LOWER(category)");

        let rows = CategorySumRow::find_by_statement(Statement::from_sql_and_values(
            backend, sql, values,
        ))
        .all(&self.database)
        .await
        .map_err(EngineError::from_sum)?;

        CategoryTotals::ranked(
            rows.into_iter()
                .map(|row| CategoryTotal {
                    category: row.category_key,
                    label: title_case(&row.label),
                    total: Money::new(row.sum),
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, total: i64) -> CategoryTotal {
        CategoryTotal {
            category: category.to_string(),
            label: title_case(category),
            total: Money::new(total),
        }
    }

    #[test]
    fn ranks_by_total_then_name() {
        let totals = CategoryTotals::ranked(vec![
            row("food", 1_500),
            row("rent", 2_000),
            row("bills", 1_500),
            row("gas", 2_000),
        ])
        .unwrap();
        let order: Vec<&str> = totals.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(order, ["gas", "rent", "bills", "food"]);
        assert_eq!(totals.grand_total, Money::new(7_000));
    }

    #[test]
    fn empty_totals_sum_to_zero() {
        let totals = CategoryTotals::ranked(Vec::new()).unwrap();
        assert!(totals.is_empty());
        assert_eq!(totals.grand_total, Money::ZERO);
    }

    #[test]
    fn overflowing_grand_total_is_rejected() {
        let result = CategoryTotals::ranked(vec![
            row("food", i64::MAX - 10),
            row("gas", 20),
        ]);
        assert_eq!(result, Err(EngineError::total_too_large()));
    }
}
