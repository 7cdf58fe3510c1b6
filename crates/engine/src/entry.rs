//! Ledger entries.
//!
//! A `LedgerEntry` is one recorded financial event. Rows are only ever
//! inserted or deleted, never updated.

use chrono::NaiveDateTime;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine};

/// Category used for every revenue entry.
pub const REVENUE_CATEGORY: &str = "revenue";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Expense,
    Revenue,
}

impl EntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Revenue => "revenue",
        }
    }
}

impl TryFrom<&str> for EntryType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "expense" => Ok(Self::Expense),
            "revenue" => Ok(Self::Revenue),
            other => Err(EngineError::InvalidValue(format!(
                "invalid entry type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub entry_type: EntryType,
    pub category: String,
    pub amount: Money,
    /// Empty when the entry has no note.
    pub note: String,
}

impl TryFrom<Model> for LedgerEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: model.id,
            timestamp: model.recorded_at,
            entry_type: EntryType::try_from(model.entry_type.as_str())?,
            category: model.category,
            amount: Money::new(model.amount_minor),
            note: model.note,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub recorded_at: NaiveDateTime,
    pub entry_type: String,
    pub category: String,
    pub amount_minor: i64,
    pub note: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Values for a row about to be inserted; the id is assigned by the store.
pub(crate) struct NewEntry<'a> {
    pub recorded_at: NaiveDateTime,
    pub entry_type: EntryType,
    pub category: &'a str,
    pub amount: Money,
    pub note: &'a str,
}

impl From<NewEntry<'_>> for ActiveModel {
    fn from(entry: NewEntry<'_>) -> Self {
        Self {
            id: ActiveValue::NotSet,
            recorded_at: ActiveValue::Set(entry.recorded_at),
            entry_type: ActiveValue::Set(entry.entry_type.as_str().to_string()),
            category: ActiveValue::Set(entry.category.to_string()),
            amount_minor: ActiveValue::Set(entry.amount.minor()),
            note: ActiveValue::Set(entry.note.to_string()),
        }
    }
}
