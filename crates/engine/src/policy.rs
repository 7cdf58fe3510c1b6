//! Deployment policies.
//!
//! A deployment picks one [`AmountPolicy`] and one [`ClearPolicy`]; the
//! engine never branches on anything else to decide how strict parsing is or
//! what a full clear does.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// How strictly amount tokens are parsed and how amounts are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountPolicy {
    /// Whole units only (`2500`, `$2,500`).
    #[default]
    #[serde(alias = "integer_only")]
    Integer,
    /// Up to two fractional digits (`12.50`, `1,234.5`).
    Decimal,
}

impl AmountPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Decimal => "decimal",
        }
    }
}

impl FromStr for AmountPolicy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integer" | "integer_only" | "integer-only" => Ok(Self::Integer),
            "decimal" => Ok(Self::Decimal),
            other => Err(EngineError::InvalidValue(format!(
                "unknown amount policy: {other}"
            ))),
        }
    }
}

/// What a full clear does to the identity sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearPolicy {
    /// Reset the sequence so the next entry gets id 1, and reclaim space.
    #[default]
    ResetIds,
    /// Only remove rows; ids keep growing.
    KeepIds,
}

impl ClearPolicy {
    #[must_use]
    pub fn resets_ids(self) -> bool {
        matches!(self, Self::ResetIds)
    }
}

impl FromStr for ClearPolicy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset_ids" | "reset-ids" => Ok(Self::ResetIds),
            "keep_ids" | "keep-ids" => Ok(Self::KeepIds),
            other => Err(EngineError::InvalidValue(format!(
                "unknown clear policy: {other}"
            ))),
        }
    }
}
