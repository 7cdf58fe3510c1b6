//! The module contains the errors the engine can return.
//!
//! The errors are split in two families:
//!
//! - user errors ([`Parse`], [`MissingArguments`], [`NotFound`],
//!   [`InvalidValue`]) carry a message that can be shown as-is;
//! - store errors ([`Database`], [`Io`], [`Csv`]) must be logged and replaced
//!   by a generic notice.
//!
//!  [`Parse`]: EngineError::Parse
//!  [`MissingArguments`]: EngineError::MissingArguments
//!  [`NotFound`]: EngineError::NotFound
//!  [`InvalidValue`]: EngineError::InvalidValue
//!  [`Database`]: EngineError::Database
//!  [`Io`]: EngineError::Io
//!  [`Csv`]: EngineError::Csv
use sea_orm::DbErr;
use thiserror::Error;

/// Errors produced while turning a raw token into an amount.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("amount is empty")]
    Empty,
    #[error("amount must be a whole number")]
    NotAnInteger,
    #[error("amount must be a number")]
    NotANumber,
    #[error("amount has more than two decimals")]
    TooManyDecimals,
    #[error("amount is too large")]
    OutOfRange,
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("missing arguments: {0}")]
    MissingArguments(String),
    #[error("\"{0}\" not found")]
    NotFound(String),
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Returns `true` when the error is caused by the caller input and its
    /// message is safe to show to the user.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Parse(_) | Self::MissingArguments(_) | Self::NotFound(_) | Self::InvalidValue(_)
        )
    }

    pub(crate) fn total_too_large() -> Self {
        Self::InvalidValue("total is too large".to_string())
    }

    /// SQLite aborts a `SUM` that leaves the 64-bit range with an
    /// "integer overflow" error instead of wrapping.
    pub(crate) fn from_sum(err: DbErr) -> Self {
        if err.to_string().contains("integer overflow") {
            Self::total_too_large()
        } else {
            Self::Database(err)
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Parse(a), Self::Parse(b)) => a == b,
            (Self::MissingArguments(a), Self::MissingArguments(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::InvalidValue(a), Self::InvalidValue(b)) => a == b,
            (Self::Csv(a), Self::Csv(b)) => a.to_string() == b.to_string(),
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
