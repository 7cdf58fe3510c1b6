use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AmountPolicy, EngineError, ResultEngine};

const MINOR_PER_MAJOR: i64 = 100;

/// Signed money amount represented as **integer cents**.
///
/// Every amount in the ledger goes through this type, including the ones
/// entered under the integer policy (`2500` is stored as `250_000`).
///
/// # Examples
///
/// ```rust
/// use engine::{AmountPolicy, Money};
///
/// let amount = Money::from_major(2500).unwrap();
/// assert_eq!(amount.minor(), 250_000);
/// assert_eq!(amount.format(AmountPolicy::Integer), "$2,500");
/// assert_eq!(Money::new(123_450).format(AmountPolicy::Decimal), "$1,234.50");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Creates an amount from whole units, failing on overflow.
    pub fn from_major(major: i64) -> ResultEngine<Self> {
        major
            .checked_mul(MINOR_PER_MAJOR)
            .map(Self)
            .ok_or_else(|| EngineError::InvalidValue("amount too large".to_string()))
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns the amount in whole units, rounding half away from zero.
    #[must_use]
    pub const fn rounded_major(self) -> i64 {
        let abs = self.0.unsigned_abs();
        let whole = (abs + (MINOR_PER_MAJOR as u64) / 2) / MINOR_PER_MAJOR as u64;
        if self.0 < 0 {
            -(whole as i64)
        } else {
            whole as i64
        }
    }

    /// Returns the amount as a float in major units. Only for charts.
    #[must_use]
    pub fn as_major_f64(self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Adds up `amounts`, returning `None` as soon as the running total
    /// overflows.
    #[must_use]
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, Money::checked_add)
    }

    /// Renders the amount for a deployment.
    ///
    /// Integer deployments show whole units (`$2,500`), decimal deployments
    /// show cents (`$2,500.00`). Both use `,` as thousands separator.
    #[must_use]
    pub fn format(self, policy: AmountPolicy) -> String {
        match policy {
            AmountPolicy::Integer => {
                let major = self.rounded_major();
                let sign = if major < 0 { "-" } else { "" };
                format!("{sign}${}", group_thousands(major.unsigned_abs()))
            }
            AmountPolicy::Decimal => {
                let sign = if self.0 < 0 { "-" } else { "" };
                let abs = self.0.unsigned_abs();
                let major = abs / MINOR_PER_MAJOR as u64;
                let cents = abs % MINOR_PER_MAJOR as u64;
                format!("{sign}${}.{cents:02}", group_thousands(major))
            }
        }
    }

    /// Plain major-unit rendering without symbol or grouping (`-12.5` →
    /// `-12.50`), used by exports.
    #[must_use]
    pub fn to_plain_string(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!(
            "{sign}{}.{:02}",
            abs / MINOR_PER_MAJOR as u64,
            abs % MINOR_PER_MAJOR as u64
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(AmountPolicy::Decimal))
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}
