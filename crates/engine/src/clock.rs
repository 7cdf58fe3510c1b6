//! Source of "now" for the ledger.
//!
//! Entry timestamps are local wall-clock times in the deployment timezone,
//! truncated to whole seconds.

use std::{fmt::Debug, sync::Mutex};

use chrono::{NaiveDateTime, SubsecRound, TimeDelta, Utc};
use chrono_tz::Tz;

pub trait Clock: Debug + Send + Sync {
    /// Current local time, second precision.
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in a fixed IANA timezone.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    timezone: Tz,
}

impl SystemClock {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now()
            .with_timezone(&self.timezone)
            .naive_local()
            .trunc_subsecs(0)
    }
}

/// Clock that only moves when told to. Used by tests and tooling that need
/// reproducible timestamps.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now.trunc_subsecs(0)),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now.trunc_subsecs(0);
        }
    }

    pub fn advance(&self, by: TimeDelta) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
