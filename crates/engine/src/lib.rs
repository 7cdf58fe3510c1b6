//! Core of the conversational ledger: amount parsing, the durable entry store
//! and the aggregations the chat router renders.

pub use amount::parse_amount;
pub use clock::{Clock, ManualClock, SystemClock};
pub use database::{connect, journal_mode, sqlite_url};
pub use entry::{EntryType, LedgerEntry, REVENUE_CATEGORY};
pub use error::{EngineError, ParseError};
pub use export::write_csv;
pub use money::Money;
pub use ops::{
    CategoryDetail, CategoryTotal, CategoryTotals, Engine, EngineBuilder, ListOrder, Recorded,
};
pub use period::{Period, Window};
pub use policy::{AmountPolicy, ClearPolicy};
pub use util::title_case;

mod amount;
mod clock;
mod database;
pub mod entry;
mod error;
mod export;
mod money;
mod ops;
mod period;
mod policy;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
