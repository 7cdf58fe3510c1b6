use std::sync::Arc;

use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;

use crate::{AmountPolicy, ClearPolicy, Clock, ResultEngine, SystemClock};

mod entries;
mod submit;
mod totals;

pub use entries::ListOrder;
pub use submit::{CategoryDetail, Recorded};
pub use totals::{CategoryTotal, CategoryTotals};

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// The ledger core: parsing policy, the entry store and the aggregations on
/// top of it.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    amount_policy: AmountPolicy,
    clear_policy: ClearPolicy,
    clock: Arc<dyn Clock>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn amount_policy(&self) -> AmountPolicy {
        self.amount_policy
    }

    pub fn clear_policy(&self) -> ClearPolicy {
        self.clear_policy
    }

    /// Current local time according to the engine clock.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn database(&self) -> &DatabaseConnection {
        &self.database
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    amount_policy: AmountPolicy,
    clear_policy: ClearPolicy,
    clock: Option<Arc<dyn Clock>>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    pub fn amount_policy(mut self, policy: AmountPolicy) -> EngineBuilder {
        self.amount_policy = policy;
        self
    }

    pub fn clear_policy(mut self, policy: ClearPolicy) -> EngineBuilder {
        self.clear_policy = policy;
        self
    }

    /// Clock used for entry timestamps. Defaults to the UTC wall clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> EngineBuilder {
        self.clock = Some(clock);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        let engine = Engine {
            database: self.database,
            amount_policy: self.amount_policy,
            clear_policy: self.clear_policy,
            clock: self
                .clock
                .unwrap_or_else(|| Arc::new(SystemClock::default())),
        };
        tracing::info!(
            "ledger engine ready (amounts: {}, clear resets ids: {})",
            engine.amount_policy.as_str(),
            engine.clear_policy.resets_ids()
        );
        Ok(engine)
    }
}
