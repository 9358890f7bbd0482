//! Application context - wires config, store and caller together

use std::path::Path;

use anyhow::Context;
use trafficledger_contract::TrafficContract;
use trafficledger_core::{Caller, IdentityResolver};
use trafficledger_store::{MemoryStore, RecordStore, SqliteStore};

use crate::config::{Backend, LedgerConfig};

/// One CLI invocation: an open store and the caller sampled for it
pub struct AppContext {
    store: Box<dyn RecordStore>,
    caller: Caller,
}

impl AppContext {
    /// Open the configured store and resolve the caller
    pub fn open(config: &LedgerConfig, identity: &dyn IdentityResolver) -> anyhow::Result<Self> {
        let caller = Caller::resolve(identity)?;

        let store: Box<dyn RecordStore> = match config.backend {
            Backend::Sqlite => {
                let path = config.database_path();
                let store = SqliteStore::new(&path)
                    .with_context(|| format!("opening ledger database {}", path.display()))?;
                Box::new(store)
            }
            Backend::Memory => Box::new(MemoryStore::new()),
        };

        tracing::debug!(caller = caller.id(), backend = ?config.backend, "context opened");
        Ok(Self { store, caller })
    }

    /// Context over an already-open store
    pub fn with_store(store: Box<dyn RecordStore>, caller: Caller) -> Self {
        Self { store, caller }
    }

    /// Convenience for tests and scripts: SQLite under `data_dir`
    pub fn sqlite(data_dir: impl AsRef<Path>, caller: Caller) -> anyhow::Result<Self> {
        let path = data_dir.as_ref().join("ledger.db");
        let store = SqliteStore::new(&path)
            .with_context(|| format!("opening ledger database {}", path.display()))?;
        Ok(Self::with_store(Box::new(store), caller))
    }

    pub fn caller(&self) -> &Caller {
        &self.caller
    }

    pub fn contract(&self) -> TrafficContract<'_> {
        TrafficContract::new(self.store.as_ref())
    }

    /// Same store, different caller
    pub fn switch_caller(&mut self, caller: Caller) {
        self.caller = caller;
    }
}
