//! # TrafficLedger Store
//!
//! The persistence collaborator the ledger logic runs against.
//!
//! ## Scope
//! - `RecordStore`: get / put / delete by key, plus equality-selector query
//! - `Selector`: structured filter; never assembled from strings
//! - `MemoryStore`: `BTreeMap` backend for tests and scratch use
//! - `SqliteStore`: single-table JSON document backend
//!
//! Ordering of query results is unspecified.

mod error;
mod memory;
mod selector;
mod sqlite;
mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use selector::{Selector, SelectorField};
pub use sqlite::SqliteStore;
pub use traits::{QueryResults, RecordStore, StoredDocument};
