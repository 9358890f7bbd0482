//! In-memory record store

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::selector::Selector;
use crate::traits::{QueryResults, RecordStore, StoredDocument};

/// `BTreeMap`-backed store
///
/// Queries take a snapshot of matching documents, so later writes never
/// show up in a sequence already handed out.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> StoreResult<usize> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        records.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        records
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn query(&self, selector: &Selector) -> StoreResult<QueryResults<'_>> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;

        // Bytes that are not JSON cannot satisfy an equality constraint.
        let hits: Vec<StoredDocument> = records
            .iter()
            .filter(|(_, bytes)| {
                serde_json::from_slice::<Value>(bytes)
                    .map(|doc| selector.matches(&doc))
                    .unwrap_or(false)
            })
            .map(|(key, bytes)| (key.clone(), bytes.clone()))
            .collect();

        tracing::trace!(query = %selector.to_query_string(), hits = hits.len(), "memory query");
        Ok(Box::new(hits.into_iter().map(Ok)))
    }
}
