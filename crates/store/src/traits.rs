//! Record store interface

use crate::error::StoreResult;
use crate::selector::Selector;

/// A raw document returned by a query: (key, JSON bytes)
pub type StoredDocument = (String, Vec<u8>);

/// Finite, single-pass sequence of query hits
pub type QueryResults<'a> = Box<dyn Iterator<Item = StoreResult<StoredDocument>> + 'a>;

/// Key/value document store with an equality-selector query
///
/// Each call is atomic on its own. Isolation between concurrent calls on the
/// same key is the backend's responsibility.
pub trait RecordStore: Send + Sync {
    /// Point lookup, `None` when absent
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Insert or overwrite
    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Remove a key. Fails with `StoreError::NotFound` when absent.
    fn delete(&self, key: &str) -> StoreResult<()>;

    /// Documents whose fields equal every selector constraint
    fn query(&self, selector: &Selector) -> StoreResult<QueryResults<'_>>;

    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
