//! Query routing
//!
//! Turns a record type (and optionally an owner) into a `Selector`, runs it
//! against the store and decodes hits lazily. A hit that fails to decode ends
//! up as an `Err` item; it is never skipped.

use std::marker::PhantomData;

use trafficledger_core::Document;
use trafficledger_store::{QueryResults, Selector};

use crate::error::{ContractError, ContractResult};

/// Selector for every document of type `T`, optionally owned by `owner`
pub fn scoped_selector<T: Document>(owner: Option<&str>) -> Selector {
    let selector = Selector::object_type(T::OBJECT_TYPE);
    match owner {
        Some(driver_id) => selector.owned_by(driver_id),
        None => selector,
    }
}

/// Single-pass iterator of decoded query results
pub struct RecordIter<'s, T> {
    hits: QueryResults<'s>,
    _record: PhantomData<T>,
}

impl<'s, T: Document> RecordIter<'s, T> {
    pub(crate) fn new(hits: QueryResults<'s>) -> Self {
        Self {
            hits,
            _record: PhantomData,
        }
    }

    /// Drain into a vector, stopping at the first failure
    pub fn collect_all(self) -> ContractResult<Vec<T>> {
        self.collect()
    }
}

impl<T: Document> Iterator for RecordIter<'_, T> {
    type Item = ContractResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let hit = self.hits.next()?;
        Some(match hit {
            Ok((key, bytes)) => serde_json::from_slice::<T>(&bytes).map_err(|err| {
                tracing::error!(record_id = %key, error = %err, "stored record failed to decode");
                ContractError::decode_failure(key)
            }),
            Err(cause) => Err(ContractError::StoreFailure { cause }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trafficledger_core::{Appeal, ObjectType, Violation};
    use trafficledger_store::{MemoryStore, RecordStore, StoreError};

    #[test]
    fn test_scoped_selectors() {
        let all = scoped_selector::<Violation>(None);
        assert_eq!(all, Selector::object_type(ObjectType::Violation));

        let own = scoped_selector::<Appeal>(Some("D1"));
        assert_eq!(own, Selector::object_type(ObjectType::Appeal).owned_by("D1"));
    }

    #[test]
    fn test_decode_failure_is_surfaced() {
        let store = MemoryStore::new();
        store
            .put("V-bad", br#"{"objectType":"violation","driverID":"D1"}"#)
            .unwrap();

        let hits = store.query(&scoped_selector::<Violation>(None)).unwrap();
        let mut iter = RecordIter::<Violation>::new(hits);

        match iter.next() {
            Some(Err(ContractError::DecodeFailure { record_id })) => assert_eq!(record_id, "V-bad"),
            other => panic!("expected decode failure, got {:?}", other.map(|r| r.is_ok())),
        }
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_store_error_items_propagate() {
        let hits: QueryResults<'static> =
            Box::new(std::iter::once(Err(StoreError::NotFound("gone".to_string()))));
        let result = RecordIter::<Violation>::new(hits).collect_all();
        assert!(matches!(result, Err(ContractError::StoreFailure { .. })));
    }
}
