//! Contract surface and shared plumbing

use trafficledger_core::{peek_object_type, Caller, Document, ObjectType};
use trafficledger_policy::{authorize, Operation, Target};
use trafficledger_store::RecordStore;

use crate::error::{ContractError, ContractResult};
use crate::query::{scoped_selector, RecordIter};

/// Reply to `get_client_role` when the identity has no role attribute
pub const ROLE_NOT_FOUND: &str = "role not found";

/// What a key holds, as seen by an operation expecting a `T`
pub(crate) enum Slot<T> {
    Empty,
    Holds(T),
    /// A record of another kind (its `objectType`)
    Foreign(String),
}

/// Traffic violation ledger operations
///
/// Holds no state of its own beyond the store handle; every call is an
/// independent transaction against the store.
pub struct TrafficContract<'s> {
    store: &'s dyn RecordStore,
}

impl<'s> TrafficContract<'s> {
    pub fn new(store: &'s dyn RecordStore) -> Self {
        Self { store }
    }

    pub(crate) fn store(&self) -> &'s dyn RecordStore {
        self.store
    }

    /// Caller's identity as the ledger sees it
    pub fn get_client_id(&self, caller: &Caller) -> ContractResult<String> {
        self.check(Operation::GetClientId, caller, Target::Unscoped)?;
        Ok(caller.id().to_string())
    }

    /// Caller's role attribute, or `"role not found"`
    pub fn get_client_role(&self, caller: &Caller) -> ContractResult<String> {
        self.check(Operation::GetClientRole, caller, Target::Unscoped)?;
        Ok(caller
            .role()
            .map(|role| role.as_str().to_string())
            .unwrap_or_else(|| ROLE_NOT_FOUND.to_string()))
    }

    /// Every record of type `T`, optionally only those owned by `owner`
    ///
    /// No access check: callers gate this through a specific operation.
    pub fn query_by_type<T: Document>(&self, owner: Option<&str>) -> ContractResult<RecordIter<'s, T>> {
        let selector = scoped_selector::<T>(owner);
        tracing::debug!(query = %selector.to_query_string(), "query by type");
        let store = self.store;
        let hits = store.query(&selector)?;
        Ok(RecordIter::new(hits))
    }

    pub(crate) fn check(&self, operation: Operation, caller: &Caller, target: Target<'_>) -> ContractResult<()> {
        authorize(operation, caller, target)
            .into_result()
            .map_err(|denial| {
                tracing::warn!(
                    operation = %operation,
                    caller = caller.id(),
                    kind = ?denial.kind,
                    "access denied"
                );
                ContractError::AccessDenied { reason: denial }
            })
    }

    /// Read `key` and decode it if it holds a `T`
    pub(crate) fn load<T: Document>(&self, key: &str) -> ContractResult<Slot<T>> {
        let Some(bytes) = self.store.get(key)? else {
            return Ok(Slot::Empty);
        };

        let kind = stored_kind(key, &bytes)?;
        if kind != T::OBJECT_TYPE.as_str() {
            return Ok(Slot::Foreign(kind));
        }

        let record = serde_json::from_slice::<T>(&bytes).map_err(|err| {
            tracing::error!(record_id = key, error = %err, "stored record failed to decode");
            ContractError::decode_failure(key)
        })?;
        Ok(Slot::Holds(record))
    }

    /// Like `load`, but anything other than a `T` is `NotFound`
    pub(crate) fn load_existing<T: Document>(&self, key: &str) -> ContractResult<T> {
        match self.load::<T>(key)? {
            Slot::Holds(record) => Ok(record),
            Slot::Empty | Slot::Foreign(_) => Err(ContractError::not_found(key)),
        }
    }

    /// `NotFound` unless `key` holds a document tagged as a `T`
    ///
    /// Reads only the discriminator, so a damaged record can still be removed.
    pub(crate) fn require_kind<T: Document>(&self, key: &str) -> ContractResult<()> {
        let Some(bytes) = self.store.get(key)? else {
            return Err(ContractError::not_found(key));
        };
        if stored_kind(key, &bytes)? != T::OBJECT_TYPE.as_str() {
            return Err(ContractError::not_found(key));
        }
        Ok(())
    }

    pub(crate) fn ensure_absent(&self, key: &str) -> ContractResult<()> {
        if self.store.contains(key)? {
            return Err(ContractError::already_exists(key));
        }
        Ok(())
    }

    pub(crate) fn save<T: Document>(&self, record: &T) -> ContractResult<()> {
        let bytes = serde_json::to_vec(record)?;
        self.store.put(record.record_id(), &bytes)?;
        Ok(())
    }
}

/// `objectType` of a stored document; untagged documents are users
fn stored_kind(key: &str, bytes: &[u8]) -> ContractResult<String> {
    let object_type = peek_object_type(bytes).map_err(|_| ContractError::decode_failure(key))?;
    Ok(object_type.unwrap_or_else(|| ObjectType::User.as_str().to_string()))
}

pub(crate) fn require_id(field: &str, value: &str) -> ContractResult<()> {
    if value.is_empty() {
        return Err(ContractError::InvalidArgument(format!("{} cannot be empty", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trafficledger_core::{User, Violation};
    use trafficledger_store::MemoryStore;

    #[test]
    fn test_client_introspection() {
        let store = MemoryStore::new();
        let contract = TrafficContract::new(&store);

        let admin = Caller::with_role("A1", "admin");
        assert_eq!(contract.get_client_id(&admin).unwrap(), "A1");
        assert_eq!(contract.get_client_role(&admin).unwrap(), "admin");

        let anonymous = Caller::without_role("X1");
        assert_eq!(contract.get_client_role(&anonymous).unwrap(), ROLE_NOT_FOUND);
    }

    #[test]
    fn test_load_distinguishes_kinds() {
        let store = MemoryStore::new();
        store.put("U1", br#"{"userID":"U1","role":"driver"}"#).unwrap();
        store.put("junk", b"%%%").unwrap();
        let contract = TrafficContract::new(&store);

        assert!(matches!(contract.load::<User>("U1").unwrap(), Slot::Holds(_)));
        assert!(matches!(contract.load::<Violation>("U1").unwrap(), Slot::Foreign(kind) if kind == "user"));
        assert!(matches!(contract.load::<Violation>("none").unwrap(), Slot::Empty));
        assert!(matches!(
            contract.load::<Violation>("junk"),
            Err(ContractError::DecodeFailure { record_id }) if record_id == "junk"
        ));
    }

    #[test]
    fn test_require_kind_ignores_body() {
        let store = MemoryStore::new();
        store.put("V1", br#"{"objectType":"violation"}"#).unwrap();
        store.put("U1", br#"{"userID":"U1","role":"driver"}"#).unwrap();
        let contract = TrafficContract::new(&store);

        assert!(contract.require_kind::<Violation>("V1").is_ok());
        assert!(matches!(
            contract.require_kind::<Violation>("U1"),
            Err(ContractError::NotFound { record_id }) if record_id == "U1"
        ));
        assert!(matches!(
            contract.require_kind::<Violation>("V404"),
            Err(ContractError::NotFound { .. })
        ));
    }

    #[test]
    fn test_require_id() {
        assert!(require_id("violationID", "V1").is_ok());
        assert!(matches!(require_id("violationID", ""), Err(ContractError::InvalidArgument(_))));
    }
}
