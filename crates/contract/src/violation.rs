//! Violation lifecycle
//!
//! Admins issue, update and delete violations. Only `paymentStatus` and
//! `violationStatus` ever change after issue; `driverID` and `adminID` are
//! fixed, and `adminID` always comes from the caller identity.

use trafficledger_core::{Caller, Violation, ViolationDraft};
use trafficledger_policy::{Operation, Target};

use crate::contract::{require_id, TrafficContract};
use crate::error::ContractResult;
use crate::query::RecordIter;

impl<'s> TrafficContract<'s> {
    /// Issue a new violation on behalf of the calling admin
    pub fn create_violation(&self, caller: &Caller, draft: ViolationDraft) -> ContractResult<Violation> {
        self.check(Operation::CreateViolation, caller, Target::Unscoped)?;
        require_id("violationID", &draft.violation_id)?;
        require_id("driverID", &draft.driver_id)?;
        self.ensure_absent(&draft.violation_id)?;

        let violation = Violation::issue(draft, caller.id());
        self.save(&violation)?;

        tracing::info!(
            record_id = %violation.violation_id,
            driver = %violation.driver_id,
            caller = caller.id(),
            penalty = violation.penalty_amount,
            "violation created"
        );
        Ok(violation)
    }

    /// Remove a violation. Appeals referencing it are left as they are.
    pub fn delete_violation(&self, caller: &Caller, violation_id: &str) -> ContractResult<()> {
        self.check(Operation::DeleteViolation, caller, Target::Unscoped)?;
        self.require_kind::<Violation>(violation_id)?;

        self.store().delete(violation_id)?;

        tracing::info!(record_id = violation_id, caller = caller.id(), "violation deleted");
        Ok(())
    }

    /// Overwrite the payment and violation status flags
    pub fn update_violation(
        &self,
        caller: &Caller,
        violation_id: &str,
        new_payment_status: bool,
        new_violation_status: bool,
    ) -> ContractResult<Violation> {
        self.check(Operation::UpdateViolation, caller, Target::Unscoped)?;
        let mut violation = self.load_existing::<Violation>(violation_id)?;

        violation.set_status(new_payment_status, new_violation_status);
        self.save(&violation)?;

        tracing::info!(
            record_id = violation_id,
            caller = caller.id(),
            payment_status = new_payment_status,
            violation_status = new_violation_status,
            "violation updated"
        );
        Ok(violation)
    }

    /// Read one violation; non-admins only see their own
    pub fn query_violation(&self, caller: &Caller, violation_id: &str) -> ContractResult<Violation> {
        let violation = self.load_existing::<Violation>(violation_id)?;
        self.check(
            Operation::QueryViolation,
            caller,
            Target::OwnedBy(&violation.driver_id),
        )?;

        tracing::debug!(record_id = violation_id, caller = caller.id(), "violation queried");
        Ok(violation)
    }

    /// Every violation on the ledger (admin only)
    pub fn query_all_violations(&self, caller: &Caller) -> ContractResult<RecordIter<'s, Violation>> {
        self.check(Operation::QueryAllViolations, caller, Target::Unscoped)?;
        self.query_by_type::<Violation>(None)
    }

    /// Violations whose `driverID` is the caller
    pub fn query_my_violations(&self, caller: &Caller) -> ContractResult<RecordIter<'s, Violation>> {
        self.check(Operation::QueryMyViolations, caller, Target::Unscoped)?;
        self.query_by_type::<Violation>(Some(caller.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ContractError, ErrorKind};
    use trafficledger_policy::DenialKind;
    use trafficledger_store::{MemoryStore, RecordStore};

    fn admin() -> Caller {
        Caller::with_role("A1", "admin")
    }

    fn driver(id: &str) -> Caller {
        Caller::with_role(id, "driver")
    }

    fn draft(id: &str, driver_id: &str) -> ViolationDraft {
        ViolationDraft {
            violation_id: id.to_string(),
            driver_id: driver_id.to_string(),
            violation_type: "Red light".to_string(),
            location: "Jalan Tun Razak".to_string(),
            penalty_amount: 300,
            timestamp: "2024-05-01T10:00:00Z".to_string(),
            license_plate_number: "VBA 7788".to_string(),
            image: "img://cam-12/0001".to_string(),
            remark: "Camera 12".to_string(),
            payment_status: false,
            violation_status: false,
        }
    }

    #[test]
    fn test_create_and_query_round_trip() {
        let store = MemoryStore::new();
        let contract = TrafficContract::new(&store);

        let created = contract.create_violation(&admin(), draft("V1", "D1")).unwrap();
        let fetched = contract.query_violation(&admin(), "V1").unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.admin_id, "A1");
        assert_eq!(fetched.penalty_amount, 300);
    }

    #[test]
    fn test_create_requires_admin() {
        let store = MemoryStore::new();
        let contract = TrafficContract::new(&store);

        let err = contract.create_violation(&driver("D1"), draft("V1", "D1")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
        assert!(store.is_empty().unwrap());

        let err = contract
            .create_violation(&Caller::without_role("A1"), draft("V1", "D1"))
            .unwrap_err();
        assert!(matches!(
            err,
            ContractError::AccessDenied { reason } if reason.kind == DenialKind::RoleMissing
        ));
    }

    #[test]
    fn test_create_rejects_empty_ids() {
        let store = MemoryStore::new();
        let contract = TrafficContract::new(&store);

        let err = contract.create_violation(&admin(), draft("", "D1")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = contract.create_violation(&admin(), draft("V1", "")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_delete_of_other_kind_is_not_found() {
        let store = MemoryStore::new();
        store.put("U1", br#"{"userID":"U1","role":"driver","objectType":"user"}"#).unwrap();
        let contract = TrafficContract::new(&store);

        let err = contract.delete_violation(&admin(), "U1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(store.contains("U1").unwrap());
    }

    #[test]
    fn test_delete_violation_requires_admin() {
        let store = MemoryStore::new();
        let contract = TrafficContract::new(&store);
        contract.create_violation(&admin(), draft("V1", "D1")).unwrap();

        let err = contract.delete_violation(&driver("D1"), "V1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
        assert!(store.contains("V1").unwrap());
    }

    #[test]
    fn test_update_requires_existing_record() {
        let store = MemoryStore::new();
        let contract = TrafficContract::new(&store);

        let err = contract.update_violation(&admin(), "V404", true, true).unwrap_err();
        assert!(matches!(err, ContractError::NotFound { record_id } if record_id == "V404"));
    }

    #[test]
    fn test_query_missing_violation_is_not_found_for_everyone() {
        let store = MemoryStore::new();
        let contract = TrafficContract::new(&store);

        assert_eq!(
            contract.query_violation(&driver("D1"), "V404").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_query_my_violations_empty() {
        let store = MemoryStore::new();
        let contract = TrafficContract::new(&store);

        let mine = contract.query_my_violations(&driver("D1")).unwrap().collect_all().unwrap();
        assert!(mine.is_empty());
    }
}
