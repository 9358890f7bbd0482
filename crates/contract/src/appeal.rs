//! Appeal lifecycle
//!
//! A driver appeals one of their own violations; the appeal starts as
//! "Pending" and from then on only its status changes, at an admin's
//! discretion.

use trafficledger_core::{Appeal, AppealDraft, Caller, Violation};
use trafficledger_policy::{Operation, Target};

use crate::contract::{require_id, Slot, TrafficContract};
use crate::error::{ContractError, ContractResult};
use crate::query::RecordIter;

impl<'s> TrafficContract<'s> {
    /// File an appeal against one of the caller's violations
    pub fn submit_appeal(&self, caller: &Caller, draft: AppealDraft) -> ContractResult<Appeal> {
        self.check(Operation::SubmitAppeal, caller, Target::Unscoped)?;
        require_id("appealID", &draft.appeal_id)?;
        require_id("violationID", &draft.violation_id)?;

        let violation = match self.load::<Violation>(&draft.violation_id)? {
            Slot::Holds(violation) => violation,
            Slot::Empty => return Err(ContractError::not_found(&draft.violation_id)),
            Slot::Foreign(kind) => {
                tracing::warn!(
                    violation = %draft.violation_id,
                    found = %kind,
                    "appeal references a non-violation record"
                );
                return Err(ContractError::InvalidReference {
                    violation_id: draft.violation_id,
                });
            }
        };
        self.check(
            Operation::SubmitAppeal,
            caller,
            Target::OwnedBy(&violation.driver_id),
        )?;
        self.ensure_absent(&draft.appeal_id)?;

        let appeal = Appeal::submit(draft, caller.id());
        self.save(&appeal)?;

        tracing::info!(
            record_id = %appeal.appeal_id,
            violation = %appeal.violation_id,
            caller = caller.id(),
            "appeal submitted"
        );
        Ok(appeal)
    }

    /// Appeals filed by the caller
    pub fn query_my_appeals(&self, caller: &Caller) -> ContractResult<RecordIter<'s, Appeal>> {
        self.check(Operation::QueryMyAppeals, caller, Target::Unscoped)?;
        self.query_by_type::<Appeal>(Some(caller.id()))
    }

    /// Every appeal on the ledger (admin only)
    pub fn query_all_appeals(&self, caller: &Caller) -> ContractResult<RecordIter<'s, Appeal>> {
        self.check(Operation::QueryAllAppeals, caller, Target::Unscoped)?;
        self.query_by_type::<Appeal>(None)
    }

    /// Set an appeal's status to any admin-chosen value
    pub fn update_appeal_status(
        &self,
        caller: &Caller,
        appeal_id: &str,
        new_status: &str,
    ) -> ContractResult<Appeal> {
        self.check(Operation::UpdateAppealStatus, caller, Target::Unscoped)?;
        let mut appeal = self.load_existing::<Appeal>(appeal_id)?;

        let previous = std::mem::replace(&mut appeal.status, new_status.to_string());
        self.save(&appeal)?;

        tracing::info!(
            record_id = appeal_id,
            caller = caller.id(),
            from = %previous,
            to = new_status,
            "appeal status updated"
        );
        Ok(appeal)
    }

    /// Remove an appeal
    pub fn delete_appeal(&self, caller: &Caller, appeal_id: &str) -> ContractResult<()> {
        self.check(Operation::DeleteAppeal, caller, Target::Unscoped)?;
        self.require_kind::<Appeal>(appeal_id)?;

        self.store().delete(appeal_id)?;

        tracing::info!(record_id = appeal_id, caller = caller.id(), "appeal deleted");
        Ok(())
    }
}
