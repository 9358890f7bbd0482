//! Access policy rules
//!
//! | Operation                       | Rule                                        |
//! |---------------------------------|---------------------------------------------|
//! | Create/Delete/Update Violation  | admin only                                  |
//! | Query Violation                 | admin, or the owning driver                 |
//! | Query All Violations / Appeals  | admin only                                  |
//! | Query My Violations / Appeals   | anyone (result scoped to caller)            |
//! | Submit Appeal                   | any role except admin; owner of violation   |
//! | Update Appeal Status / Delete   | admin only                                  |
//! | Create User, Get Client Id/Role | anyone                                      |
//!
//! A missing role attribute never falls through to allow.

use trafficledger_core::Caller;

use crate::decision::{Decision, Denial};
use crate::operation::Operation;

/// Record the operation acts on, as far as the policy cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// No specific record, or ownership not yet known
    Unscoped,
    /// Record owned by the given driver id
    OwnedBy(&'a str),
}

/// Decide whether `caller` may perform `operation` on `target`
pub fn authorize(operation: Operation, caller: &Caller, target: Target<'_>) -> Decision {
    match operation {
        Operation::CreateViolation
        | Operation::DeleteViolation
        | Operation::UpdateViolation
        | Operation::QueryAllViolations
        | Operation::QueryAllAppeals
        | Operation::UpdateAppealStatus
        | Operation::DeleteAppeal => require_admin(operation, caller),

        Operation::QueryViolation => {
            if caller.is_admin() {
                return Decision::Allow;
            }
            match target {
                Target::Unscoped => Decision::Deny(Denial::ownership_mismatch(
                    "access denied: violation owner unknown",
                )),
                owned => require_owner(caller, owned, "violation"),
            }
        }

        Operation::SubmitAppeal => match caller.role() {
            None => Decision::Deny(Denial::role_missing(
                "only drivers can submit appeals: caller has no role attribute",
            )),
            Some(role) if role.is_admin() => Decision::Deny(Denial::insufficient_role(
                "only drivers can submit appeals",
            )),
            Some(_) => require_owner(caller, target, "violation"),
        },

        Operation::QueryMyViolations
        | Operation::QueryMyAppeals
        | Operation::CreateUser
        | Operation::GetClientId
        | Operation::GetClientRole => Decision::Allow,
    }
}

fn require_admin(operation: Operation, caller: &Caller) -> Decision {
    match caller.role() {
        Some(role) if role.is_admin() => Decision::Allow,
        Some(role) => Decision::Deny(Denial::insufficient_role(format!(
            "access denied: only admin can {} (role '{}')",
            operation.describe(),
            role
        ))),
        None => Decision::Deny(Denial::role_missing(format!(
            "access denied: only admin can {}: caller has no role attribute",
            operation.describe()
        ))),
    }
}

/// `Unscoped` passes: the caller asked for the role check only.
fn require_owner(caller: &Caller, target: Target<'_>, record: &str) -> Decision {
    match target {
        Target::OwnedBy(owner) if owner == caller.id() => Decision::Allow,
        Target::OwnedBy(_) => Decision::Deny(Denial::ownership_mismatch(format!(
            "access denied: {} does not belong to you",
            record
        ))),
        Target::Unscoped => Decision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::DenialKind;
    use strum::IntoEnumIterator;

    fn admin() -> Caller {
        Caller::with_role("A1", "admin")
    }

    fn driver(id: &str) -> Caller {
        Caller::with_role(id, "driver")
    }

    const ADMIN_ONLY: [Operation; 7] = [
        Operation::CreateViolation,
        Operation::DeleteViolation,
        Operation::UpdateViolation,
        Operation::QueryAllViolations,
        Operation::QueryAllAppeals,
        Operation::UpdateAppealStatus,
        Operation::DeleteAppeal,
    ];

    #[test]
    fn test_admin_only_operations() {
        for op in ADMIN_ONLY {
            assert!(authorize(op, &admin(), Target::Unscoped).is_allowed(), "{op}");

            let denied = authorize(op, &driver("D1"), Target::Unscoped);
            assert_eq!(denied.denial_kind(), Some(DenialKind::InsufficientRole), "{op}");

            let missing = authorize(op, &Caller::without_role("X"), Target::Unscoped);
            assert_eq!(missing.denial_kind(), Some(DenialKind::RoleMissing), "{op}");
        }
    }

    #[test]
    fn test_admin_match_is_exact() {
        let caller = Caller::with_role("A2", "ADMIN");
        let decision = authorize(Operation::CreateViolation, &caller, Target::Unscoped);
        assert_eq!(decision.denial_kind(), Some(DenialKind::InsufficientRole));
    }

    #[test]
    fn test_query_violation_ownership() {
        assert!(authorize(Operation::QueryViolation, &admin(), Target::OwnedBy("D1")).is_allowed());
        assert!(
            authorize(Operation::QueryViolation, &driver("D1"), Target::OwnedBy("D1")).is_allowed()
        );

        let other = authorize(Operation::QueryViolation, &driver("D2"), Target::OwnedBy("D1"));
        assert_eq!(other.denial_kind(), Some(DenialKind::OwnershipMismatch));
    }

    #[test]
    fn test_query_violation_without_role_uses_ownership() {
        let owner = Caller::without_role("D1");
        assert!(authorize(Operation::QueryViolation, &owner, Target::OwnedBy("D1")).is_allowed());

        let stranger = Caller::without_role("D9");
        let decision = authorize(Operation::QueryViolation, &stranger, Target::OwnedBy("D1"));
        assert_eq!(decision.denial_kind(), Some(DenialKind::OwnershipMismatch));
    }

    #[test]
    fn test_query_violation_requires_known_owner() {
        let decision = authorize(Operation::QueryViolation, &driver("D1"), Target::Unscoped);
        assert_eq!(decision.denial_kind(), Some(DenialKind::OwnershipMismatch));
    }

    #[test]
    fn test_submit_appeal_rules() {
        assert!(authorize(Operation::SubmitAppeal, &driver("D1"), Target::Unscoped).is_allowed());
        assert!(
            authorize(Operation::SubmitAppeal, &Caller::with_role("D1", "citizen"), Target::OwnedBy("D1"))
                .is_allowed()
        );

        let by_admin = authorize(Operation::SubmitAppeal, &admin(), Target::Unscoped);
        assert_eq!(by_admin.denial_kind(), Some(DenialKind::InsufficientRole));

        let no_role = authorize(Operation::SubmitAppeal, &Caller::without_role("D1"), Target::Unscoped);
        assert_eq!(no_role.denial_kind(), Some(DenialKind::RoleMissing));

        let foreign = authorize(Operation::SubmitAppeal, &driver("D2"), Target::OwnedBy("D1"));
        assert_eq!(foreign.denial_kind(), Some(DenialKind::OwnershipMismatch));
    }

    #[test]
    fn test_open_operations() {
        let anyone = Caller::without_role("X");
        for op in [
            Operation::QueryMyViolations,
            Operation::QueryMyAppeals,
            Operation::CreateUser,
            Operation::GetClientId,
            Operation::GetClientRole,
        ] {
            assert!(authorize(op, &anyone, Target::Unscoped).is_allowed(), "{op}");
        }
    }

    #[test]
    fn test_no_operation_allows_roleless_caller_on_foreign_record() {
        let stranger = Caller::without_role("D9");
        for op in Operation::iter().filter(|op| op.is_mutation() && *op != Operation::CreateUser) {
            assert!(authorize(op, &stranger, Target::OwnedBy("D1")).is_denied(), "{op}");
        }
    }

    #[test]
    fn test_denial_message_is_human_readable() {
        let decision = authorize(Operation::DeleteAppeal, &driver("D1"), Target::Unscoped);
        let denial = decision.into_result().unwrap_err();
        assert!(denial.message.contains("only admin can delete appeal"));
        assert!(denial.to_string().contains("driver"));
    }

    #[test]
    fn test_decision_serialization() {
        let decision = authorize(Operation::QueryViolation, &driver("D2"), Target::OwnedBy("D1"));
        let json = serde_json::to_string(&decision).unwrap();
        assert!(json.contains("deny"));
        assert!(json.contains("ownership_mismatch"));
    }
}
