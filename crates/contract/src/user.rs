//! User registration
//!
//! Registration is open: anyone may register any id with any non-empty role
//! string. Only the exact string "admin" carries privileges later on.

use trafficledger_core::{Caller, Role, User};
use trafficledger_policy::{Operation, Target};

use crate::contract::{require_id, TrafficContract};
use crate::error::{ContractError, ContractResult};

impl TrafficContract<'_> {
    /// Register `user_id` with `role`
    pub fn create_user(&self, caller: &Caller, user_id: &str, role: &str) -> ContractResult<User> {
        self.check(Operation::CreateUser, caller, Target::Unscoped)?;
        require_id("userID", user_id)?;
        if role.is_empty() {
            return Err(ContractError::InvalidArgument("role cannot be empty".to_string()));
        }
        self.ensure_absent(user_id)?;

        let user = User::new(user_id, Role::parse(role));
        self.save(&user)?;

        tracing::info!(record_id = user_id, role = %user.role, caller = caller.id(), "user registered");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use trafficledger_store::MemoryStore;

    #[test]
    fn test_open_registration() {
        let store = MemoryStore::new();
        let contract = TrafficContract::new(&store);

        let user = contract.create_user(&Caller::without_role("anyone"), "D1", "driver").unwrap();
        assert_eq!(user.role, Role::Driver);
    }

    #[test]
    fn test_duplicate_user() {
        let store = MemoryStore::new();
        let contract = TrafficContract::new(&store);
        let caller = Caller::without_role("anyone");

        contract.create_user(&caller, "D1", "driver").unwrap();
        let err = contract.create_user(&caller, "D1", "admin").unwrap_err();
        assert!(matches!(err, ContractError::AlreadyExists { record_id } if record_id == "D1"));
    }

    #[test]
    fn test_arbitrary_role_accepted_but_unprivileged() {
        let store = MemoryStore::new();
        let contract = TrafficContract::new(&store);

        let user = contract
            .create_user(&Caller::without_role("x"), "U7", "Administrator")
            .unwrap();
        assert_eq!(user.role, Role::Other("Administrator".to_string()));
        assert!(!user.role.is_admin());
    }

    #[test]
    fn test_empty_role_rejected() {
        let store = MemoryStore::new();
        let contract = TrafficContract::new(&store);

        let err = contract.create_user(&Caller::without_role("x"), "U1", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(store.is_empty().unwrap());
    }
}
