//! Gated ledger operations

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Every public entry point subject to an access decision
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, Display,
)]
#[strum(serialize_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub enum Operation {
    CreateViolation,
    DeleteViolation,
    UpdateViolation,
    QueryViolation,
    QueryAllViolations,
    QueryMyViolations,
    SubmitAppeal,
    QueryMyAppeals,
    QueryAllAppeals,
    UpdateAppealStatus,
    DeleteAppeal,
    CreateUser,
    GetClientId,
    GetClientRole,
}

impl Operation {
    /// Operations that write to the store
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Operation::CreateViolation
                | Operation::DeleteViolation
                | Operation::UpdateViolation
                | Operation::SubmitAppeal
                | Operation::UpdateAppealStatus
                | Operation::DeleteAppeal
                | Operation::CreateUser
        )
    }

    /// Short human phrase used in denial messages
    pub fn describe(&self) -> &'static str {
        match self {
            Operation::CreateViolation => "create violation",
            Operation::DeleteViolation => "delete violation",
            Operation::UpdateViolation => "update violation status",
            Operation::QueryViolation => "query violation",
            Operation::QueryAllViolations => "query all violations",
            Operation::QueryMyViolations => "query own violations",
            Operation::SubmitAppeal => "submit appeals",
            Operation::QueryMyAppeals => "query own appeals",
            Operation::QueryAllAppeals => "query all appeals",
            Operation::UpdateAppealStatus => "update appeal status",
            Operation::DeleteAppeal => "delete appeal",
            Operation::CreateUser => "register user",
            Operation::GetClientId => "read caller id",
            Operation::GetClientRole => "read caller role",
        }
    }
}
