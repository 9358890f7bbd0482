//! Access decisions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an operation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    /// Caller identity carries no role attribute
    RoleMissing,
    /// Role present but not acceptable for the operation
    InsufficientRole,
    /// Record belongs to another driver
    OwnershipMismatch,
}

/// A refused access decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denial {
    pub kind: DenialKind,
    pub message: String,
}

impl Denial {
    pub fn new(kind: DenialKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn role_missing(message: impl Into<String>) -> Self {
        Self::new(DenialKind::RoleMissing, message)
    }

    pub fn insufficient_role(message: impl Into<String>) -> Self {
        Self::new(DenialKind::InsufficientRole, message)
    }

    pub fn ownership_mismatch(message: impl Into<String>) -> Self {
        Self::new(DenialKind::OwnershipMismatch, message)
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of an access check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny(Denial),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Decision::Deny(_))
    }

    /// Convert into a `Result`, for `?` at call sites
    pub fn into_result(self) -> Result<(), Denial> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(denial) => Err(denial),
        }
    }

    pub fn denial_kind(&self) -> Option<DenialKind> {
        match self {
            Decision::Allow => None,
            Decision::Deny(denial) => Some(denial.kind),
        }
    }
}
