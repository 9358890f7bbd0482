//! Caller roles
//!
//! The ledger recognises "admin" and "driver" but registration accepts any
//! role string. Anything that is not exactly "admin" (case-sensitive) is
//! unprivileged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role attribute attached to a caller identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Traffic authority staff - issues and manages records
    Admin,

    /// Vehicle owner - reads own records, files appeals
    Driver,

    /// Any other registered role string, kept verbatim
    Other(String),
}

impl Role {
    pub const ADMIN: &'static str = "admin";
    pub const DRIVER: &'static str = "driver";

    /// Parse a raw role attribute. Matching is exact and case-sensitive.
    pub fn parse(raw: &str) -> Self {
        match raw {
            Self::ADMIN => Role::Admin,
            Self::DRIVER => Role::Driver,
            other => Role::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => Self::ADMIN,
            Role::Driver => Self::DRIVER,
            Role::Other(s) => s,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Role::parse(&raw)
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        Role::parse(raw)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
