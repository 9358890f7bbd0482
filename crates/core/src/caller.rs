//! Caller identity
//!
//! The hosting platform authenticates callers; this crate only consumes the
//! result. An `IdentityResolver` is sampled once per invocation into a
//! `Caller`, which is then passed explicitly to every operation.

use thiserror::Error;

use crate::role::Role;

/// Identity lookup failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Failed to get client identity: {0}")]
    Unavailable(String),

    #[error("Failed to get attribute '{attribute}': {reason}")]
    Attribute { attribute: String, reason: String },
}

/// Source of the current caller's identity and role attribute
pub trait IdentityResolver {
    /// Authenticated caller identifier
    fn caller_id(&self) -> Result<String, IdentityError>;

    /// The `role` attribute, `None` when the identity carries no such attribute
    fn role_attribute(&self) -> Result<Option<String>, IdentityError>;
}

/// Resolved identity of the party invoking an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    id: String,
    role: Option<Role>,
}

impl Caller {
    pub fn new(id: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    /// Caller carrying the given role attribute
    pub fn with_role(id: impl Into<String>, role: &str) -> Self {
        Self::new(id, Some(Role::parse(role)))
    }

    /// Caller whose identity has no role attribute
    pub fn without_role(id: impl Into<String>) -> Self {
        Self::new(id, None)
    }

    /// Sample a resolver into an explicit caller value
    pub fn resolve(resolver: &dyn IdentityResolver) -> Result<Self, IdentityError> {
        let id = resolver.caller_id()?;
        let role = resolver.role_attribute()?.map(Role::from);
        Ok(Self { id, role })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// True only for an exact "admin" role attribute
    pub fn is_admin(&self) -> bool {
        self.role.as_ref().is_some_and(Role::is_admin)
    }
}

/// Fixed identity, for the CLI and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity {
    pub id: String,
    pub role: Option<String>,
}

impl StaticIdentity {
    pub fn new(id: impl Into<String>, role: Option<&str>) -> Self {
        Self {
            id: id.into(),
            role: role.map(str::to_string),
        }
    }
}

impl IdentityResolver for StaticIdentity {
    fn caller_id(&self) -> Result<String, IdentityError> {
        if self.id.is_empty() {
            return Err(IdentityError::Unavailable("empty caller id".to_string()));
        }
        Ok(self.id.clone())
    }

    fn role_attribute(&self) -> Result<Option<String>, IdentityError> {
        Ok(self.role.clone())
    }
}
