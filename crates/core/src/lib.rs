//! TrafficLedger Core - Domain types
//!
//! This crate contains the record shapes shared by every other crate:
//! - `Violation`: a traffic offence issued by an admin against a driver
//! - `Appeal`: a driver's dispute of exactly one violation
//! - `User`: a registered identity and its role
//! - `Caller`: the resolved identity invoking an operation

pub mod caller;
pub mod record;
pub mod role;

pub use caller::{Caller, IdentityError, IdentityResolver, StaticIdentity};
pub use record::{
    peek_object_type, Appeal, AppealDraft, Document, ObjectType, User, Violation, ViolationDraft,
    APPEAL_STATUS_PENDING,
};
pub use role::Role;
