//! TrafficLedger Contract - Record lifecycle over an external store
//!
//! Every public operation runs the same pipeline:
//!
//! ```text
//! Caller ──► Access policy ──► Lifecycle preconditions ──► RecordStore ──► result
//! ```
//!
//! # Key Types
//! - `TrafficContract`: the operation surface (violations, appeals, users)
//! - `RecordIter`: lazy, decoded view over a store query
//! - `ContractError` / `ErrorKind`: typed failures a caller can branch on
//!
//! Deleting a violation leaves appeals that reference it in place; they stay
//! readable and keep the dangling `violationID`.

pub mod appeal;
pub mod contract;
pub mod error;
pub mod query;
pub mod user;
pub mod violation;

pub use contract::TrafficContract;
pub use error::{ContractError, ContractResult, ErrorKind};
pub use query::RecordIter;
