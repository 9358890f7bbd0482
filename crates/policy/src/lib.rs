//! TrafficLedger Policy - Access decisions
//!
//! Pure decision logic: given an operation, the caller and (when relevant)
//! the owner of the target record, decide allow or deny. No storage access,
//! no side effects.
//!
//! # Key Types
//! - `Operation`: every gated entry point of the ledger
//! - `Decision`: `Allow` or `Deny(Denial)`
//! - `DenialKind`: why access was refused

pub mod decision;
pub mod engine;
pub mod operation;

pub use decision::{Decision, Denial, DenialKind};
pub use engine::{authorize, Target};
pub use operation::Operation;
