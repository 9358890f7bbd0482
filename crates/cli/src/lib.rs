//! TrafficLedger CLI - config, store wiring and command dispatch
//!
//! This crate provides the `trafficledger` binary. Every invocation resolves
//! one caller, opens the configured store and runs a single operation.

pub mod commands;
pub mod config;
pub mod context;

pub use config::{Backend, ConfigError, ConfigLoader, LedgerConfig};
pub use context::AppContext;
