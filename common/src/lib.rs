//! # Lanward Common
//!
//! Shared vocabulary of the workspace: the scan-scoped value objects, the
//! configuration, the error taxonomy and the **ports** (traits) that the core
//! pipeline talks to.
//!
//! * **[`models`]**: Candidates, device records, statistics and scan results.
//! * **[`network`]**: Pure helpers for MACs, private ranges, subnets and interfaces.
//! * **[`ports`]**: Collaborator contracts (neighbor table, ping, name sources, ...).
//!     Concrete implementations live in `lanward-core`.

pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod ports;
