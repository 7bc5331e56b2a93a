//! Discovery-and-enrichment pipeline: the adapters behind the ports declared
//! in `lanward-common` and the [`DiscoveryService`] sequencing them.

pub mod classify;
pub mod command;
pub mod discovery;
pub mod domain;
pub mod liveness;
pub mod neighbors;
pub mod network;
pub mod resolver;
pub mod system;
pub mod topology;
pub mod vendors;

pub use discovery::{Collaborators, DiscoveryService};
