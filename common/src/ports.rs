//! # Collaborator Ports
//!
//! Traits the scan pipeline depends on. Every external facility the core uses
//! (neighbor table, ping, DNS, NetBIOS, mDNS, TCP connect) sits behind one of
//! these, so each can be swapped for a fake in tests or omitted entirely.
//!
//! ## Rules
//! 1. All items here must be `traits`.
//! 2. No concrete implementations allowed; they live in `lanward-core`.

pub mod liveness;
pub mod naming;
pub mod neighbors;
pub mod signals;
pub mod topology;
pub mod vendors;

pub use liveness::{LivenessProbe, ProbeOutcome};
pub use naming::NameSource;
pub use neighbors::NeighborSource;
pub use signals::{DomainSignal, PortProber};
pub use topology::TopologyReader;
pub use vendors::VendorRepository;
