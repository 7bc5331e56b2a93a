//! # Scan Models
//!
//! Value objects produced and consumed within one scan pass. Everything here is
//! scan-scoped except [`scan::ScanRecord`], which outlives the scan inside the
//! orchestrator's rolling history.

pub mod candidate;
pub mod device;
pub mod network;
pub mod scan;
pub mod stats;
pub mod system;

pub use candidate::{Candidate, ProbeResult};
pub use device::{DeviceClass, DeviceMetadata, DeviceRecord, DeviceStatus, UNKNOWN_VENDOR, synthesized_name};
pub use network::{NetworkInfo, SubnetRange};
pub use scan::{FailureDetail, ScanFailure, ScanInfo, ScanOptions, ScanOutcome, ScanRecord, ScanReport, ScanStage};
pub use stats::Stats;
pub use system::{InterfaceSummary, SystemInfo};
