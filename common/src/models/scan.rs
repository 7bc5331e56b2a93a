use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::{DeviceRecord, NetworkInfo, Stats};

/// Caller-supplied knobs for a single scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Overrides the per-probe liveness timeout. Accepted range: 100..=30000.
    pub timeout_ms: Option<u64>,
    /// Restricts candidates to a host, range (`a.b.c.d-e`) or CIDR block.
    pub address_range: Option<String>,
}

/// Orchestrator lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStage {
    Idle,
    CollectingTopology,
    Harvesting,
    Probing,
    Enriching,
    Summarizing,
    Done,
    Failed,
}

impl fmt::Display for ScanStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanStage::Idle => "idle",
            ScanStage::CollectingTopology => "collecting topology",
            ScanStage::Harvesting => "harvesting",
            ScanStage::Probing => "probing",
            ScanStage::Enriching => "enriching",
            ScanStage::Summarizing => "summarizing",
            ScanStage::Done => "done",
            ScanStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanInfo {
    pub id: u64,
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub network: Option<NetworkInfo>,
    pub devices: Vec<DeviceRecord>,
    pub stats: Stats,
    pub scan_info: ScanInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureDetail {
    pub message: String,
    pub code: String,
    pub scan_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanFailure {
    pub error: FailureDetail,
}

/// Result of `perform_scan`. A failure is never the same thing as a scan that
/// found zero devices.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Completed(ScanReport),
    Failed(ScanFailure),
}

impl ScanOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ScanOutcome::Completed(_))
    }

    pub fn report(&self) -> Option<&ScanReport> {
        match self {
            ScanOutcome::Completed(report) => Some(report),
            ScanOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureDetail> {
        match self {
            ScanOutcome::Completed(_) => None,
            ScanOutcome::Failed(failure) => Some(&failure.error),
        }
    }
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    success: bool,
    #[serde(flatten)]
    body: &'a T,
}

impl Serialize for ScanOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ScanOutcome::Completed(report) => Envelope { success: true, body: report }.serialize(serializer),
            ScanOutcome::Failed(failure) => Envelope { success: false, body: failure }.serialize(serializer),
        }
    }
}

/// History entry appended once per finished scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    pub scan_id: u64,
    pub timestamp: DateTime<Utc>,
    pub duration_ms: u64,
    pub device_count: usize,
    pub succeeded: bool,
    pub stats: Stats,
}
