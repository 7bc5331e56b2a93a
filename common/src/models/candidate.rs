use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// An IP/MAC pair observed in the neighbor table, not yet confirmed live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub ip: Ipv4Addr,
    /// Uppercase, colon separated (`AA:BB:CC:DD:EE:FF`).
    pub mac: String,
    pub interface_name: String,
    pub neighbor_state: String,
    pub observed_at: DateTime<Utc>,
}

/// Outcome of one liveness probe against a [`Candidate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub alive: bool,
    pub latency_ms: f64,
    pub packet_loss_pct: f64,
    pub scanned_at: DateTime<Utc>,
}

impl ProbeResult {
    /// A probe that errored or timed out.
    pub fn unreachable(candidate: Candidate) -> Self {
        Self {
            candidate,
            alive: false,
            latency_ms: 0.0,
            packet_loss_pct: 100.0,
            scanned_at: Utc::now(),
        }
    }
}
