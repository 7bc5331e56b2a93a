use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;

/// Raw answer of one echo probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeOutcome {
    pub alive: bool,
    pub latency_ms: f64,
    pub packet_loss_pct: f64,
}

impl ProbeOutcome {
    pub fn unreachable() -> Self {
        Self {
            alive: false,
            latency_ms: 0.0,
            packet_loss_pct: 100.0,
        }
    }
}

#[async_trait]
pub trait LivenessProbe: Send + Sync {
    async fn probe(&self, ip: Ipv4Addr, timeout: Duration, retries: u8) -> anyhow::Result<ProbeOutcome>;
}
