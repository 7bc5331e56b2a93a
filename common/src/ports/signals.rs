use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;

/// One independent piece of evidence for domain membership.
#[async_trait]
pub trait DomainSignal: Send + Sync {
    fn name(&self) -> &'static str;

    async fn evaluate(&self, ip: Ipv4Addr, hostname: Option<&str>) -> anyhow::Result<bool>;
}

/// TCP connect capability used by the port based signals.
#[async_trait]
pub trait PortProber: Send + Sync {
    /// `true` only when a connection was established within `timeout`.
    async fn is_open(&self, ip: Ipv4Addr, port: u16, timeout: Duration) -> bool;
}
