use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;

use lanward_common::ports::{DomainSignal, PortProber};

/// Hostname contains the directory suffix. mDNS names (`.local`) never count.
pub struct HostnameSuffix {
    suffix: String,
}

impl HostnameSuffix {
    pub fn new(suffix: &str) -> Self {
        Self {
            suffix: suffix.trim().to_ascii_lowercase(),
        }
    }
}

#[async_trait]
impl DomainSignal for HostnameSuffix {
    fn name(&self) -> &'static str {
        "hostname-suffix"
    }

    async fn evaluate(&self, _ip: Ipv4Addr, hostname: Option<&str>) -> anyhow::Result<bool> {
        let Some(hostname) = hostname else {
            return Ok(false);
        };
        if self.suffix.is_empty() {
            return Ok(false);
        }

        let hostname = hostname.to_ascii_lowercase();
        Ok(hostname.contains(&self.suffix) && !hostname.ends_with(".local"))
    }
}

/// At least `threshold` of `ports` accept a connection.
pub struct PortThreshold {
    prober: Arc<dyn PortProber>,
    ports: Vec<u16>,
    threshold: usize,
    timeout: Duration,
}

impl PortThreshold {
    pub fn new(prober: Arc<dyn PortProber>, ports: Vec<u16>, threshold: usize, timeout: Duration) -> Self {
        Self {
            prober,
            ports,
            threshold,
            timeout,
        }
    }
}

#[async_trait]
impl DomainSignal for PortThreshold {
    fn name(&self) -> &'static str {
        "port-threshold"
    }

    async fn evaluate(&self, ip: Ipv4Addr, _hostname: Option<&str>) -> anyhow::Result<bool> {
        let checks = self
            .ports
            .iter()
            .map(|port| self.prober.is_open(ip, *port, self.timeout));
        let open = join_all(checks).await.into_iter().filter(|open| *open).count();
        Ok(open >= self.threshold)
    }
}

pub struct SinglePort {
    prober: Arc<dyn PortProber>,
    port: u16,
    timeout: Duration,
}

impl SinglePort {
    pub fn new(prober: Arc<dyn PortProber>, port: u16, timeout: Duration) -> Self {
        Self { prober, port, timeout }
    }
}

#[async_trait]
impl DomainSignal for SinglePort {
    fn name(&self) -> &'static str {
        "single-port"
    }

    async fn evaluate(&self, ip: Ipv4Addr, _hostname: Option<&str>) -> anyhow::Result<bool> {
        Ok(self.prober.is_open(ip, self.port, self.timeout).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IP: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 20);

    #[tokio::test]
    async fn suffix_rules() {
        let signal = HostnameSuffix::new("Corp.Example");
        assert!(signal.evaluate(IP, Some("DC01.CORP.EXAMPLE")).await.unwrap());
        assert!(!signal.evaluate(IP, Some("dc01.corp.example.local")).await.unwrap());
        assert!(!signal.evaluate(IP, None).await.unwrap());
    }

    #[tokio::test]
    async fn default_suffix_never_matches_mdns_names() {
        let signal = HostnameSuffix::new("local");
        assert!(!signal.evaluate(IP, Some("printer.local")).await.unwrap());
        assert!(signal.evaluate(IP, Some("ws.localdomain")).await.unwrap());
    }

    #[tokio::test]
    async fn empty_suffix_never_matches() {
        let signal = HostnameSuffix::new("  ");
        assert!(!signal.evaluate(IP, Some("anything")).await.unwrap());
    }
}
