use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::warn;

use lanward_common::config::Config;
use lanward_common::models::{
    DeviceClass, DeviceMetadata, DeviceRecord, DeviceStatus, ProbeResult, synthesized_name,
};
use lanward_common::ports::PortProber;

use crate::classify::classify;
use crate::domain::DomainChecker;
use crate::resolver::{NameResolver, short_name};
use crate::vendors::VendorCatalog;

/// Marker stored in [`DeviceMetadata::enrichment_error`] for minimal records.
pub const INCOMPLETE: &str = "incomplete information";

/// Turns one live probe result into a [`DeviceRecord`].
pub struct Enricher {
    resolver: NameResolver,
    vendors: VendorCatalog,
    domain: DomainChecker,
    resolve_timeout: Duration,
    deadline: Duration,
}

impl Enricher {
    pub fn new(resolver: NameResolver, vendors: VendorCatalog, domain: DomainChecker, resolve_timeout: Duration) -> Self {
        let methods = u32::try_from(resolver.len()).unwrap_or(u32::MAX).max(1);
        Self {
            resolver,
            vendors,
            domain,
            resolve_timeout,
            // Every resolver method plus the slowest domain probes, with room to spare.
            deadline: resolve_timeout.saturating_mul(methods) + Duration::from_secs(3),
        }
    }

    pub fn from_config(config: &Config, prober: Arc<dyn PortProber>) -> Self {
        let resolver = if config.no_dns {
            NameResolver::disabled()
        } else {
            NameResolver::system()
        };
        Self::new(
            resolver,
            VendorCatalog::from_config(config),
            DomainChecker::from_config(config, prober),
            config.resolve_timeout,
        )
    }

    pub async fn enrich(&self, probe: &ProbeResult) -> DeviceRecord {
        let ip = probe.candidate.ip;

        let hostname = self.resolver.resolve(ip, self.resolve_timeout).await;
        let vendor = self.vendors.vendor_of(&probe.candidate.mac);
        let device_type = classify(&vendor, hostname.as_deref(), &ip);

        let in_domain = self.domain.is_in_domain(ip, hostname.as_deref()).await;
        let domain_signals = if in_domain {
            Some(self.domain.domain_services(ip).await)
        } else {
            None
        };

        let display_name = match hostname.as_deref() {
            Some(name) => short_name(name).to_string(),
            None => synthesized_name(&ip),
        };

        DeviceRecord {
            ip,
            mac: probe.candidate.mac.clone(),
            hostname,
            display_name,
            vendor,
            device_type,
            in_domain,
            domain_signals,
            interface_name: probe.candidate.interface_name.clone(),
            latency_ms: probe.latency_ms,
            status: DeviceStatus::Active,
            last_seen_at: Utc::now(),
            metadata: DeviceMetadata {
                packet_loss_pct: probe.packet_loss_pct,
                neighbor_state: probe.candidate.neighbor_state.clone(),
                enrichment_error: None,
            },
        }
    }

    /// Record for a host whose enrichment panicked or overran its deadline.
    pub fn minimal(&self, probe: &ProbeResult, reason: &str) -> DeviceRecord {
        let ip = probe.candidate.ip;
        warn!("Enrichment of {ip} failed ({reason}), keeping minimal record");

        DeviceRecord {
            ip,
            mac: probe.candidate.mac.clone(),
            hostname: None,
            display_name: synthesized_name(&ip),
            vendor: self.vendors.vendor_of(&probe.candidate.mac),
            device_type: DeviceClass::Unknown,
            in_domain: false,
            domain_signals: None,
            interface_name: probe.candidate.interface_name.clone(),
            latency_ms: probe.latency_ms,
            status: DeviceStatus::Active,
            last_seen_at: Utc::now(),
            metadata: DeviceMetadata {
                packet_loss_pct: probe.packet_loss_pct,
                neighbor_state: probe.candidate.neighbor_state.clone(),
                enrichment_error: Some(INCOMPLETE.to_string()),
            },
        }
    }
}

/// Enriches every host on its own task. Output order follows input order.
pub async fn enrich_all(enricher: Arc<Enricher>, live: Vec<ProbeResult>) -> Vec<DeviceRecord> {
    let handles: Vec<_> = live
        .iter()
        .cloned()
        .map(|probe| {
            let enricher = Arc::clone(&enricher);
            tokio::spawn(async move {
                tokio::time::timeout(enricher.deadline, enricher.enrich(&probe)).await
            })
        })
        .collect();

    let mut devices = Vec::with_capacity(live.len());
    for (probe, handle) in live.iter().zip(handles) {
        let record = match handle.await {
            Ok(Ok(record)) => record,
            Ok(Err(_elapsed)) => enricher.minimal(probe, "timed out"),
            Err(join_error) if join_error.is_panic() => enricher.minimal(probe, "task panicked"),
            Err(_) => enricher.minimal(probe, "task cancelled"),
        };
        devices.push(record);
    }
    devices
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lanward_common::models::Candidate;
    use lanward_common::ports::NameSource;
    use std::collections::HashMap;
    use std::net::Ipv4Addr;

    struct NoPorts;

    #[async_trait]
    impl PortProber for NoPorts {
        async fn is_open(&self, _ip: Ipv4Addr, _port: u16, _timeout: Duration) -> bool {
            false
        }
    }

    /// Answers from a map; panics for `.66`.
    struct Names(HashMap<Ipv4Addr, &'static str>);

    #[async_trait]
    impl NameSource for Names {
        fn name(&self) -> &'static str {
            "names"
        }

        async fn try_resolve(&self, ip: Ipv4Addr) -> anyhow::Result<Option<String>> {
            if ip.octets()[3] == 66 {
                panic!("resolver bug");
            }
            Ok(self.0.get(&ip).map(|name| name.to_string()))
        }
    }

    fn enricher() -> Arc<Enricher> {
        let names = Names(HashMap::from([(Ipv4Addr::new(10, 0, 0, 20), "dc01.corp.example")]));
        let config = Config {
            domain_suffix: "corp.example".into(),
            ..Config::default()
        };
        let prober: Arc<dyn PortProber> = Arc::new(NoPorts);
        Arc::new(Enricher::new(
            NameResolver::new(vec![Box::new(names)]),
            VendorCatalog::from_config(&config),
            DomainChecker::from_config(&config, prober),
            Duration::from_millis(100),
        ))
    }

    fn live(last: u8, mac: &str) -> ProbeResult {
        ProbeResult {
            candidate: Candidate {
                ip: Ipv4Addr::new(10, 0, 0, last),
                mac: mac.to_string(),
                interface_name: "eth0".into(),
                neighbor_state: "REACHABLE".into(),
                observed_at: Utc::now(),
            },
            alive: true,
            latency_ms: 4.5,
            packet_loss_pct: 0.0,
            scanned_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn resolved_host_gets_short_display_name_and_domain_flag() {
        let record = enricher().enrich(&live(20, "00:0C:29:11:22:33")).await;

        assert_eq!(record.hostname.as_deref(), Some("dc01.corp.example"));
        assert_eq!(record.display_name, "dc01");
        assert_eq!(record.vendor, "VMware");
        assert_eq!(record.device_type, DeviceClass::VirtualMachine);
        assert!(record.in_domain);
        assert_eq!(record.domain_signals, Some(Vec::new()));
        assert_eq!(record.metadata.neighbor_state, "REACHABLE");
    }

    #[tokio::test]
    async fn unresolved_host_gets_synthesized_name() {
        let record = enricher().enrich(&live(30, "02:00:00:00:00:01")).await;

        assert_eq!(record.hostname, None);
        assert_eq!(record.display_name, "host-10-0-0-30");
        assert_eq!(record.vendor, "Unknown");
        assert!(!record.in_domain);
        assert_eq!(record.domain_signals, None);
    }

    #[tokio::test]
    async fn no_dns_skips_resolution() {
        let config = Config {
            no_dns: true,
            ..Config::default()
        };
        let enricher = Enricher::from_config(&config, Arc::new(NoPorts));
        assert!(enricher.resolver.is_empty());

        let record = enricher.enrich(&live(20, "00:0C:29:11:22:33")).await;
        assert_eq!(record.hostname, None);
        assert_eq!(record.display_name, "host-10-0-0-20");
    }

    #[tokio::test]
    async fn panicking_host_degrades_to_minimal_record() {
        let hosts = vec![
            live(20, "00:0C:29:11:22:33"),
            live(66, "B8:27:EB:00:00:01"),
            live(30, "02:00:00:00:00:01"),
        ];
        let devices = enrich_all(enricher(), hosts).await;

        assert_eq!(devices.len(), 3);
        let broken = &devices[1];
        assert_eq!(broken.ip, Ipv4Addr::new(10, 0, 0, 66));
        assert_eq!(broken.device_type, DeviceClass::Unknown);
        assert_eq!(broken.vendor, "Raspberry Pi Foundation");
        assert_eq!(broken.display_name, "host-10-0-0-66");
        assert!(!broken.in_domain);
        assert_eq!(broken.metadata.enrichment_error.as_deref(), Some(INCOMPLETE));
        assert!(devices[0].metadata.enrichment_error.is_none());
    }
}
