//! In-memory collaborators for driving a whole [`DiscoveryService`].

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use lanward_common::config::Config;
use lanward_common::models::{Candidate, NetworkInfo};
use lanward_common::network::range;
use lanward_common::ports::{LivenessProbe, NameSource, NeighborSource, PortProber, ProbeOutcome, TopologyReader};
use lanward_core::discovery::{Collaborators, DiscoveryService, Enricher};
use lanward_core::domain::DomainChecker;
use lanward_core::resolver::NameResolver;
use lanward_core::vendors::VendorCatalog;

pub enum FakeTopology {
    Lan,
    Missing,
    Broken,
}

impl TopologyReader for FakeTopology {
    fn read(&self) -> anyhow::Result<Option<NetworkInfo>> {
        match self {
            FakeTopology::Lan => {
                let local_ip = Ipv4Addr::new(10, 0, 0, 100);
                Ok(Some(NetworkInfo {
                    interface_name: "eth0".into(),
                    local_ip,
                    netmask: Ipv4Addr::new(255, 255, 255, 0),
                    prefix_length: 24,
                    mac_of_interface: Some("02:00:00:00:00:FE".into()),
                    range: range::subnet_range(local_ip, 24)?,
                    detected_at: Utc::now(),
                }))
            }
            FakeTopology::Missing => Ok(None),
            FakeTopology::Broken => anyhow::bail!("netlink socket unavailable"),
        }
    }
}

pub enum FakeNeighbors {
    Table(Vec<(Ipv4Addr, &'static str)>),
    Broken,
}

#[async_trait]
impl NeighborSource for FakeNeighbors {
    async fn harvest(&self) -> anyhow::Result<Vec<Candidate>> {
        match self {
            FakeNeighbors::Table(entries) => Ok(entries
                .iter()
                .map(|(ip, mac)| Candidate {
                    ip: *ip,
                    mac: mac.to_string(),
                    interface_name: "eth0".into(),
                    neighbor_state: "REACHABLE".into(),
                    observed_at: Utc::now(),
                })
                .collect()),
            FakeNeighbors::Broken => anyhow::bail!("permission denied"),
        }
    }
}

/// Hosts listed answer with the given latency; everything else is dead.
pub struct FakeProbe(pub HashMap<Ipv4Addr, f64>);

#[async_trait]
impl LivenessProbe for FakeProbe {
    async fn probe(&self, ip: Ipv4Addr, _timeout: Duration, _retries: u8) -> anyhow::Result<ProbeOutcome> {
        Ok(match self.0.get(&ip) {
            Some(latency_ms) => ProbeOutcome {
                alive: true,
                latency_ms: *latency_ms,
                packet_loss_pct: 0.0,
            },
            None => ProbeOutcome::unreachable(),
        })
    }
}

pub enum Lookup {
    Names(HashMap<Ipv4Addr, &'static str>),
    Hang,
    Fail,
    PanicOn(Ipv4Addr),
}

pub struct FakeNames {
    pub label: &'static str,
    pub lookup: Lookup,
}

#[async_trait]
impl NameSource for FakeNames {
    fn name(&self) -> &'static str {
        self.label
    }

    async fn try_resolve(&self, ip: Ipv4Addr) -> anyhow::Result<Option<String>> {
        match &self.lookup {
            Lookup::Names(names) => Ok(names.get(&ip).map(|name| name.to_string())),
            Lookup::Hang => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(None)
            }
            Lookup::Fail => anyhow::bail!("connection refused"),
            Lookup::PanicOn(bad) if *bad == ip => panic!("decoder blew up on {ip}"),
            Lookup::PanicOn(_) => Ok(None),
        }
    }
}

/// Ports listed per host accept connections; everything else is closed.
#[derive(Default)]
pub struct FakePorts(pub HashMap<Ipv4Addr, Vec<u16>>);

#[async_trait]
impl PortProber for FakePorts {
    async fn is_open(&self, ip: Ipv4Addr, port: u16, _timeout: Duration) -> bool {
        self.0.get(&ip).is_some_and(|ports| ports.contains(&port))
    }
}

pub fn test_config() -> Config {
    Config {
        probe_timeout: Duration::from_millis(100),
        batch_pause: Duration::from_millis(1),
        resolve_timeout: Duration::from_millis(50),
        domain_suffix: String::from("corp.example"),
        ..Config::default()
    }
}

pub struct Lab {
    pub config: Config,
    pub topology: FakeTopology,
    pub neighbors: FakeNeighbors,
    pub probe: FakeProbe,
    pub names: Vec<FakeNames>,
    pub ports: FakePorts,
}

impl Lab {
    pub fn new(neighbors: FakeNeighbors, probe: FakeProbe) -> Self {
        Self {
            config: test_config(),
            topology: FakeTopology::Lan,
            neighbors,
            probe,
            names: Vec::new(),
            ports: FakePorts::default(),
        }
    }

    pub fn empty() -> Self {
        Self::new(FakeNeighbors::Table(Vec::new()), FakeProbe(HashMap::new()))
    }

    pub fn build(self) -> DiscoveryService {
        let prober: Arc<dyn PortProber> = Arc::new(self.ports);
        let sources: Vec<Box<dyn NameSource>> = self
            .names
            .into_iter()
            .map(|source| Box::new(source) as Box<dyn NameSource>)
            .collect();

        let enricher = Enricher::new(
            NameResolver::new(sources),
            VendorCatalog::from_config(&self.config),
            DomainChecker::from_config(&self.config, prober),
            self.config.resolve_timeout,
        );

        DiscoveryService::new(
            self.config,
            Collaborators {
                topology: Box::new(self.topology),
                neighbors: Box::new(self.neighbors),
                liveness: Box::new(self.probe),
                enricher,
            },
        )
    }
}
