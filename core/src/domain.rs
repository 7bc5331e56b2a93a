//! # Domain Membership
//!
//! A host counts as a domain member when any [`DomainSignal`] fires. Signals
//! run concurrently and a failing one simply does not fire.

mod signals;

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::debug;

use lanward_common::config::Config;
use lanward_common::ports::{DomainSignal, PortProber};

pub use signals::{HostnameSuffix, PortThreshold, SinglePort};

/// Directory services reported for in-domain hosts.
const DIRECTORY_SERVICES: &[(u16, &str)] = &[(389, "LDAP"), (636, "LDAPS"), (88, "Kerberos")];
const SERVICE_TIMEOUT: Duration = Duration::from_millis(1_000);

pub struct DomainChecker {
    signals: Vec<Box<dyn DomainSignal>>,
    prober: Arc<dyn PortProber>,
}

impl DomainChecker {
    pub fn new(signals: Vec<Box<dyn DomainSignal>>, prober: Arc<dyn PortProber>) -> Self {
        Self { signals, prober }
    }

    /// Suffix match, port threshold, LDAP and NetBIOS session port.
    ///
    /// With `domain_check_enabled` off the checker carries no signals and
    /// answers `false` for every host.
    pub fn from_config(config: &Config, prober: Arc<dyn PortProber>) -> Self {
        if !config.domain_check_enabled {
            return Self::new(Vec::new(), prober);
        }

        let signals: Vec<Box<dyn DomainSignal>> = vec![
            Box::new(HostnameSuffix::new(&config.domain_suffix)),
            Box::new(PortThreshold::new(
                Arc::clone(&prober),
                config.domain_ports.clone(),
                2,
                Duration::from_millis(500),
            )),
            Box::new(SinglePort::new(Arc::clone(&prober), 389, Duration::from_millis(1_000))),
            Box::new(SinglePort::new(Arc::clone(&prober), 137, Duration::from_millis(500))),
        ];
        Self::new(signals, prober)
    }

    pub async fn is_in_domain(&self, ip: Ipv4Addr, hostname: Option<&str>) -> bool {
        if self.signals.is_empty() {
            return false;
        }

        let evaluations = self.signals.iter().map(|signal| async move {
            match signal.evaluate(ip, hostname).await {
                Ok(fired) => fired,
                Err(e) => {
                    debug!("Domain signal {} failed for {ip}: {e}", signal.name());
                    false
                }
            }
        });

        join_all(evaluations).await.into_iter().any(|fired| fired)
    }

    /// Labels of the directory services accepting connections on `ip`.
    pub async fn domain_services(&self, ip: Ipv4Addr) -> Vec<String> {
        let checks = DIRECTORY_SERVICES
            .iter()
            .map(|(port, _)| self.prober.is_open(ip, *port, SERVICE_TIMEOUT));

        join_all(checks)
            .await
            .into_iter()
            .zip(DIRECTORY_SERVICES)
            .filter(|(open, _)| *open)
            .map(|(_, (_, label))| label.to_string())
            .collect()
    }
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
    use std::collections::HashSet;

    struct OpenPorts(HashSet<u16>);

    #[async_trait]
    impl PortProber for OpenPorts {
        async fn is_open(&self, _ip: Ipv4Addr, port: u16, _timeout: Duration) -> bool {
            self.0.contains(&port)
        }
    }

    fn checker(open: &[u16]) -> DomainChecker {
        let prober: Arc<dyn PortProber> = Arc::new(OpenPorts(open.iter().copied().collect()));
        let config = Config {
            domain_suffix: "corp.example".into(),
            ..Config::default()
        };
        DomainChecker::from_config(&config, prober)
    }

    struct Broken;

    #[async_trait]
    impl DomainSignal for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn evaluate(&self, _ip: Ipv4Addr, _hostname: Option<&str>) -> anyhow::Result<bool> {
            anyhow::bail!("socket exhausted")
        }
    }

    const IP: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 20);

    #[tokio::test]
    async fn suffix_alone_is_enough() {
        let checker = checker(&[]);
        assert!(checker.is_in_domain(IP, Some("ws-12.corp.example")).await);
        assert!(!checker.is_in_domain(IP, Some("ws-12")).await);
        assert!(!checker.is_in_domain(IP, None).await);
    }

    #[tokio::test]
    async fn port_signals() {
        assert!(checker(&[88, 445]).is_in_domain(IP, None).await);
        assert!(checker(&[389]).is_in_domain(IP, None).await);
        assert!(checker(&[137]).is_in_domain(IP, None).await);
        assert!(!checker(&[445]).is_in_domain(IP, None).await);
        assert!(!checker(&[22, 80]).is_in_domain(IP, None).await);
    }

    #[tokio::test]
    async fn failing_signal_counts_as_false() {
        let prober: Arc<dyn PortProber> = Arc::new(OpenPorts(HashSet::new()));
        let failing = DomainChecker::new(vec![Box::new(Broken)], Arc::clone(&prober));
        assert!(!failing.is_in_domain(IP, Some("x")).await);

        let mixed = DomainChecker::new(
            vec![Box::new(Broken), Box::new(HostnameSuffix::new("corp.example"))],
            prober,
        );
        assert!(mixed.is_in_domain(IP, Some("dc01.corp.example")).await);
    }

    #[tokio::test]
    async fn disabled_check_is_always_false() {
        let prober: Arc<dyn PortProber> = Arc::new(OpenPorts([389, 636, 88].into_iter().collect()));
        let config = Config {
            domain_check_enabled: false,
            ..Config::default()
        };
        let checker = DomainChecker::from_config(&config, prober);
        assert!(!checker.is_in_domain(IP, Some("dc01.corp.example")).await);
    }

    #[tokio::test]
    async fn labels_open_directory_services() {
        let services = checker(&[389, 88]).domain_services(IP).await;
        assert_eq!(services, vec!["LDAP".to_string(), "Kerberos".to_string()]);
    }
}
