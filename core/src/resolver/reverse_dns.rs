use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use async_trait::async_trait;

use lanward_common::ports::NameSource;
use lanward_protocols::dns::{self, CLASS_IN, DNS_PORT};

use crate::network::udp;

const RESOLV_CONF: &str = "/etc/resolv.conf";

/// PTR lookup against the first configured nameserver.
pub struct ReverseDns {
    nameserver: Option<SocketAddr>,
}

impl ReverseDns {
    pub fn from_system() -> Self {
        let nameserver = std::fs::read_to_string(RESOLV_CONF)
            .ok()
            .and_then(|contents| first_nameserver(&contents))
            .map(|ip| SocketAddr::new(ip, DNS_PORT));
        Self { nameserver }
    }

    pub fn with_nameserver(nameserver: SocketAddr) -> Self {
        Self {
            nameserver: Some(nameserver),
        }
    }
}

#[async_trait]
impl NameSource for ReverseDns {
    fn name(&self) -> &'static str {
        "dns"
    }

    async fn try_resolve(&self, ip: Ipv4Addr) -> anyhow::Result<Option<String>> {
        let Some(server) = self.nameserver else {
            return Ok(None);
        };

        let id: u16 = rand::random();
        let query = dns::create_ptr_packet(&IpAddr::V4(ip), id, CLASS_IN, true)?;
        let reply = udp::exchange(server, &query, udp::matches_id(id)).await?;

        // NXDOMAIN and empty answers are a clean miss.
        Ok(dns::get_hostname(&reply).ok().map(|(_, hostname)| hostname))
    }
}

fn first_nameserver(resolv_conf: &str) -> Option<IpAddr> {
    resolv_conf.lines().find_map(|line| {
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("nameserver") => fields.next()?.parse().ok(),
            _ => None,
        }
    })
}
