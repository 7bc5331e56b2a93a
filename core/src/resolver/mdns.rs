use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use async_trait::async_trait;

use lanward_common::ports::NameSource;
use lanward_protocols::mdns::{self, MDNS_PORT};

use crate::network::udp;

/// Reverse lookup sent as a legacy unicast query to the host's own responder.
pub struct MdnsReverse;

#[async_trait]
impl NameSource for MdnsReverse {
    fn name(&self) -> &'static str {
        "mdns"
    }

    async fn try_resolve(&self, ip: Ipv4Addr) -> anyhow::Result<Option<String>> {
        let query = mdns::create_reverse_query(&IpAddr::V4(ip))?;
        let target = SocketAddr::from((ip, MDNS_PORT));

        let reply = udp::exchange(target, &query, |_| true).await?;
        let record = mdns::extract_resource(&reply)?;
        Ok(record.hostname)
    }
}
