use std::net::{Ipv4Addr, SocketAddr};

use async_trait::async_trait;

use lanward_common::ports::NameSource;
use lanward_protocols::netbios::{self, NETBIOS_NS_PORT};

use crate::network::udp;

/// NetBIOS node status (NBSTAT) query; answers with the workstation name.
pub struct NetbiosStatus;

#[async_trait]
impl NameSource for NetbiosStatus {
    fn name(&self) -> &'static str {
        "netbios"
    }

    async fn try_resolve(&self, ip: Ipv4Addr) -> anyhow::Result<Option<String>> {
        let id: u16 = rand::random();
        let request = netbios::create_status_request(id);
        let target = SocketAddr::from((ip, NETBIOS_NS_PORT));

        let reply = udp::exchange(target, &request, udp::matches_id(id)).await?;
        let entries = netbios::parse_status_response(&reply, id)?;
        Ok(netbios::workstation_name(&entries))
    }
}
