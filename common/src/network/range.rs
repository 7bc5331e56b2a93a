use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

use crate::models::SubnetRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn contains(&self, ip: &Ipv4Addr) -> bool {
        let value: u32 = (*ip).into();
        u32::from(self.start_addr) <= value && value <= u32::from(self.end_addr)
    }
}

pub fn cidr_range(ip: Ipv4Addr, prefix: u8) -> anyhow::Result<Ipv4Range> {
    let network = Ipv4Network::new(ip, prefix)?;
    Ok(Ipv4Range::new(network.network(), network.broadcast()))
}

/// Network, broadcast and usable host bounds of `ip/prefix`.
///
/// `/31` and `/32` have no network/broadcast to strip, so every address counts
/// as a host.
pub fn subnet_range(ip: Ipv4Addr, prefix: u8) -> anyhow::Result<SubnetRange> {
    let network = Ipv4Network::new(ip, prefix)?;
    let net_u32: u32 = network.network().into();
    let broadcast_u32: u32 = network.broadcast().into();
    let size: u64 = 1u64 << (32 - u32::from(prefix));

    let (first, last, total) = if size > 2 {
        (net_u32 + 1, broadcast_u32 - 1, size - 2)
    } else {
        (net_u32, broadcast_u32, size)
    };

    Ok(SubnetRange {
        network_addr: network.network(),
        broadcast_addr: network.broadcast(),
        first_host: Ipv4Addr::from(first),
        last_host: Ipv4Addr::from(last),
        total_hosts: total as u32,
    })
}
