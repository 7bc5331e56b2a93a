use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Addresses derived from an interface address and its netmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetRange {
    pub network_addr: Ipv4Addr,
    pub broadcast_addr: Ipv4Addr,
    pub first_host: Ipv4Addr,
    pub last_host: Ipv4Addr,
    pub total_hosts: u32,
}

/// The primary interface the scan runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub interface_name: String,
    pub local_ip: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub prefix_length: u8,
    pub mac_of_interface: Option<String>,
    pub range: SubnetRange,
    pub detected_at: DateTime<Utc>,
}
