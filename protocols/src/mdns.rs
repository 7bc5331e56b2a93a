use std::collections::HashSet;
use std::net::IpAddr;

use anyhow::{Context, Result};
use dns_parser::{Packet, RData};

use crate::dns;

pub const MDNS_PORT: u16 = 5353;

/// IN class with the "unicast response requested" (QU) bit set.
pub const CLASS_IN_UNICAST: u16 = 0x8001;

#[derive(Debug, Default)]
pub struct MdnsRecord {
    pub hostname: Option<String>,
    pub ips: HashSet<IpAddr>,
}

/// Reverse lookup question sent straight to a host's mDNS responder.
///
/// Sent from an ephemeral port this is a legacy unicast query, so the responder
/// answers back to that port instead of the multicast group.
pub fn create_reverse_query(ip: &IpAddr) -> Result<Vec<u8>> {
    dns::create_ptr_packet(ip, 0, CLASS_IN_UNICAST, false)
}

pub fn extract_resource(data: &[u8]) -> Result<MdnsRecord> {
    let packet = Packet::parse(data).context("failed to parse mDNS packet")?;
    let mut metadata: MdnsRecord = MdnsRecord::default();

    for record in packet.answers.iter().chain(packet.additional.iter()) {
        match &record.data {
            RData::PTR(ptr) => {
                let name: String = ptr.0.to_string();
                if !name.ends_with(".arpa") && metadata.hostname.is_none() {
                    metadata.hostname = Some(name.trim_end_matches('.').to_ascii_lowercase());
                }
            }

            RData::A(a) => {
                metadata.ips.insert(IpAddr::V4(a.0));
            }

            RData::AAAA(aaaa) => {
                metadata.ips.insert(IpAddr::V6(aaaa.0));
            }

            _ => {}
        }
    }

    Ok(metadata)
}
