//! # Address Range Filter
//!
//! Parses the optional `address_range` scan option. Accepted forms:
//! * A single IPv4 address (`192.168.1.5`).
//! * A range, full or abbreviated (`192.168.1.1-50`, `192.168.1.1-192.168.2.10`).
//! * A CIDR block (`192.168.1.0/24`).

use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::network::range::{self, Ipv4Range};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressRange {
    Host(Ipv4Addr),
    Range(Ipv4Range),
}

impl AddressRange {
    pub fn contains(&self, ip: &Ipv4Addr) -> bool {
        match self {
            AddressRange::Host(host) => host == ip,
            AddressRange::Range(range) => range.contains(ip),
        }
    }
}

impl FromStr for AddressRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(host) = s.parse::<Ipv4Addr>() {
            return Ok(AddressRange::Host(host));
        }

        if let Some(range) = parse_ip_range(s)? {
            return Ok(AddressRange::Range(range));
        }

        if let Some(range) = parse_cidr_range(s)? {
            return Ok(AddressRange::Range(range));
        }

        Err(format!("invalid address range: {s}"))
    }
}

/// Parses `1.1.1.1-2.2.2.2` or `1.1.1.1-50`.
fn parse_ip_range(s: &str) -> Result<Option<Ipv4Range>, String> {
    let Some((start_str, end_str)) = s.split_once('-') else {
        return Ok(None);
    };

    let start_addr = start_str
        .trim()
        .parse::<Ipv4Addr>()
        .map_err(|e| format!("Invalid start IP in range '{start_str}': {e}"))?;

    let end_addr = parse_range_end_addr(end_str.trim(), &start_addr, s)?;

    if u32::from(end_addr) < u32::from(start_addr) {
        return Err(format!("Range end precedes start: {s}"));
    }

    Ok(Some(Ipv4Range::new(start_addr, end_addr)))
}

/// The abbreviated end (`-50`, `-2.66`) replaces the trailing octets of the start.
fn parse_range_end_addr(end_str: &str, start_addr: &Ipv4Addr, original_s: &str) -> Result<Ipv4Addr, String> {
    if let Ok(full_addr) = end_str.parse::<Ipv4Addr>() {
        return Ok(full_addr);
    }

    if end_str.is_empty() {
        return Err(format!("End range cannot be empty: {original_s}"));
    }

    let partial_octets: Vec<u8> = end_str
        .split('.')
        .map(|octet_str| octet_str.parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|e| format!("Invalid end range '{end_str}': {e}"))?;

    if partial_octets.len() > 4 {
        return Err(format!("End range has too many octets: {end_str}"));
    }

    let mut end_octets = start_addr.octets();
    let start_index = 4 - partial_octets.len();
    end_octets[start_index..].copy_from_slice(&partial_octets);

    Ok(Ipv4Addr::from(end_octets))
}

fn parse_cidr_range(s: &str) -> Result<Option<Ipv4Range>, String> {
    let Some((ip_str, prefix_str)) = s.split_once('/') else {
        return Ok(None);
    };

    let ipv4_addr = ip_str
        .parse::<Ipv4Addr>()
        .map_err(|e| format!("Invalid IP in CIDR '{ip_str}': {e}"))?;

    let prefix = prefix_str
        .parse::<u8>()
        .map_err(|e| format!("Invalid prefix in CIDR '{prefix_str}': {e}"))?;

    range::cidr_range(ipv4_addr, prefix)
        .map(Some)
        .map_err(|e| e.to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
