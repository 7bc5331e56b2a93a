//! Neighbor table harvesting (`ip neigh show`, or `arp -an` on BSD/macOS).

use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use lanward_common::models::Candidate;
use lanward_common::network::{ip, mac};
use lanward_common::ports::NeighborSource;

use crate::command;

const MIN_TOKENS: usize = 5;

/// Output dialect of the neighbor table command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// `192.168.1.1 dev eth0 lladdr aa:bb:cc:dd:ee:ff REACHABLE`
    IpNeigh,
    /// `? (192.168.1.1) at aa:bb:cc:dd:ee:ff on en0 ifscope [ethernet]`
    BsdArp,
}

impl TableFormat {
    pub fn native() -> Self {
        if cfg!(target_os = "linux") {
            TableFormat::IpNeigh
        } else {
            TableFormat::BsdArp
        }
    }

    fn command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            TableFormat::IpNeigh => ("ip", &["neigh", "show"]),
            TableFormat::BsdArp => ("arp", &["-an"]),
        }
    }
}

pub struct SystemNeighborTable {
    format: TableFormat,
    timeout: Duration,
}

impl SystemNeighborTable {
    pub fn new(timeout: Duration) -> Self {
        Self {
            format: TableFormat::native(),
            timeout,
        }
    }
}

#[async_trait]
impl NeighborSource for SystemNeighborTable {
    async fn harvest(&self) -> anyhow::Result<Vec<Candidate>> {
        let (program, args) = self.format.command();
        let stdout = match command::run(program, args, self.timeout).await {
            Ok(stdout) => stdout,
            Err(e) => {
                warn!("Neighbor table unavailable, continuing without candidates: {e}");
                return Ok(Vec::new());
            }
        };

        let candidates = parse_neighbor_table(&stdout, self.format, Utc::now());
        info!("Found {} candidates in the neighbor table", candidates.len());
        Ok(candidates)
    }
}

/// Turns raw neighbor table output into candidates.
///
/// A line qualifies with at least five tokens, a parsable private IPv4, and a
/// non-zero MAC. The first qualifying line per IP wins.
pub fn parse_neighbor_table(output: &str, format: TableFormat, observed_at: DateTime<Utc>) -> Vec<Candidate> {
    let mut seen: HashSet<Ipv4Addr> = HashSet::new();

    output
        .lines()
        .filter_map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < MIN_TOKENS {
                return None;
            }
            match format {
                TableFormat::IpNeigh => from_ip_neigh(&tokens, observed_at),
                TableFormat::BsdArp => from_bsd_arp(&tokens, observed_at),
            }
        })
        .filter(|candidate| ip::is_private_v4(&candidate.ip))
        .filter(|candidate| seen.insert(candidate.ip))
        .collect()
}

fn from_ip_neigh(tokens: &[&str], observed_at: DateTime<Utc>) -> Option<Candidate> {
    let ip: Ipv4Addr = tokens[0].parse().ok()?;
    let mac = qualified_mac(tokens[4])?;
    let state = if tokens.len() > MIN_TOKENS {
        tokens[tokens.len() - 1]
    } else {
        "unknown"
    };

    Some(Candidate {
        ip,
        mac,
        interface_name: tokens[2].to_string(),
        neighbor_state: state.to_string(),
        observed_at,
    })
}

fn from_bsd_arp(tokens: &[&str], observed_at: DateTime<Utc>) -> Option<Candidate> {
    let ip: Ipv4Addr = tokens[1]
        .trim_start_matches('(')
        .trim_end_matches(')')
        .parse()
        .ok()?;
    let mac = qualified_mac(tokens[3])?;
    let interface_name = tokens.get(5)?;

    Some(Candidate {
        ip,
        mac,
        interface_name: interface_name.to_string(),
        neighbor_state: String::from("unknown"),
        observed_at,
    })
}

fn qualified_mac(raw: &str) -> Option<String> {
    let normalized = mac::normalize(raw)?;
    (!mac::is_zero(&normalized)).then_some(normalized)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
