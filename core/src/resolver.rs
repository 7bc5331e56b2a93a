//! # Hostname Resolution
//!
//! Tries each [`NameSource`] in order under its own deadline and keeps the
//! first usable answer. Reverse DNS, NetBIOS node status and mDNS are the
//! system sources.

mod mdns;
mod netbios;
mod reverse_dns;

use std::net::Ipv4Addr;
use std::time::Duration;

use tracing::debug;

use lanward_common::ports::NameSource;

pub use mdns::MdnsReverse;
pub use netbios::NetbiosStatus;
pub use reverse_dns::ReverseDns;

pub struct NameResolver {
    sources: Vec<Box<dyn NameSource>>,
}

impl NameResolver {
    pub fn new(sources: Vec<Box<dyn NameSource>>) -> Self {
        Self { sources }
    }

    /// Reverse DNS, then NetBIOS, then mDNS.
    pub fn system() -> Self {
        Self::new(vec![
            Box::new(ReverseDns::from_system()),
            Box::new(NetbiosStatus),
            Box::new(MdnsReverse),
        ])
    }

    /// A resolver that never finds anything.
    pub fn disabled() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// First non-empty name that is not just the address itself.
    ///
    /// Errors and overruns of `per_method` only move on to the next source.
    pub async fn resolve(&self, ip: Ipv4Addr, per_method: Duration) -> Option<String> {
        let literal = ip.to_string();

        for source in &self.sources {
            match tokio::time::timeout(per_method, source.try_resolve(ip)).await {
                Ok(Ok(Some(name))) => {
                    let name = name.trim();
                    if !name.is_empty() && name != literal {
                        debug!("{ip} resolved to {name} via {}", source.name());
                        return Some(name.to_string());
                    }
                }
                Ok(Ok(None)) => {}
                Ok(Err(e)) => debug!("{} lookup for {ip} failed: {e}", source.name()),
                Err(_elapsed) => debug!("{} lookup for {ip} timed out", source.name()),
            }
        }

        None
    }
}

/// Leading label of a hostname.
pub fn short_name(hostname: &str) -> &str {
    hostname.split_once('.').map_or(hostname, |(label, _)| label)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
