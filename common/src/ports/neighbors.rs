use async_trait::async_trait;

use crate::models::Candidate;

/// Source of IP/MAC candidates (the OS neighbor/ARP table).
#[async_trait]
pub trait NeighborSource: Send + Sync {
    /// Returns deduplicated, private-range candidates.
    ///
    /// Implementations swallow command failures and return an empty list; an
    /// `Err` means something unexpected and fails the whole scan.
    async fn harvest(&self) -> anyhow::Result<Vec<Candidate>>;
}
