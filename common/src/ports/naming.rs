use std::net::Ipv4Addr;

use async_trait::async_trait;

/// One hostname resolution method (reverse DNS, NetBIOS, mDNS, ...).
#[async_trait]
pub trait NameSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// `Ok(None)` when the method ran but found nothing.
    async fn try_resolve(&self, ip: Ipv4Addr) -> anyhow::Result<Option<String>>;
}
