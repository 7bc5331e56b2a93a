use crate::models::NetworkInfo;

pub trait TopologyReader: Send + Sync {
    /// `Ok(None)` when no qualifying interface exists.
    fn read(&self) -> anyhow::Result<Option<NetworkInfo>>;
}
