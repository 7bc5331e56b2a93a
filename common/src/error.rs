use thiserror::Error;

/// Scan-level failures. Anything below this level is downgraded to a default
/// value where it happens and never reaches the caller.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid scan options: {0}")]
    InvalidOptions(String),

    #[error("failed to read network topology: {0}")]
    Topology(#[source] anyhow::Error),

    #[error("failed to harvest neighbor table: {0}")]
    Harvest(#[source] anyhow::Error),

    #[error("scan task aborted: {0}")]
    Aborted(String),
}

impl ScanError {
    /// Stable machine-readable code for the failure result.
    pub fn code(&self) -> &'static str {
        match self {
            ScanError::InvalidOptions(_) => "INVALID_OPTIONS",
            ScanError::Topology(_) => "TOPOLOGY_FAILED",
            ScanError::Harvest(_) => "HARVEST_FAILED",
            ScanError::Aborted(_) => "SCAN_ABORTED",
        }
    }
}
