use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceSummary {
    pub name: String,
    pub mac: Option<String>,
    pub addresses: Vec<String>,
    pub is_up: bool,
    pub is_loopback: bool,
}

/// Snapshot of the host running the scanner.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub hostname: String,
    pub platform: String,
    pub arch: String,
    pub cpu_count: usize,
    /// Bytes.
    pub total_memory: u64,
    /// Bytes.
    pub free_memory: u64,
    pub uptime_sec: u64,
    pub load_avg: [f64; 3],
    pub network_interfaces: Vec<InterfaceSummary>,
    pub history_size: usize,
}
