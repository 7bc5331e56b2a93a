use std::collections::BTreeMap;

use serde::Serialize;

/// Aggregate view over one scan's device list. Recomputed from scratch for
/// every scan, never patched.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub in_domain_count: usize,
    pub vendor_distribution: BTreeMap<String, usize>,
    pub type_distribution: BTreeMap<String, usize>,
    pub average_latency_ms: f64,
    /// Devices answering in under 10 ms.
    pub low_latency_count: usize,
    pub low_latency_pct: u8,
}
