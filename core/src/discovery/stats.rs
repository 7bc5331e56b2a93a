use std::cmp::Ordering;

use lanward_common::models::{DeviceRecord, Stats};

const LOW_LATENCY_MS: f64 = 10.0;

/// Domain members first, then fastest first. Ties keep their input order.
pub fn sort_devices(mut devices: Vec<DeviceRecord>) -> Vec<DeviceRecord> {
    devices.sort_by(|a, b| {
        b.in_domain
            .cmp(&a.in_domain)
            .then_with(|| a.latency_ms.partial_cmp(&b.latency_ms).unwrap_or(Ordering::Equal))
    });
    devices
}

pub fn compute_stats(devices: &[DeviceRecord]) -> Stats {
    let total = devices.len();
    if total == 0 {
        return Stats::default();
    }

    let mut stats = Stats {
        total,
        ..Stats::default()
    };

    let mut latency_sum = 0.0;
    for device in devices {
        if device.in_domain {
            stats.in_domain_count += 1;
        }
        *stats.vendor_distribution.entry(device.vendor.clone()).or_default() += 1;
        *stats
            .type_distribution
            .entry(device.device_type.label().to_string())
            .or_default() += 1;

        latency_sum += device.latency_ms;
        if device.latency_ms < LOW_LATENCY_MS {
            stats.low_latency_count += 1;
        }
    }

    stats.average_latency_ms = latency_sum / total as f64;
    stats.low_latency_pct = ((stats.low_latency_count as f64 / total as f64) * 100.0).round() as u8;
    stats
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
