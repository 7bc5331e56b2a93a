use pnet::datalink::{self, NetworkInterface};
use sysinfo::{System, SystemExt};

use lanward_common::models::{InterfaceSummary, SystemInfo};

/// Snapshot of the host the scanner runs on.
pub fn system_info(history_size: usize) -> SystemInfo {
    let mut sys = System::new();
    sys.refresh_memory();
    sys.refresh_cpu();

    let load = sys.load_average();

    SystemInfo {
        hostname: sys.host_name().unwrap_or_default(),
        platform: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        cpu_count: sys.cpus().len(),
        total_memory: sys.total_memory(),
        free_memory: sys.free_memory(),
        uptime_sec: sys.uptime(),
        load_avg: [load.one, load.five, load.fifteen],
        network_interfaces: datalink::interfaces().iter().map(summarize).collect(),
        history_size,
    }
}

fn summarize(interface: &NetworkInterface) -> InterfaceSummary {
    InterfaceSummary {
        name: interface.name.clone(),
        mac: interface.mac.map(|mac| mac.to_string().to_ascii_uppercase()),
        addresses: interface.ips.iter().map(|net| net.to_string()).collect(),
        is_up: interface.is_up(),
        is_loopback: interface.is_loopback(),
    }
}
