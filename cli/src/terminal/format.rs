use colored::*;

use lanward_common::models::{DeviceRecord, NetworkInfo, ScanRecord, Stats};

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn device_details(device: &DeviceRecord) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        (String::from("IPv4"), device.ip.to_string().color(colors::IPV4_ADDR)),
        (String::from("MAC"), device.mac.color(colors::MAC_ADDR)),
        (String::from("Vendor"), device.vendor.color(colors::VENDOR)),
        (String::from("Type"), device.device_type.label().normal()),
        (String::from("Latency"), latency(device.latency_ms)),
    ];

    if let Some(hostname) = &device.hostname {
        details.insert(0, (String::from("Hostname"), hostname.normal()));
    }

    if device.in_domain {
        let services = device
            .domain_signals
            .as_deref()
            .filter(|services| !services.is_empty())
            .map(|services| format!("yes ({})", services.join(", ")))
            .unwrap_or_else(|| String::from("yes"));
        details.push((String::from("Domain"), services.color(colors::DOMAIN)));
    }

    if let Some(error) = &device.metadata.enrichment_error {
        details.push((String::from("Note"), error.color(colors::WARNING)));
    }

    details
}

pub fn network_details(network: &NetworkInfo) -> Vec<Detail> {
    let range = &network.range;
    vec![
        (String::from("Interface"), network.interface_name.normal()),
        (
            String::from("Address"),
            format!("{}/{}", network.local_ip, network.prefix_length).color(colors::IPV4_ADDR),
        ),
        (
            String::from("Hosts"),
            format!("{} - {} ({})", range.first_host, range.last_host, range.total_hosts).normal(),
        ),
    ]
}

pub fn summary_line(stats: &Stats, duration_ms: u64) -> ColoredString {
    format!(
        "{} hosts, {} in domain, avg {:.1} ms, scanned in {:.2}s",
        stats.total,
        stats.in_domain_count,
        stats.average_latency_ms,
        duration_ms as f64 / 1000.0
    )
    .bold()
    .green()
}

pub fn history_line(record: &ScanRecord) -> String {
    let outcome: ColoredString = if record.succeeded {
        "ok".green()
    } else {
        "failed".red()
    };
    format!(
        "#{} {} {} devices in {} ms [{}]",
        record.scan_id,
        record.timestamp.format("%H:%M:%S"),
        record.device_count,
        record.duration_ms,
        outcome
    )
}

fn latency(ms: f64) -> ColoredString {
    let text = format!("{ms:.1} ms");
    if ms < 10.0 {
        text.green()
    } else if ms < 100.0 {
        text.yellow()
    } else {
        text.red()
    }
}
