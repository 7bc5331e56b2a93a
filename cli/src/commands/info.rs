use colored::*;

use lanward_common::config::Config;
use lanward_common::models::SystemInfo;
use lanward_core::DiscoveryService;

use crate::terminal::{colors, print};

pub fn info(cfg: Config, json: bool) -> anyhow::Result<()> {
    let info: SystemInfo = DiscoveryService::with_system(cfg).system_info();

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    print_local_system(&info);
    print_network_interfaces(&info);
    print::end_of_program();
    Ok(())
}

fn print_local_system(info: &SystemInfo) {
    print::aligned_line("Hostname", info.hostname.as_str());
    print::aligned_line("Platform", format!("{} ({})", info.platform, info.arch));
    print::aligned_line("CPUs", info.cpu_count.to_string());
    print::aligned_line(
        "Memory",
        format!("{} free of {}", human_bytes(info.free_memory), human_bytes(info.total_memory)),
    );
    print::aligned_line("Uptime", human_uptime(info.uptime_sec));
    print::aligned_line(
        "Load",
        format!("{:.2} {:.2} {:.2}", info.load_avg[0], info.load_avg[1], info.load_avg[2]),
    );
}

fn print_network_interfaces(info: &SystemInfo) {
    print::header("network interfaces");

    let interfaces: Vec<_> = info.network_interfaces.iter().filter(|intf| !intf.is_loopback).collect();
    for (idx, intf) in interfaces.iter().enumerate() {
        print::tree_head(idx, &intf.name);

        let mut details: Vec<(String, ColoredString)> = intf
            .addresses
            .iter()
            .map(|addr| (String::from("Address"), addr.color(colors::IPV4_ADDR)))
            .collect();
        if let Some(mac) = &intf.mac {
            details.push((String::from("MAC"), mac.color(colors::MAC_ADDR)));
        }
        let state = if intf.is_up { "up".green() } else { "down".red() };
        details.push((String::from("State"), state));

        print::as_tree_one_level(details);
        if idx + 1 != interfaces.len() {
            print::print("");
        }
    }
}

fn human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

fn human_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_scale_to_binary_units() {
        assert_eq!(human_bytes(512), "512.0 B");
        assert_eq!(human_bytes(8 * 1024 * 1024 * 1024), "8.0 GiB");
    }

    #[test]
    fn uptime_omits_zero_days() {
        assert_eq!(human_uptime(3_660), "1h 1m");
        assert_eq!(human_uptime(90_061), "1d 1h 1m");
    }
}
