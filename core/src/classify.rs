//! Device type heuristics over vendor, hostname and address.

use std::net::Ipv4Addr;

use lanward_common::models::DeviceClass;

/// Hostname keywords that match anywhere in the name.
const SUBSTRING_RULES: &[(&[&str], DeviceClass)] = &[
    (&["router", "gateway"], DeviceClass::RouterGateway),
    (&["server", "srv"], DeviceClass::Server),
    (&["nas", "storage"], DeviceClass::Nas),
    (&["printer", "print"], DeviceClass::Printer),
    (&["switch"], DeviceClass::Switch),
    (&["accesspoint", "access-point"], DeviceClass::AccessPoint),
    (&["camera"], DeviceClass::Camera),
    (&["phone", "android", "iphone"], DeviceClass::Phone),
    (&["smarttv", "tv"], DeviceClass::SmartTv),
];

/// Abbreviations that only count as a whole hostname token (`sw-03`, `ap2`),
/// so `laptop` is not an access point.
const TOKEN_RULES: &[(&str, DeviceClass)] = &[
    ("sw", DeviceClass::Switch),
    ("ap", DeviceClass::AccessPoint),
    ("cam", DeviceClass::Camera),
];

const VIRTUAL_MARKERS: &[&str] = &["qemu", "virtual", "vmware", "virtualbox"];
const PC_VENDORS: &[&str] = &["dell", "hewlett", "lenovo"];

/// First matching rule wins: gateway address, vendor family, hostname
/// keywords, then vendor fallbacks.
pub fn classify(vendor: &str, hostname: Option<&str>, ip: &Ipv4Addr) -> DeviceClass {
    let last_octet = ip.octets()[3];
    if last_octet == 1 || last_octet == 254 {
        return DeviceClass::RouterGateway;
    }

    let vendor = vendor.to_ascii_lowercase();
    let hostname = hostname.unwrap_or_default().to_ascii_lowercase();

    if vendor.contains("raspberry") {
        return DeviceClass::RaspberryPi;
    }
    if VIRTUAL_MARKERS.iter().any(|marker| vendor.contains(marker)) {
        return DeviceClass::VirtualMachine;
    }

    if let Some(class) = class_from_hostname(&hostname) {
        return class;
    }

    if vendor.contains("apple") {
        return DeviceClass::AppleDevice;
    }
    if is_pc_vendor(&vendor) {
        return if hostname.contains("laptop") || hostname.contains("notebook") {
            DeviceClass::Laptop
        } else {
            DeviceClass::Desktop
        };
    }

    DeviceClass::Generic
}

fn class_from_hostname(hostname: &str) -> Option<DeviceClass> {
    if hostname.is_empty() {
        return None;
    }

    let substring = SUBSTRING_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| hostname.contains(k)))
        .map(|(_, class)| *class);

    substring.or_else(|| {
        let tokens: Vec<&str> = hostname
            .split(|c: char| !c.is_ascii_alphanumeric())
            .map(|token| token.trim_end_matches(|c: char| c.is_ascii_digit()))
            .filter(|token| !token.is_empty())
            .collect();

        TOKEN_RULES
            .iter()
            .find(|(keyword, _)| tokens.contains(keyword))
            .map(|(_, class)| *class)
    })
}

fn is_pc_vendor(vendor: &str) -> bool {
    PC_VENDORS.iter().any(|v| vendor.contains(v))
        || vendor
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|token| token == "hp")
}
