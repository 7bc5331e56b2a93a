use std::fmt;
use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Vendor label for prefixes missing from every lookup table.
pub const UNKNOWN_VENDOR: &str = "Unknown";

/// Coarse device category derived from address, vendor and hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeviceClass {
    RouterGateway,
    RaspberryPi,
    VirtualMachine,
    Server,
    Nas,
    Printer,
    Switch,
    AccessPoint,
    Camera,
    Phone,
    SmartTv,
    AppleDevice,
    Laptop,
    Desktop,
    Generic,
    /// Enrichment failed before classification could run.
    Unknown,
}

impl DeviceClass {
    pub fn label(&self) -> &'static str {
        match self {
            DeviceClass::RouterGateway => "Router/Gateway",
            DeviceClass::RaspberryPi => "Raspberry Pi",
            DeviceClass::VirtualMachine => "Virtual Machine",
            DeviceClass::Server => "Server",
            DeviceClass::Nas => "NAS",
            DeviceClass::Printer => "Printer",
            DeviceClass::Switch => "Switch",
            DeviceClass::AccessPoint => "Access Point",
            DeviceClass::Camera => "Camera",
            DeviceClass::Phone => "Phone",
            DeviceClass::SmartTv => "Smart TV",
            DeviceClass::AppleDevice => "Apple Device",
            DeviceClass::Laptop => "Laptop",
            DeviceClass::Desktop => "Desktop",
            DeviceClass::Generic => "Generic Device",
            DeviceClass::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for DeviceClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Active,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceMetadata {
    pub packet_loss_pct: f64,
    pub neighbor_state: String,
    /// Set when enrichment failed and the record only carries minimal fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment_error: Option<String>,
}

/// The unit returned to callers: one per distinct IP per scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    pub ip: Ipv4Addr,
    pub mac: String,
    pub hostname: Option<String>,
    pub display_name: String,
    pub vendor: String,
    pub device_type: DeviceClass,
    pub in_domain: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_signals: Option<Vec<String>>,
    pub interface_name: String,
    pub latency_ms: f64,
    pub status: DeviceStatus,
    pub last_seen_at: DateTime<Utc>,
    pub metadata: DeviceMetadata,
}

/// Display name used when no hostname could be resolved: `host-192-168-1-20`.
pub fn synthesized_name(ip: &Ipv4Addr) -> String {
    format!("host-{}", ip.to_string().replace('.', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesized_name_dashes_every_octet() {
        let ip = Ipv4Addr::new(192, 168, 1, 20);
        assert_eq!(synthesized_name(&ip), "host-192-168-1-20");
    }

    #[test]
    fn device_class_displays_as_label() {
        assert_eq!(DeviceClass::RouterGateway.to_string(), "Router/Gateway");
        assert_eq!(DeviceClass::Generic.to_string(), "Generic Device");
    }
}
