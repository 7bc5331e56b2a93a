//! # Vendor Lookup
//!
//! MAC prefix (OUI) to manufacturer name. A small built-in table covers the
//! devices that matter for classification; the IEEE registry bundled with
//! `mac_oui` can be layered behind it.

use std::collections::HashMap;
use std::sync::OnceLock;

use mac_oui::Oui;

use lanward_common::config::Config;
use lanward_common::models::UNKNOWN_VENDOR;
use lanward_common::network::mac;
use lanward_common::ports::VendorRepository;

const OUI_TABLE: &[(&str, &str)] = &[
    // Single board computers
    ("B827EB", "Raspberry Pi Foundation"),
    ("DCA632", "Raspberry Pi Trading"),
    ("E45F01", "Raspberry Pi Trading"),
    ("2CCF67", "Raspberry Pi Trading"),
    ("D83ADD", "Raspberry Pi Trading"),
    ("28CDC1", "Raspberry Pi Trading"),
    // Hypervisors
    ("000C29", "VMware"),
    ("005056", "VMware"),
    ("000569", "VMware"),
    ("001C14", "VMware"),
    ("080027", "Oracle VirtualBox"),
    ("525400", "QEMU Virtual NIC"),
    ("00155D", "Microsoft Hyper-V Virtual"),
    // Computers
    ("000393", "Apple"),
    ("000A95", "Apple"),
    ("0016CB", "Apple"),
    ("0017F2", "Apple"),
    ("001B63", "Apple"),
    ("001EC2", "Apple"),
    ("0023DF", "Apple"),
    ("3C0754", "Apple"),
    ("AC87A3", "Apple"),
    ("001422", "Dell"),
    ("0024E8", "Dell"),
    ("14FEB5", "Dell"),
    ("B8AC6F", "Dell"),
    ("F8B156", "Dell"),
    ("D4BED9", "Dell"),
    ("001438", "HP"),
    ("0017A4", "HP"),
    ("3C4A92", "HP"),
    ("9457A5", "HP"),
    ("8C1645", "Lenovo"),
    ("98FA9B", "Lenovo"),
    ("6C4B90", "Lenovo"),
    ("001B21", "Intel"),
    ("3C970E", "Intel"),
    ("A0369F", "Intel"),
    ("001A92", "ASUS"),
    ("2C56DC", "ASUS"),
    ("AC220B", "ASUS"),
    ("002590", "Supermicro"),
    ("0CC47A", "Supermicro"),
    ("AC1F6B", "Supermicro"),
    ("00E04C", "Realtek"),
    // Network gear
    ("00000C", "Cisco"),
    ("000142", "Cisco"),
    ("001B54", "Cisco"),
    ("50C7BF", "TP-Link"),
    ("14CC20", "TP-Link"),
    ("F4F26D", "TP-Link"),
    ("98DAC4", "TP-Link"),
    ("00146C", "Netgear"),
    ("00223F", "Netgear"),
    ("A040A0", "Netgear"),
    ("C03F0E", "Netgear"),
    ("0418D6", "Ubiquiti"),
    ("24A43C", "Ubiquiti"),
    ("802AA8", "Ubiquiti"),
    ("F09FC2", "Ubiquiti"),
    ("788A20", "Ubiquiti"),
    ("000B86", "Aruba"),
    ("24DEC6", "Aruba"),
    ("00E0FC", "Huawei"),
    ("001882", "Huawei"),
    ("286ED4", "Huawei"),
    // Storage
    ("001132", "Synology"),
    ("245EBE", "QNAP"),
    ("00089B", "QNAP"),
    // Printers
    ("008077", "Brother"),
    ("001BA9", "Brother"),
    ("30055C", "Brother"),
    ("000085", "Canon"),
    ("888717", "Canon"),
    ("0026AB", "Epson"),
    ("64EB8C", "Epson"),
    // Consumer and IoT
    ("0000F0", "Samsung"),
    ("001632", "Samsung"),
    ("8425DB", "Samsung"),
    ("3C5AB4", "Google"),
    ("F4F5D8", "Google"),
    ("54600A", "Google"),
    ("0C47C9", "Amazon"),
    ("44650D", "Amazon"),
    ("F0272D", "Amazon"),
    ("74C246", "Amazon"),
    ("240AC4", "Espressif"),
    ("30AEA4", "Espressif"),
    ("84F3EB", "Espressif"),
    ("A4CF12", "Espressif"),
    ("286C07", "Xiaomi"),
    ("64B473", "Xiaomi"),
    ("000E58", "Sonos"),
    ("5CAAFD", "Sonos"),
    ("949F3E", "Sonos"),
    // Cameras
    ("4CBD8F", "Hikvision"),
    ("C056E3", "Hikvision"),
];

static TABLE_INDEX: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

fn table_index() -> &'static HashMap<&'static str, &'static str> {
    TABLE_INDEX.get_or_init(|| OUI_TABLE.iter().copied().collect())
}

fn oui_db() -> Option<&'static Oui> {
    OUI_DB.get_or_init(|| Oui::default().ok()).as_ref()
}

/// Vendor from the built-in table, or [`UNKNOWN_VENDOR`].
///
/// Separators and case in `mac` are ignored.
pub fn vendor_of(mac: &str) -> String {
    StaticOuiRepo
        .get_vendor(mac)
        .unwrap_or_else(|| UNKNOWN_VENDOR.to_string())
}

pub struct StaticOuiRepo;

impl VendorRepository for StaticOuiRepo {
    fn get_vendor(&self, mac: &str) -> Option<String> {
        let prefix = mac::oui_prefix(mac)?;
        table_index().get(prefix.as_str()).map(|vendor| vendor.to_string())
    }
}

/// IEEE registry shipped with `mac_oui`.
pub struct MacOuiRepo;

impl VendorRepository for MacOuiRepo {
    fn get_vendor(&self, mac: &str) -> Option<String> {
        let normalized = mac::normalize(mac)?;
        match oui_db()?.lookup_by_mac(&normalized) {
            Ok(Some(entry)) => Some(entry.company_name.clone()),
            _ => None,
        }
    }
}

/// Repositories asked in order; the first hit wins.
pub struct VendorCatalog {
    repos: Vec<Box<dyn VendorRepository>>,
}

impl VendorCatalog {
    pub fn new(repos: Vec<Box<dyn VendorRepository>>) -> Self {
        Self { repos }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut repos: Vec<Box<dyn VendorRepository>> = vec![Box::new(StaticOuiRepo)];
        if config.extended_vendor_db {
            repos.push(Box::new(MacOuiRepo));
        }
        Self::new(repos)
    }

    pub fn vendor_of(&self, mac: &str) -> String {
        self.repos
            .iter()
            .find_map(|repo| repo.get_vendor(mac))
            .unwrap_or_else(|| UNKNOWN_VENDOR.to_string())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
