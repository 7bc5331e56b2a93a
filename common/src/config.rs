use std::time::Duration;

/// Domain-service TCP ports probed by the port threshold signal:
/// LDAP, LDAPS, Kerberos, SMB, MS-RPC.
pub const DEFAULT_DOMAIN_PORTS: [u16; 5] = [389, 636, 88, 445, 135];

/// Tunables for a scan pass.
///
/// Defaults mirror the values the pipeline has always shipped with. Use
/// [`Config::from_env`] to pick up environment overrides.
#[derive(Debug, Clone)]
pub struct Config {
    /// Hosts probed in parallel per liveness batch.
    pub probe_concurrency: usize,
    /// Per-probe liveness timeout.
    pub probe_timeout: Duration,
    /// Echo requests per liveness probe.
    pub probe_retries: u8,
    /// Pause between two liveness batches.
    pub batch_pause: Duration,
    /// Hard timeout for the neighbor table command.
    pub neighbor_timeout: Duration,
    /// Timeout applied to every name resolution method.
    pub resolve_timeout: Duration,
    /// Upper bound of candidates handed to the prober.
    pub max_candidates: usize,
    /// Scan records kept in the rolling history.
    pub history_capacity: usize,
    /// Suffix a hostname must contain to count as a domain member.
    pub domain_suffix: String,
    pub domain_ports: Vec<u16>,
    pub domain_check_enabled: bool,
    /// Disables every name resolution method.
    pub no_dns: bool,
    /// Falls back to the bundled IEEE OUI registry for unknown prefixes.
    pub extended_vendor_db: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_concurrency: 10,
            probe_timeout: Duration::from_millis(1_000),
            probe_retries: 1,
            batch_pause: Duration::from_millis(100),
            neighbor_timeout: Duration::from_secs(3),
            resolve_timeout: Duration::from_millis(1_000),
            max_candidates: 100,
            history_capacity: 10,
            domain_suffix: String::from("local"),
            domain_ports: DEFAULT_DOMAIN_PORTS.to_vec(),
            domain_check_enabled: true,
            no_dns: false,
            extended_vendor_db: false,
        }
    }
}

impl Config {
    /// Builds the default configuration and applies environment overrides.
    ///
    /// * `LANWARD_DOMAIN_SUFFIX` (or the legacy `DOMAIN_SUFFIX`)
    /// * `LANWARD_NO_DNS` (`1`/`true`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(suffix) = lookup("LANWARD_DOMAIN_SUFFIX").or_else(|| lookup("DOMAIN_SUFFIX")) {
            cfg.domain_suffix = suffix.trim().to_string();
        }

        if let Some(flag) = lookup("LANWARD_NO_DNS") {
            cfg.no_dns = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        cfg
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
