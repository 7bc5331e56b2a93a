pub mod info;
pub mod scan;

use clap::{Args, Parser, Subcommand};
use lanward_common::config::Config;

#[derive(Parser)]
#[command(name = "lanward")]
#[command(about = "Discover and identify the devices on your local network.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show information about this machine
    #[command(alias = "i")]
    Info {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Discover and enrich the hosts on the local segment
    #[command(alias = "s")]
    Scan(ScanArgs),
}

#[derive(Args)]
pub struct ScanArgs {
    /// Per-probe liveness timeout in milliseconds (100-30000)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Only keep hosts in this address, range (a.b.c.d-e) or CIDR block
    #[arg(short, long)]
    pub range: Option<String>,

    /// Run this many scans back to back and show the rolling history
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,

    /// Skip hostname resolution
    #[arg(long)]
    pub no_dns: bool,

    /// Directory domain suffix hostnames are matched against
    #[arg(long)]
    pub suffix: Option<String>,

    /// Fall back to the full IEEE vendor registry
    #[arg(long)]
    pub vendor_db: bool,
}

impl ScanArgs {
    /// Layers the command line flags over `cfg`.
    pub fn apply(&self, mut cfg: Config) -> Config {
        if self.no_dns {
            cfg.no_dns = true;
        }
        if let Some(suffix) = &self.suffix {
            cfg.domain_suffix = suffix.trim().to_string();
        }
        if self.vendor_db {
            cfg.extended_vendor_db = true;
        }
        cfg
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_flags_override_config() {
        let cli = CommandLine::try_parse_from([
            "lanward", "scan", "--no-dns", "--suffix", "corp.example", "--vendor-db", "--repeat", "3",
        ])
        .unwrap();

        let Commands::Scan(args) = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(args.repeat, 3);

        let cfg = args.apply(Config::default());
        assert!(cfg.no_dns);
        assert!(cfg.extended_vendor_db);
        assert_eq!(cfg.domain_suffix, "corp.example");
    }

    #[test]
    fn repeat_must_be_positive() {
        assert!(CommandLine::try_parse_from(["lanward", "scan", "--repeat", "0"]).is_err());
    }

    #[test]
    fn defaults_leave_config_alone() {
        let cli = CommandLine::try_parse_from(["lanward", "s"]).unwrap();
        let Commands::Scan(args) = cli.command else {
            panic!("expected scan");
        };
        let cfg = args.apply(Config::default());
        assert!(!cfg.no_dns);
        assert_eq!(cfg.domain_suffix, "local");
        assert_eq!(args.timeout, None);
    }
}
