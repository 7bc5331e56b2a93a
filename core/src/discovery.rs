//! # Network Discovery Service
//!
//! Implements the "scan the local segment" use case.
//!
//! One scan walks the stages of [`ScanStage`] strictly in order:
//! 1. **Topology**: which interface and subnet we are on.
//! 2. **Harvest**: IP/MAC candidates from the neighbor table.
//! 3. **Probe**: which candidates answer, in bounded batches.
//! 4. **Enrich**: hostname, vendor, class and domain membership per live host.
//! 5. **Summarize**: sort, compute [`Stats`], append to the rolling history.
//!
//! Every collaborator sits behind a port trait, so the service itself never
//! touches a socket or a process.

mod enrich;
mod history;
mod stats;

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::Utc;
use futures::FutureExt;
use tracing::{Instrument, error, info, info_span};

use lanward_common::config::Config;
use lanward_common::error::ScanError;
use lanward_common::models::{
    DeviceRecord, FailureDetail, NetworkInfo, ScanFailure, ScanInfo, ScanOptions, ScanOutcome, ScanRecord,
    ScanReport, ScanStage, Stats, SystemInfo,
};
use lanward_common::network::target::AddressRange;
use lanward_common::ports::{LivenessProbe, NeighborSource, PortProber, TopologyReader};

use crate::liveness::{self, PingProbe, ProbeSettings};
use crate::neighbors::SystemNeighborTable;
use crate::network::tcp::TcpConnectProber;
use crate::system;
use crate::topology::SystemTopology;

pub use enrich::{Enricher, INCOMPLETE, enrich_all};
pub use history::ScanHistory;
pub use stats::{compute_stats, sort_devices};

const MIN_TIMEOUT_MS: u64 = 100;
const MAX_TIMEOUT_MS: u64 = 30_000;

/// The outbound adapters a [`DiscoveryService`] drives.
pub struct Collaborators {
    pub topology: Box<dyn TopologyReader>,
    pub neighbors: Box<dyn NeighborSource>,
    pub liveness: Box<dyn LivenessProbe>,
    pub enricher: Enricher,
}

impl Collaborators {
    /// The real thing: `ip neigh`, `ping`, DNS/NetBIOS/mDNS and TCP connect.
    pub fn system(config: &Config) -> Self {
        let prober: Arc<dyn PortProber> = Arc::new(TcpConnectProber);
        Self {
            topology: Box::new(SystemTopology),
            neighbors: Box::new(SystemNeighborTable::new(config.neighbor_timeout)),
            liveness: Box::new(PingProbe),
            enricher: Enricher::from_config(config, prober),
        }
    }
}

/// Application service running scans and keeping their history.
pub struct DiscoveryService {
    config: Config,
    topology: Box<dyn TopologyReader>,
    neighbors: Box<dyn NeighborSource>,
    liveness: Box<dyn LivenessProbe>,
    enricher: Arc<Enricher>,
    history: ScanHistory,
    last_scan_id: AtomicU64,
}

struct Summary {
    network: Option<NetworkInfo>,
    devices: Vec<DeviceRecord>,
    stats: Stats,
}

impl DiscoveryService {
    pub fn new(config: Config, collaborators: Collaborators) -> Self {
        Self {
            history: ScanHistory::new(config.history_capacity),
            topology: collaborators.topology,
            neighbors: collaborators.neighbors,
            liveness: collaborators.liveness,
            enricher: Arc::new(collaborators.enricher),
            last_scan_id: AtomicU64::new(0),
            config,
        }
    }

    pub fn with_system(config: Config) -> Self {
        let collaborators = Collaborators::system(&config);
        Self::new(config, collaborators)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs one complete scan.
    ///
    /// Never fails: systemic problems come back as [`ScanOutcome::Failed`]
    /// carrying a stable error code, and both outcomes land in the history.
    pub async fn perform_scan(&self, options: ScanOptions) -> ScanOutcome {
        let scan_id = self.next_scan_id();
        let started = Instant::now();
        let timestamp = Utc::now();

        let span = info_span!("scan", id = scan_id);
        span.in_scope(|| enter(ScanStage::Idle));
        let pipeline = AssertUnwindSafe(self.run_pipeline(&options)).catch_unwind();
        let result = match pipeline.instrument(span.clone()).await {
            Ok(result) => result,
            Err(_panic) => Err(ScanError::Aborted(String::from("scan pipeline panicked"))),
        };
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let _entered = span.enter();
        match result {
            Ok(summary) => {
                info!(
                    "{} stage: {} devices in {duration_ms} ms",
                    ScanStage::Done,
                    summary.devices.len()
                );
                self.history.push(ScanRecord {
                    scan_id,
                    timestamp,
                    duration_ms,
                    device_count: summary.devices.len(),
                    succeeded: true,
                    stats: summary.stats.clone(),
                });
                ScanOutcome::Completed(ScanReport {
                    network: summary.network,
                    devices: summary.devices,
                    stats: summary.stats,
                    scan_info: ScanInfo {
                        id: scan_id,
                        duration_ms,
                        timestamp,
                    },
                })
            }
            Err(err) => {
                error!("{} stage: {err}", ScanStage::Failed);
                self.history.push(ScanRecord {
                    scan_id,
                    timestamp,
                    duration_ms,
                    device_count: 0,
                    succeeded: false,
                    stats: Stats::default(),
                });
                ScanOutcome::Failed(ScanFailure {
                    error: FailureDetail {
                        message: err.to_string(),
                        code: err.code().to_string(),
                        scan_id,
                    },
                })
            }
        }
    }

    /// Finished scans, most recent first.
    pub fn scan_history(&self) -> Vec<ScanRecord> {
        self.history.snapshot()
    }

    pub fn system_info(&self) -> SystemInfo {
        system::system_info(self.history.len())
    }

    async fn run_pipeline(&self, options: &ScanOptions) -> Result<Summary, ScanError> {
        let (probe_timeout, range) = self.validate(options)?;

        enter(ScanStage::CollectingTopology);
        let network = self.topology.read().map_err(ScanError::Topology)?;
        match &network {
            Some(net) => info!("Using {} ({}/{})", net.interface_name, net.local_ip, net.prefix_length),
            None => info!("No qualifying LAN interface found"),
        }

        enter(ScanStage::Harvesting);
        let mut candidates = self.neighbors.harvest().await.map_err(ScanError::Harvest)?;
        if let Some(range) = &range {
            candidates.retain(|candidate| range.contains(&candidate.ip));
        }
        candidates.truncate(self.config.max_candidates);

        enter(ScanStage::Probing);
        let settings = ProbeSettings {
            concurrency: self.config.probe_concurrency,
            timeout: probe_timeout,
            retries: self.config.probe_retries,
            pause: self.config.batch_pause,
        };
        let live: Vec<_> = liveness::probe_all(self.liveness.as_ref(), candidates, settings)
            .await
            .into_iter()
            .filter(|result| result.alive)
            .collect();

        enter(ScanStage::Enriching);
        let devices = enrich_all(Arc::clone(&self.enricher), live).await;

        enter(ScanStage::Summarizing);
        let devices = sort_devices(devices);
        let stats = compute_stats(&devices);

        Ok(Summary {
            network,
            devices,
            stats,
        })
    }

    fn validate(&self, options: &ScanOptions) -> Result<(Duration, Option<AddressRange>), ScanError> {
        let timeout = match options.timeout_ms {
            Some(ms) if (MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&ms) => Duration::from_millis(ms),
            Some(ms) => {
                return Err(ScanError::InvalidOptions(format!(
                    "timeout {ms} ms outside {MIN_TIMEOUT_MS}..={MAX_TIMEOUT_MS}"
                )));
            }
            None => self.config.probe_timeout,
        };

        let range = options
            .address_range
            .as_deref()
            .map(|raw| {
                raw.parse::<AddressRange>()
                    .map_err(|e| ScanError::InvalidOptions(format!("address range '{raw}': {e}")))
            })
            .transpose()?;

        Ok((timeout, range))
    }

    /// Epoch millis, bumped past the previous id when two scans share a millisecond.
    fn next_scan_id(&self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let mut issued = now;
        let _ = self.last_scan_id.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            issued = now.max(last + 1);
            Some(issued)
        });
        issued
    }
}

fn enter(stage: ScanStage) {
    info!("{stage} stage");
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
