//! Liveness probing over the system `ping` binary, fanned out in bounded batches.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, info};

use lanward_common::models::{Candidate, ProbeResult};
use lanward_common::ports::{LivenessProbe, ProbeOutcome};

use crate::command::{self, CommandError};

/// Slack on top of the probe's own deadline before it is abandoned.
const PROBE_GRACE: Duration = Duration::from_millis(250);

pub struct PingProbe;

#[async_trait]
impl LivenessProbe for PingProbe {
    async fn probe(&self, ip: Ipv4Addr, timeout: Duration, retries: u8) -> anyhow::Result<ProbeOutcome> {
        let count = retries.max(1);
        let count_arg = count.to_string();
        let wait_arg = wait_argument(timeout);
        let target = ip.to_string();
        let args = ["-n", "-c", &count_arg, "-W", &wait_arg, &target];

        let budget = timeout * u32::from(count) + PROBE_GRACE;
        match command::run("ping", &args, budget).await {
            Ok(stdout) => Ok(parse_ping_output(&stdout)),
            Err(CommandError::Failed { stdout, .. }) => Ok(ProbeOutcome {
                alive: false,
                latency_ms: 0.0,
                packet_loss_pct: parse_packet_loss(&stdout).unwrap_or(100.0),
            }),
            Err(CommandError::TimedOut { .. }) => Ok(ProbeOutcome::unreachable()),
            Err(e) => Err(e.into()),
        }
    }
}

/// `-W` is seconds on Linux and milliseconds on BSD/macOS.
fn wait_argument(timeout: Duration) -> String {
    if cfg!(target_os = "linux") {
        timeout.as_secs().max(1).to_string()
    } else {
        timeout.as_millis().max(1).to_string()
    }
}

pub fn parse_ping_output(output: &str) -> ProbeOutcome {
    let packet_loss_pct = parse_packet_loss(output).unwrap_or(100.0);
    let alive = packet_loss_pct < 100.0;
    let latency_ms = if alive {
        parse_average_rtt(output).unwrap_or(0.0)
    } else {
        0.0
    };

    ProbeOutcome {
        alive,
        latency_ms,
        packet_loss_pct,
    }
}

/// Reads `X% packet loss` from the summary line.
pub fn parse_packet_loss(output: &str) -> Option<f64> {
    output.lines().find_map(|line| {
        let idx = line.find("% packet loss")?;
        let head = &line[..idx];
        let start = head
            .rfind(|c: char| !(c.is_ascii_digit() || c == '.'))
            .map_or(0, |i| i + 1);
        head[start..].parse().ok()
    })
}

/// Reads the average from `rtt min/avg/max/mdev = a/b/c/d ms`
/// (`round-trip` on BSD/macOS).
pub fn parse_average_rtt(output: &str) -> Option<f64> {
    output
        .lines()
        .find(|line| line.starts_with("rtt ") || line.starts_with("round-trip "))
        .and_then(|line| line.split_once('='))
        .and_then(|(_, values)| values.trim().split('/').nth(1))
        .and_then(|avg| avg.trim().parse().ok())
}

/// Batch settings for [`probe_all`].
#[derive(Debug, Clone, Copy)]
pub struct ProbeSettings {
    pub concurrency: usize,
    pub timeout: Duration,
    pub retries: u8,
    pub pause: Duration,
}

/// Probes every candidate, at most `concurrency` at a time.
///
/// Output order matches input order. A probe that errors or overruns its
/// deadline is reported unreachable, so the output always has one entry per
/// candidate.
pub async fn probe_all(
    probe: &dyn LivenessProbe,
    candidates: Vec<Candidate>,
    settings: ProbeSettings,
) -> Vec<ProbeResult> {
    let chunk_size = settings.concurrency.max(1);
    let batches = candidates.len().div_ceil(chunk_size);
    let mut results = Vec::with_capacity(candidates.len());

    for (idx, chunk) in candidates.chunks(chunk_size).enumerate() {
        let batch = chunk.iter().cloned().map(|candidate| probe_one(probe, candidate, settings));
        results.extend(join_all(batch).await);

        if batches > 1 && idx + 1 < batches {
            tokio::time::sleep(settings.pause).await;
        }
    }

    let alive = results.iter().filter(|r| r.alive).count();
    info!("{alive} of {} candidates answered", results.len());
    results
}

async fn probe_one(probe: &dyn LivenessProbe, candidate: Candidate, settings: ProbeSettings) -> ProbeResult {
    let deadline = settings.timeout * u32::from(settings.retries.max(1)) + PROBE_GRACE;
    let ip = candidate.ip;

    match tokio::time::timeout(deadline, probe.probe(ip, settings.timeout, settings.retries)).await {
        Ok(Ok(outcome)) => ProbeResult {
            candidate,
            alive: outcome.alive,
            latency_ms: outcome.latency_ms,
            packet_loss_pct: outcome.packet_loss_pct,
            scanned_at: Utc::now(),
        },
        Ok(Err(e)) => {
            debug!("Probe of {ip} failed: {e}");
            ProbeResult::unreachable(candidate)
        }
        Err(_elapsed) => {
            debug!("Probe of {ip} overran {deadline:?}");
            ProbeResult::unreachable(candidate)
        }
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
