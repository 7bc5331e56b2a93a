use colored::*;

use lanward_common::config::Config;
use lanward_common::models::{ScanOptions, ScanOutcome, ScanReport};
use lanward_core::DiscoveryService;

use crate::commands::ScanArgs;
use crate::terminal::{format, print, spinner};

pub async fn scan(args: &ScanArgs, cfg: Config) -> anyhow::Result<()> {
    let service = DiscoveryService::with_system(cfg);
    let options = ScanOptions {
        timeout_ms: args.timeout,
        address_range: args.range.clone(),
    };

    let mut last: Option<ScanOutcome> = None;
    for round in 1..=args.repeat {
        if !args.json {
            let message = if args.repeat > 1 {
                format!("Scan {round} of {}...", args.repeat)
            } else {
                String::from("Scanning the local segment...")
            };
            spinner::start(&message);
        }

        let outcome = service.perform_scan(options.clone()).await;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            render(&outcome);
        }
        last = Some(outcome);
    }
    spinner::finish();

    if args.repeat > 1 {
        let history = service.scan_history();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&history)?);
        } else {
            print::header("scan history");
            for record in &history {
                print::print_status(format::history_line(record));
            }
        }
    }

    if !args.json {
        print::end_of_program();
    }

    match last.as_ref().and_then(ScanOutcome::failure) {
        Some(failure) => anyhow::bail!("scan {} failed [{}]: {}", failure.scan_id, failure.code, failure.message),
        None => Ok(()),
    }
}

fn render(outcome: &ScanOutcome) {
    match outcome {
        ScanOutcome::Completed(report) => render_report(report),
        ScanOutcome::Failed(failure) => {
            let error = &failure.error;
            print::header("scan failed");
            print::aligned_line("Scan", error.scan_id.to_string());
            print::aligned_line("Code", error.code.red().bold());
            print::aligned_line("Reason", error.message.as_str());
        }
    }
}

fn render_report(report: &ScanReport) {
    if let Some(network) = &report.network {
        print::header("network");
        print::as_tree_one_level(format::network_details(network));
    }

    if report.devices.is_empty() {
        print::header("zero hosts detected");
        print::no_results();
        return;
    }

    print::header("devices");
    for (idx, device) in report.devices.iter().enumerate() {
        print::tree_head(idx, &device.display_name);
        print::as_tree_one_level(format::device_details(device));
        if idx + 1 != report.devices.len() {
            print::print("");
        }
    }

    print::fat_separator();
    print::centerln(&format::summary_line(&report.stats, report.scan_info.duration_ms));
}
