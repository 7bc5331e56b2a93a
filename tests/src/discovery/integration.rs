use std::collections::HashMap;
use std::net::Ipv4Addr;

use lanward_common::models::{DeviceClass, ScanOptions, UNKNOWN_VENDOR};
use lanward_core::discovery::INCOMPLETE;

use crate::fakes::{FakeNames, FakeNeighbors, FakePorts, FakeProbe, FakeTopology, Lab, Lookup};

fn ip(last: u8) -> Ipv4Addr {
    Ipv4Addr::new(10, 0, 0, last)
}

/// Every host listed is alive with the given latency.
fn lan(hosts: &[(u8, &'static str, f64)]) -> Lab {
    let table = hosts.iter().map(|(last, mac, _)| (ip(*last), *mac)).collect();
    let latencies = hosts.iter().map(|(last, _, latency)| (ip(*last), *latency)).collect();
    Lab::new(FakeNeighbors::Table(table), FakeProbe(latencies))
}

fn names(label: &'static str, entries: &[(u8, &'static str)]) -> FakeNames {
    FakeNames {
        label,
        lookup: Lookup::Names(entries.iter().map(|(last, name)| (ip(*last), *name)).collect()),
    }
}

#[tokio::test]
async fn empty_neighbor_table_is_an_empty_success() {
    let service = Lab::empty().build();
    let outcome = service.perform_scan(ScanOptions::default()).await;

    let report = outcome.report().expect("empty scan must succeed");
    assert!(report.devices.is_empty());
    assert_eq!(report.stats.total, 0);
    assert_eq!(report.stats.average_latency_ms, 0.0);
    assert!(report.network.is_some());

    let history = service.scan_history();
    assert_eq!(history.len(), 1);
    assert!(history[0].succeeded);
    assert_eq!(history[0].scan_id, report.scan_info.id);
}

#[tokio::test]
async fn harvest_failure_is_not_an_empty_scan() {
    let mut lab = Lab::empty();
    lab.neighbors = FakeNeighbors::Broken;
    let service = lab.build();

    let outcome = service.perform_scan(ScanOptions::default()).await;
    assert!(!outcome.is_success());

    let failure = outcome.failure().unwrap();
    assert_eq!(failure.code, "HARVEST_FAILED");
    assert!(failure.message.contains("permission denied"));

    let history = service.scan_history();
    assert_eq!(history.len(), 1);
    assert!(!history[0].succeeded);
    assert_eq!(history[0].scan_id, failure.scan_id);
}

#[tokio::test]
async fn topology_failure_and_missing_interface() {
    let mut lab = Lab::empty();
    lab.topology = FakeTopology::Broken;
    let outcome = lab.build().perform_scan(ScanOptions::default()).await;
    assert_eq!(outcome.failure().map(|f| f.code.as_str()), Some("TOPOLOGY_FAILED"));

    let mut lab = lan(&[(20, "02:00:00:00:00:20", 1.0)]);
    lab.topology = FakeTopology::Missing;
    let outcome = lab.build().perform_scan(ScanOptions::default()).await;
    let report = outcome.report().unwrap();
    assert!(report.network.is_none());
    assert_eq!(report.devices.len(), 1);
}

#[tokio::test]
async fn history_keeps_the_ten_most_recent_scans() {
    let service = Lab::empty().build();

    let mut ids = Vec::new();
    for _ in 0..11 {
        let outcome = service.perform_scan(ScanOptions::default()).await;
        ids.push(outcome.report().unwrap().scan_info.id);
    }

    let history = service.scan_history();
    assert_eq!(history.len(), 10);

    let recorded: Vec<u64> = history.iter().map(|r| r.scan_id).collect();
    let expected: Vec<u64> = ids[1..].iter().rev().copied().collect();
    assert_eq!(recorded, expected);
    assert!(!recorded.contains(&ids[0]));
    assert_eq!(service.system_info().history_size, 10);
}

#[tokio::test]
async fn concurrent_scans_get_distinct_increasing_ids() {
    let service = Lab::empty().build();
    let (a, b) = tokio::join!(
        service.perform_scan(ScanOptions::default()),
        service.perform_scan(ScanOptions::default())
    );

    let a = a.report().unwrap().scan_info.id;
    let b = b.report().unwrap().scan_info.id;
    assert_ne!(a, b);
    assert_eq!(service.scan_history().len(), 2);
}

#[tokio::test]
async fn devices_are_ranked_by_domain_then_latency() {
    let mut lab = lan(&[
        (5, "02:00:00:00:00:05", 3.0),
        (2, "02:00:00:00:00:02", 50.0),
        (9, "02:00:00:00:00:09", 10.0),
    ]);
    lab.names.push(names("dns", &[(2, "ws-02.corp.example"), (9, "ws-09.corp.example")]));

    let outcome = lab.build().perform_scan(ScanOptions::default()).await;
    let report = outcome.report().unwrap();

    let order: Vec<Ipv4Addr> = report.devices.iter().map(|d| d.ip).collect();
    assert_eq!(order, vec![ip(9), ip(2), ip(5)]);
    assert_eq!(report.stats.in_domain_count, 2);
    assert_eq!(report.stats.low_latency_count, 1);
    assert_eq!(report.stats.low_latency_pct, 33);
}

#[tokio::test]
async fn dead_candidates_are_dropped() {
    let mut lab = lan(&[(20, "02:00:00:00:00:20", 4.0)]);
    if let FakeNeighbors::Table(table) = &mut lab.neighbors {
        table.push((ip(21), "02:00:00:00:00:21"));
    }

    let outcome = lab.build().perform_scan(ScanOptions::default()).await;
    let devices = &outcome.report().unwrap().devices;
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].ip, ip(20));
}

#[tokio::test]
async fn resolver_falls_back_after_timeout() {
    let mut lab = lan(&[(40, "00:80:77:00:00:40", 6.0)]);
    lab.names.push(FakeNames {
        label: "dns",
        lookup: Lookup::Hang,
    });
    lab.names.push(names("netbios", &[(40, "printer01")]));
    lab.names.push(names("mdns", &[(40, "never-asked")]));

    let outcome = lab.build().perform_scan(ScanOptions::default()).await;
    let device = &outcome.report().unwrap().devices[0];

    assert_eq!(device.hostname.as_deref(), Some("printer01"));
    assert_eq!(device.display_name, "printer01");
    assert_eq!(device.vendor, "Brother");
    assert_eq!(device.device_type, DeviceClass::Printer);
}

#[tokio::test]
async fn unresolvable_host_gets_synthesized_name() {
    let mut lab = lan(&[(41, "02:00:00:00:00:41", 6.0)]);
    lab.names.push(FakeNames {
        label: "dns",
        lookup: Lookup::Fail,
    });
    lab.names.push(FakeNames {
        label: "netbios",
        lookup: Lookup::Hang,
    });

    let outcome = lab.build().perform_scan(ScanOptions::default()).await;
    let device = &outcome.report().unwrap().devices[0];

    assert_eq!(device.hostname, None);
    assert_eq!(device.display_name, "host-10-0-0-41");
    assert_eq!(device.vendor, UNKNOWN_VENDOR);
    assert_eq!(device.device_type, DeviceClass::Generic);
}

#[tokio::test]
async fn hostname_suffix_alone_means_domain_member() {
    let mut lab = lan(&[(30, "02:00:00:00:00:30", 2.0)]);
    lab.names.push(names("dns", &[(30, "fin-07.corp.example")]));

    let outcome = lab.build().perform_scan(ScanOptions::default()).await;
    let device = &outcome.report().unwrap().devices[0];

    assert!(device.in_domain);
    assert_eq!(device.domain_signals.as_deref(), Some(&[][..]));
}

#[tokio::test]
async fn directory_ports_mark_domain_member_and_services() {
    let mut lab = lan(&[(10, "00:0C:29:00:00:10", 1.0), (11, "02:00:00:00:00:11", 1.5)]);
    lab.ports = FakePorts(HashMap::from([(ip(10), vec![389, 88, 445]), (ip(11), vec![445])]));

    let outcome = lab.build().perform_scan(ScanOptions::default()).await;
    let devices = &outcome.report().unwrap().devices;

    assert_eq!(devices[0].ip, ip(10));
    assert!(devices[0].in_domain);
    assert_eq!(
        devices[0].domain_signals,
        Some(vec![String::from("LDAP"), String::from("Kerberos")])
    );
    assert_eq!(devices[0].device_type, DeviceClass::VirtualMachine);

    assert!(!devices[1].in_domain);
    assert_eq!(devices[1].domain_signals, None);
}

#[tokio::test]
async fn one_broken_host_does_not_sink_the_scan() {
    let mut lab = lan(&[
        (50, "B8:27:EB:00:00:50", 5.0),
        (51, "02:00:00:00:00:51", 1.0),
    ]);
    lab.names.push(FakeNames {
        label: "dns",
        lookup: Lookup::PanicOn(ip(50)),
    });

    let outcome = lab.build().perform_scan(ScanOptions::default()).await;
    let report = outcome.report().expect("partial failure is still a success");
    assert_eq!(report.devices.len(), 2);

    let broken = report.devices.iter().find(|d| d.ip == ip(50)).unwrap();
    assert_eq!(broken.device_type, DeviceClass::Unknown);
    assert_eq!(broken.vendor, "Raspberry Pi Foundation");
    assert_eq!(broken.display_name, "host-10-0-0-50");
    assert!(!broken.in_domain);
    assert_eq!(broken.metadata.enrichment_error.as_deref(), Some(INCOMPLETE));

    let healthy = report.devices.iter().find(|d| d.ip == ip(51)).unwrap();
    assert!(healthy.metadata.enrichment_error.is_none());
}

#[tokio::test]
async fn outcome_serializes_as_tagged_envelope() {
    let mut lab = lan(&[(70, "02:00:00:00:00:70", 1.0)]);
    lab.names.push(names("dns", &[(70, "kiosk")]));
    let service = lab.build();

    let ok = serde_json::to_value(service.perform_scan(ScanOptions::default()).await).unwrap();
    assert_eq!(ok["success"], true);
    assert_eq!(ok["devices"][0]["displayName"], "kiosk");
    assert_eq!(ok["devices"][0]["deviceType"], "Generic Device");
    assert_eq!(ok["devices"][0]["status"], "active");
    assert!(ok["scanInfo"]["id"].is_u64());
    assert!(ok["stats"]["vendorDistribution"].is_object());

    let failed = service
        .perform_scan(ScanOptions {
            timeout_ms: Some(5),
            ..ScanOptions::default()
        })
        .await;
    let failed = serde_json::to_value(failed).unwrap();
    assert_eq!(failed["success"], false);
    assert_eq!(failed["error"]["code"], "INVALID_OPTIONS");
    assert!(failed["error"]["scanId"].is_u64());
}
