//! Scans against the machine's real network. Run with `cargo test -- --ignored`.

use lanward_common::config::Config;
use lanward_common::models::ScanOptions;
use lanward_core::DiscoveryService;

#[tokio::test]
#[ignore]
async fn system_scan_completes() {
    let service = DiscoveryService::with_system(Config::default());
    let outcome = service.perform_scan(ScanOptions::default()).await;

    assert!(outcome.is_success(), "scan failed: {:?}", outcome.failure());
    let report = outcome.report().unwrap();
    for pair in report.devices.windows(2) {
        assert!(pair[0].in_domain >= pair[1].in_domain);
    }
    assert_eq!(service.scan_history().len(), 1);
}

#[tokio::test]
#[ignore]
async fn system_scan_honours_narrow_range() {
    let service = DiscoveryService::with_system(Config::default());
    let outcome = service
        .perform_scan(ScanOptions {
            timeout_ms: Some(500),
            address_range: Some(String::from("192.0.2.0/24")),
        })
        .await;

    // TEST-NET-1 never shows up in a private neighbor table.
    assert!(outcome.report().unwrap().devices.is_empty());
}

#[test]
#[ignore]
fn system_info_describes_this_host() {
    let info = DiscoveryService::with_system(Config::default()).system_info();
    assert!(!info.hostname.is_empty());
    assert!(info.cpu_count > 0);
    assert!(!info.network_interfaces.is_empty());
}
