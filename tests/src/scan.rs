//! End-to-end scan scenarios over a scripted transport: partial subnet
//! resolution that has to run out the clock, single-target prompt return,
//! and configuration failures that must stop a scan before it starts.

use std::net::Ipv4Addr;
use std::time::Duration;

use anyhow::bail;
use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use pnet::util::MacAddr;

use arpmap_common::config::ScanConfig;
use arpmap_common::network::range::SubnetRange;
use arpmap_core::scanner::{self, ScanError, ScanTarget};

use crate::stub;

const IFF_UP: u32 = 1;
const IFF_BROADCAST: u32 = 1 << 1;

fn mock_interface(addr: [u8; 4], prefix: u8) -> NetworkInterface {
    NetworkInterface {
        name: "eth0".to_string(),
        description: String::new(),
        index: 1,
        mac: Some(MacAddr::new(0x00, 0x11, 0x22, 0x33, 0x44, 0x55)),
        ips: vec![IpNetwork::V4(
            Ipv4Network::new(Ipv4Addr::from(addr), prefix).unwrap(),
        )],
        flags: IFF_UP | IFF_BROADCAST,
    }
}

fn quick_config(timeout: Duration) -> ScanConfig {
    ScanConfig {
        timeout,
        request_interval: Duration::from_millis(50),
        max_concurrency: 64,
    }
}

#[tokio::test]
async fn partial_subnet_resolution_waits_out_the_deadline() {
    let subnet = SubnetRange::new(
        Ipv4Addr::new(192, 168, 1, 0),
        Ipv4Addr::new(255, 255, 255, 252),
    )
    .unwrap();
    let candidates: Vec<Ipv4Addr> = subnet.hosts().collect();
    assert_eq!(candidates.len(), 4);

    let live = Ipv4Addr::new(192, 168, 1, 1);
    let (handle, _sent) = stub::scripted(vec![(live, stub::mac(1), Duration::from_millis(50))]);

    let cfg = quick_config(Duration::from_millis(500));
    let started = tokio::time::Instant::now();
    let results = scanner::resolve_candidates(handle, candidates, &cfg).await;
    let elapsed = started.elapsed();

    assert_eq!(results.len(), 1);
    assert!(results.contains(live));
    assert_eq!(results.records()[0].mac, stub::mac(1));
    assert!(
        elapsed >= Duration::from_millis(500),
        "unanswered candidates must run out the overall timeout, returned after {elapsed:?}"
    );
    assert!(elapsed < Duration::from_secs(2));
}

#[tokio::test]
async fn single_target_returns_well_before_the_timeout() {
    let target = Ipv4Addr::new(10, 0, 0, 5);
    let (handle, sent) = stub::scripted(vec![(target, stub::mac(5), Duration::from_millis(10))]);

    let cfg = quick_config(Duration::from_millis(500));
    let started = tokio::time::Instant::now();
    let results = scanner::resolve_candidates(handle, vec![target], &cfg).await;
    let elapsed = started.elapsed();

    assert_eq!(results.len(), 1);
    assert_eq!(results.records()[0].ip, target);
    assert_eq!(results.records()[0].mac, stub::mac(5));
    assert!(
        elapsed < Duration::from_millis(250),
        "a fully resolved scan must return early, took {elapsed:?}"
    );
    assert!(sent.lock().unwrap().iter().all(|ip| *ip == target));
}

#[tokio::test]
async fn open_failure_is_a_configuration_error_and_nothing_runs() {
    let intf = mock_interface([192, 168, 1, 5], 24);
    let cfg = quick_config(Duration::from_millis(200));

    let started = tokio::time::Instant::now();
    let result = scanner::scan_interface_with(&intf, ScanTarget::Subnet, &cfg, |_, _| {
        bail!("socket: operation not permitted")
    })
    .await;

    assert!(matches!(result, Err(ScanError::Transport { .. })));
    assert!(
        started.elapsed() < Duration::from_millis(100),
        "no resolver may start when the transport cannot open"
    );
}

#[tokio::test]
async fn loopback_interfaces_are_rejected_up_front() {
    let mut intf = mock_interface([127, 0, 0, 1], 8);
    intf.name = "lo".to_string();
    let cfg = quick_config(Duration::from_millis(200));

    let result = scanner::scan_interface_with(&intf, ScanTarget::Subnet, &cfg, |_, _| {
        panic!("the transport must not be opened for an unusable interface")
    })
    .await;

    assert!(matches!(result, Err(ScanError::Unusable { .. })));
}

#[tokio::test]
async fn masks_wider_than_class_b_are_rejected_up_front() {
    let intf = mock_interface([10, 0, 0, 5], 8);
    let cfg = quick_config(Duration::from_millis(200));

    let result = scanner::scan_interface_with(&intf, ScanTarget::Subnet, &cfg, |_, _| {
        panic!("the transport must not be opened for an unusable interface")
    })
    .await;

    assert!(matches!(result, Err(ScanError::Unusable { .. })));
}

#[tokio::test]
async fn single_target_mode_bypasses_subnet_enumeration() {
    let intf = mock_interface([192, 168, 1, 5], 24);
    let target = Ipv4Addr::new(192, 168, 1, 77);
    let (handle, sent) = stub::scripted(vec![(target, stub::mac(77), Duration::from_millis(5))]);

    let cfg = quick_config(Duration::from_millis(500));
    let records =
        scanner::scan_interface_with(&intf, ScanTarget::Single(target), &cfg, move |_, src| {
            assert_eq!(src, Ipv4Addr::new(192, 168, 1, 5));
            Ok(handle)
        })
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].ip, target);

    let sent = sent.lock().unwrap();
    assert!(!sent.is_empty());
    assert!(
        sent.iter().all(|ip| *ip == target),
        "only the explicit target may be probed"
    );
}

#[tokio::test]
async fn host_route_scan_resolves_nothing_and_returns_quickly() {
    // A /32 assignment enumerates zero candidates; the scan ends without
    // waiting for the timeout.
    let intf = mock_interface([192, 168, 1, 5], 32);
    let (handle, sent) = stub::scripted(vec![]);

    let cfg = quick_config(Duration::from_secs(5));
    let started = tokio::time::Instant::now();
    let records = scanner::scan_interface_with(&intf, ScanTarget::Subnet, &cfg, move |_, _| {
        Ok(handle)
    })
    .await
    .unwrap();

    assert!(records.is_empty());
    assert!(sent.lock().unwrap().is_empty());
    assert!(started.elapsed() < Duration::from_millis(500));
}
