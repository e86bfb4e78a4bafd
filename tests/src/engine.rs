//! Properties of the engine's building blocks under concurrency: the
//! admission gate's bound and slot hygiene, and the aggregator's behaviour
//! when fed from many producers at once.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use pnet::util::MacAddr;

use arpmap_common::network::host::ResolvedHost;
use arpmap_core::scanner::aggregate::Aggregator;
use arpmap_core::scanner::dispatch::Dispatcher;

#[tokio::test]
async fn dispatcher_bounds_concurrency_under_a_burst() {
    const LIMIT: usize = 8;
    const BURST: usize = 200;

    let mut dispatcher = Dispatcher::new(LIMIT);
    let running = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let completed = Arc::new(AtomicUsize::new(0));

    for _ in 0..BURST {
        let running = running.clone();
        let peak = peak.clone();
        let completed = completed.clone();
        dispatcher
            .submit(async move {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(2)).await;
                running.fetch_sub(1, Ordering::SeqCst);
                completed.fetch_add(1, Ordering::SeqCst);
            })
            .await;
    }
    dispatcher.join_all().await;

    assert!(
        peak.load(Ordering::SeqCst) <= LIMIT,
        "active resolvers exceeded the configured bound"
    );
    assert_eq!(completed.load(Ordering::SeqCst), BURST);
    assert_eq!(dispatcher.active(), 0, "every slot must be released");
}

#[tokio::test]
async fn dispatcher_releases_slots_on_failure_paths_too() {
    let mut dispatcher = Dispatcher::new(3);

    for i in 0..30u32 {
        dispatcher
            .submit(async move {
                // odd tasks bail out early, mimicking transport errors
                if i % 2 == 1 {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(1)).await;
            })
            .await;
    }
    dispatcher.join_all().await;
    assert_eq!(dispatcher.active(), 0);
}

#[tokio::test]
async fn aggregator_neither_loses_nor_duplicates_under_concurrent_delivery() {
    const PRODUCERS: usize = 48;

    let (tx, mut aggregator) = Aggregator::channel();

    let mut producers = Vec::new();
    for i in 0..PRODUCERS {
        let tx = tx.clone();
        producers.push(tokio::spawn(async move {
            // stagger deliveries a little so arrivals interleave
            tokio::time::sleep(Duration::from_millis((i % 7) as u64)).await;
            let record = ResolvedHost {
                ip: Ipv4Addr::new(10, 1, (i / 256) as u8, (i % 256) as u8),
                mac: MacAddr::new(2, 0, 0, 0, 0, i as u8),
            };
            tx.send(record).unwrap();
        }));
    }
    drop(tx);

    let started = tokio::time::Instant::now();
    aggregator.collect(PRODUCERS, Duration::from_secs(5)).await;

    for producer in producers {
        producer.await.unwrap();
    }

    assert_eq!(aggregator.len(), PRODUCERS);
    for i in 0..PRODUCERS {
        let ip = Ipv4Addr::new(10, 1, (i / 256) as u8, (i % 256) as u8);
        assert!(
            aggregator.snapshot().iter().any(|r| r.ip == ip),
            "record for {ip} went missing"
        );
    }
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "a fully delivered set must not wait out the window"
    );
}
