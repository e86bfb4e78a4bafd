//! # Scan Orchestrator
//!
//! Drives one full scan over an interface: validates the usable
//! address/mask, builds the candidate set, opens the link-layer transport,
//! pushes every candidate through the bounded dispatcher and collects
//! results until everything resolved or the overall deadline fires.
//!
//! Per-target failures never propagate; a candidate that errors or stays
//! silent is just absent from the returned records. Only configuration
//! problems (an unusable interface, a transport that will not open) reach
//! the caller.

use std::net::Ipv4Addr;

use pnet::datalink::NetworkInterface;
use thiserror::Error;
use tracing::debug;

use arpmap_common::config::ScanConfig;
use arpmap_common::network::host::ResolvedHost;
use arpmap_common::network::interface::{self, ViabilityError};

use crate::network::transport::{self, TransportHandle};

pub mod aggregate;
pub mod dispatch;
mod resolver;
mod router;

use aggregate::{Aggregator, ResultSet};
use dispatch::Dispatcher;
use resolver::Resolver;
use router::ReplyRouter;

/// What one scan pass should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanTarget {
    /// Every candidate in the interface's subnet.
    Subnet,
    /// Exactly one address, skipping subnet enumeration.
    Single(Ipv4Addr),
}

/// Configuration-level failures; everything below this level is absorbed.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("interface {name} is not scannable: {reason}")]
    Unusable {
        name: String,
        #[source]
        reason: ViabilityError,
    },
    #[error("failed to open link-layer transport on {name}: {source}")]
    Transport {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Scans `intf` with the real Ethernet transport.
pub async fn scan_interface(
    intf: &NetworkInterface,
    target: ScanTarget,
    cfg: &ScanConfig,
) -> Result<Vec<ResolvedHost>, ScanError> {
    scan_interface_with(intf, target, cfg, transport::open_channel).await
}

/// Scans `intf`, opening the transport through `open` so tests can
/// substitute scripted or failing channels.
pub async fn scan_interface_with<F>(
    intf: &NetworkInterface,
    target: ScanTarget,
    cfg: &ScanConfig,
    open: F,
) -> Result<Vec<ResolvedHost>, ScanError>
where
    F: FnOnce(&NetworkInterface, Ipv4Addr) -> anyhow::Result<TransportHandle>,
{
    let subnet = interface::usable_subnet(intf).map_err(|reason| ScanError::Unusable {
        name: intf.name.clone(),
        reason,
    })?;

    let candidates: Vec<Ipv4Addr> = match target {
        ScanTarget::Single(ip) => vec![ip],
        ScanTarget::Subnet => subnet.hosts().collect(),
    };
    debug!(
        "scanning {} ({} candidate(s), source {})",
        intf.name,
        candidates.len(),
        subnet.addr()
    );

    let handle = open(intf, subnet.addr()).map_err(|source| ScanError::Transport {
        name: intf.name.clone(),
        source,
    })?;

    Ok(resolve_candidates(handle, candidates, cfg)
        .await
        .into_records())
}

/// The engine proper: fans the candidates out through the admission gate,
/// correlates replies and aggregates records under the overall deadline.
pub async fn resolve_candidates(
    handle: TransportHandle,
    candidates: Vec<Ipv4Addr>,
    cfg: &ScanConfig,
) -> ResultSet {
    let expected = candidates.len();
    let (router, router_task) = ReplyRouter::spawn(handle.rx);
    let (records_tx, mut aggregator) = Aggregator::channel();

    let transport = handle.tx;
    let submit_router = router.clone();
    let reply_timeout = cfg.timeout;
    let request_interval = cfg.request_interval;
    let mut dispatcher = Dispatcher::new(cfg.max_concurrency);

    let submitter = tokio::spawn(async move {
        for target in candidates {
            let resolver = Resolver::new(
                target,
                transport.clone(),
                submit_router.clone(),
                records_tx.clone(),
                reply_timeout,
                request_interval,
            );
            dispatcher
                .submit(async move {
                    let _ = resolver.run().await;
                })
                .await;
        }
        // Closing our sender lets the aggregator see the channel drain once
        // every resolver has finished.
        drop(records_tx);
        dispatcher.join_all().await;
    });

    aggregator.collect(expected, cfg.timeout).await;

    // Best-effort teardown: aborting the submitter drops its dispatcher,
    // which aborts any resolver still in flight; records they might still
    // produce land in a closed channel and are discarded.
    submitter.abort();
    router_task.abort();

    aggregator.into_results()
}
