use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use arpmap_common::network::host::ResolvedHost;

/// Arrival-ordered collection of resolutions, keyed by address for
/// membership tests.
#[derive(Debug, Default)]
pub struct ResultSet {
    records: Vec<ResolvedHost>,
    seen: HashSet<Ipv4Addr>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record unless its address is already present.
    pub fn insert(&mut self, record: ResolvedHost) -> bool {
        if !self.seen.insert(record.ip) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.seen.contains(&ip)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ResolvedHost] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ResolvedHost> {
        self.records
    }
}

/// Sole owner of a scan's result set.
///
/// Concurrently completing resolvers never touch the collection; they push
/// records through the insertion channel and this side is the only writer.
pub struct Aggregator {
    inbox: UnboundedReceiver<ResolvedHost>,
    results: ResultSet,
}

impl Aggregator {
    /// Creates the insertion channel and the owning half.
    pub fn channel() -> (UnboundedSender<ResolvedHost>, Self) {
        let (tx, inbox) = mpsc::unbounded_channel();
        (
            tx,
            Self {
                inbox,
                results: ResultSet::new(),
            },
        )
    }

    /// Collects records until all `expected` candidates resolved or `window`
    /// elapses, whichever comes first.
    ///
    /// Producers hanging up early does not end the wait: candidates that
    /// never answer run out the clock, and only a fully resolved scan
    /// returns ahead of it.
    pub async fn collect(&mut self, expected: usize, window: Duration) {
        if expected == 0 {
            return;
        }

        let deadline = tokio::time::sleep(window);
        tokio::pin!(deadline);
        let mut open = true;

        loop {
            tokio::select! {
                record = self.inbox.recv(), if open => match record {
                    Some(record) => {
                        self.results.insert(record);
                        if self.results.len() == expected {
                            break;
                        }
                    }
                    None => open = false,
                },
                _ = &mut deadline => break,
            }
        }
    }

    /// Current view of what has resolved so far.
    pub fn snapshot(&self) -> &[ResolvedHost] {
        self.results.records()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_results(self) -> ResultSet {
        self.results
    }
}
